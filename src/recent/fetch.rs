// src/recent/fetch.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::recent::types::FailureKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request returned {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<&FetchError> for FailureKind {
    fn from(e: &FetchError) -> Self {
        match e {
            FetchError::Status(404) => FailureKind::NotFound,
            FetchError::Status(403) => FailureKind::Forbidden,
            FetchError::Status(500) => FailureKind::ServerError,
            FetchError::Status(_) | FetchError::Network(_) => FailureKind::RequestFailed,
            FetchError::Timeout => FailureKind::TimedOut,
        }
    }
}

/// Capability to fetch a feed document as text. One attempt, no retries.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher. The timeout applies to each request individually.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("building feed http client")?;
        Ok(Self { client })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Self::new(cfg.http_timeout(), &cfg.user_agent)
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        tracing::debug!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            ms = t0.elapsed().as_millis() as u64,
            "feed fetched"
        );
        Ok(body)
    }
}
