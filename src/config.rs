// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "ARDALIS_CONFIG";
pub const ENV_HTTP_TIMEOUT: &str = "ARDALIS_HTTP_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "ARDALIS_USER_AGENT";
pub const DEFAULT_CONFIG_PATH: &str = "config/ardalis.toml";

fn default_http_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    format!("ardalis-cli/{}", env!("CARGO_PKG_VERSION"))
}
fn default_title_width() -> usize {
    60
}

/// Runtime knobs. Feed URLs are deliberately not here; they are fixed per source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Per-request timeout for every feed fetch.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Activity titles longer than this are cut and suffixed with "...".
    #[serde(default = "default_title_width")]
    pub title_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
            title_width: default_title_width(),
        }
    }
}

impl AppConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Load from an explicit TOML file, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let mut cfg: AppConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.apply_env_overrides();
        cfg.sanitize();
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $ARDALIS_CONFIG
    /// 2) config/ardalis.toml
    /// 3) built-in defaults
    ///
    /// Env overrides are applied last in every case.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            anyhow::ensure!(
                pb.exists(),
                "{ENV_CONFIG_PATH} points to non-existent path {}",
                pb.display()
            );
            return Self::load_from(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg.sanitize();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var(ENV_HTTP_TIMEOUT) {
            match v.trim().parse::<u64>() {
                Ok(secs) => self.http_timeout_secs = secs,
                Err(_) => tracing::warn!(value = %v, "ignoring invalid {ENV_HTTP_TIMEOUT}"),
            }
        }
        if let Ok(v) = std::env::var(ENV_USER_AGENT) {
            if !v.trim().is_empty() {
                self.user_agent = v.trim().to_string();
            }
        }
    }

    fn sanitize(&mut self) {
        if self.http_timeout_secs == 0 {
            self.http_timeout_secs = default_http_timeout_secs();
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = default_user_agent();
        }
        // Room for at least one char plus "..."
        if self.title_width < 4 {
            self.title_width = default_title_width();
        }
    }
}
