// src/snippets.rs
//! Random quote and coding tip, served from small JSON files on the blog.
//! Any failure (network, status, bad JSON, empty list) falls back to a
//! built-in entry, so these never error.

use rand::seq::IndexedRandom;
use serde::Deserialize;
use std::time::Duration;

use crate::recent::fetch::FeedFetcher;

pub const QUOTES_URL: &str = "https://ardalis.com/quotes.json";
pub const TIPS_URL: &str = "https://ardalis.com/tips.json";

/// Shorter than the feed timeout; a quote isn't worth a long wait.
pub const SNIPPET_TIMEOUT: Duration = Duration::from_secs(5);

pub const FALLBACK_QUOTE: &str = "New is glue.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tip {
    #[serde(rename = "tipText", alias = "tiptext", alias = "TipText")]
    pub tip_text: String,
    #[serde(rename = "referenceLink", alias = "referencelink", alias = "ReferenceLink", default)]
    pub reference_link: String,
}

pub fn fallback_tip() -> Tip {
    Tip {
        tip_text: "Always include units in non-Timespan time variables/properties \
                   (e.g. `int timeoutMilliseconds` not `int timeout`)."
            .to_string(),
        reference_link: "https://ardalis.com/use-timespan-or-specify-units-in-duration-properties-and-parameters"
            .to_string(),
    }
}

/// Fetch the list at `url` and pick one entry at random.
/// `None` on any failure or when the list is empty.
async fn fetch_random<T, F>(fetcher: &F, url: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de> + Clone,
    F: FeedFetcher + ?Sized,
{
    let body = match fetcher.fetch_text(url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url, error = %e, "snippet fetch failed, using fallback");
            return None;
        }
    };
    let items: Vec<T> = match serde_json::from_str(&body) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(url, error = %e, "snippet json invalid, using fallback");
            return None;
        }
    };
    items.choose(&mut rand::rng()).cloned()
}

pub async fn random_quote<F: FeedFetcher + ?Sized>(fetcher: &F) -> String {
    fetch_random::<String, F>(fetcher, QUOTES_URL)
        .await
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| FALLBACK_QUOTE.to_string())
}

pub async fn random_tip<F: FeedFetcher + ?Sized>(fetcher: &F) -> Tip {
    fetch_random::<Tip, F>(fetcher, TIPS_URL)
        .await
        .filter(|t| !t.tip_text.trim().is_empty())
        .unwrap_or_else(fallback_tip)
}

pub fn format_quote(quote: &str) -> String {
    format!("\"{quote}\" - Ardalis")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recent::fetch::FetchError;
    use async_trait::async_trait;

    struct Canned(Result<String, FetchError>);

    #[async_trait]
    impl FeedFetcher for Canned {
        async fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn quote_comes_from_the_list() {
        let f = Canned(Ok(r#"["Fail fast."]"#.into()));
        assert_eq!(random_quote(&f).await, "Fail fast.");
    }

    #[tokio::test]
    async fn quote_falls_back_on_any_failure() {
        for res in [
            Err(FetchError::Timeout),
            Err(FetchError::Status(404)),
            Ok("<html>not json</html>".to_string()),
            Ok("[]".to_string()),
            Ok(r#"["   "]"#.to_string()),
        ] {
            assert_eq!(random_quote(&Canned(res)).await, FALLBACK_QUOTE);
        }
    }

    #[tokio::test]
    async fn tip_reads_camel_case_fields() {
        let f = Canned(Ok(
            r#"[{"tipText":"Prefer guard clauses.","referenceLink":"https://ardalis.com/guard"}]"#
                .into(),
        ));
        let tip = random_tip(&f).await;
        assert_eq!(tip.tip_text, "Prefer guard clauses.");
        assert_eq!(tip.reference_link, "https://ardalis.com/guard");
    }

    #[tokio::test]
    async fn tip_falls_back_when_unavailable() {
        let tip = random_tip(&Canned(Err(FetchError::Status(500)))).await;
        assert_eq!(tip, fallback_tip());
        let tip = random_tip(&Canned(Ok(r#"[{"nope":1}]"#.into()))).await;
        assert_eq!(tip, fallback_tip());
    }

    #[test]
    fn quote_is_attributed() {
        assert_eq!(format_quote("New is glue."), "\"New is glue.\" - Ardalis");
    }
}
