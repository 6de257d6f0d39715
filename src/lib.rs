// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod card;
pub mod config;
pub mod recent;
pub mod snippets;
pub mod urls;

// ---- Re-exports for stable public API ----
pub use crate::config::AppConfig;
pub use crate::recent::fetch::{FeedFetcher, FetchError, HttpFetcher};
pub use crate::recent::types::{ActivityRecord, SourceKind};
pub use crate::recent::{Aggregator, ExecutionMode, ProgressSink, SilentSink};

use crate::recent::render::{self, TerminalSink};

/// The `recent` command end to end: header, live fetch over HTTP, table.
///
/// Only client construction can fail; feed failures are absorbed per source.
pub async fn run_recent(cfg: &AppConfig, verbose: bool) -> anyhow::Result<Vec<ActivityRecord>> {
    let fetcher = HttpFetcher::from_config(cfg)?;
    let aggregator = Aggregator::new(fetcher);

    render::print_header();
    let activities = if verbose {
        aggregator.get_recent_activities(true, &mut TerminalSink).await
    } else {
        aggregator.get_recent_activities(false, &mut SilentSink).await
    };
    render::print_activities(&activities, cfg.title_width);
    Ok(activities)
}

/// The `quote` command: one random quote, or the built-in one.
pub async fn run_quote(cfg: &AppConfig) -> anyhow::Result<String> {
    let fetcher = HttpFetcher::new(snippets::SNIPPET_TIMEOUT, &cfg.user_agent)?;
    let quote = snippets::format_quote(&snippets::random_quote(&fetcher).await);
    println!("{}", quote);
    Ok(quote)
}

/// The `tip` command: one random coding tip with its reference link.
pub async fn run_tip(cfg: &AppConfig) -> anyhow::Result<snippets::Tip> {
    use colored::Colorize;

    let fetcher = HttpFetcher::new(snippets::SNIPPET_TIMEOUT, &cfg.user_agent)?;
    let tip = snippets::random_tip(&fetcher).await;
    println!("{} {}", "💡".yellow(), tip.tip_text);
    if !tip.reference_link.is_empty() {
        println!("   {}", crate::urls::add_utm_source(&tip.reference_link).bright_black());
    }
    Ok(tip)
}
