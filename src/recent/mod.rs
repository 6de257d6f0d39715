// src/recent/mod.rs
pub mod fetch;
pub mod parsers;
pub mod render;
pub mod types;

use futures::future::join_all;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use std::time::Instant;

use crate::recent::fetch::FeedFetcher;
use crate::recent::types::{
    registry, ActivityRecord, FailureKind, SourceDescriptor, SourceOutcome, TOP_N,
};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "recent_source_errors_total",
            "Feed fetch/parse failures, per source."
        );
        describe_counter!("recent_records_total", "Records parsed from feeds.");
        describe_histogram!("recent_parse_ms", "Feed parse time in milliseconds.");
    });
}

/// Receives per-source progress while a verbose run is in flight.
pub trait ProgressSink: Send {
    fn line(&mut self, text: &str);

    /// Separator after the last source; not a progress line.
    fn blank(&mut self) {}
}

/// Discards everything. Used for quiet runs.
#[derive(Debug, Default)]
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn line(&mut self, _text: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// All sources fetched concurrently, no progress output.
    Quiet,
    /// Sources fetched one at a time in registration order, one line each.
    Verbose,
}

impl From<bool> for ExecutionMode {
    fn from(verbose: bool) -> Self {
        if verbose {
            ExecutionMode::Verbose
        } else {
            ExecutionMode::Quiet
        }
    }
}

/// Fetches every registered source, merges, ranks and truncates.
pub struct Aggregator<F> {
    fetcher: F,
    sources: Vec<SourceDescriptor>,
}

impl<F: FeedFetcher> Aggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            sources: registry().to_vec(),
        }
    }

    /// Replace the source list (order matters: it is the tie-break order).
    pub fn with_sources(mut self, sources: Vec<SourceDescriptor>) -> Self {
        self.sources = sources;
        self
    }

    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    /// The one entry point the CLI calls. Never fails; a source that errors
    /// simply contributes nothing.
    pub async fn get_recent_activities(
        &self,
        verbose: bool,
        sink: &mut dyn ProgressSink,
    ) -> Vec<ActivityRecord> {
        self.run(ExecutionMode::from(verbose), sink).await
    }

    pub async fn run(&self, mode: ExecutionMode, sink: &mut dyn ProgressSink) -> Vec<ActivityRecord> {
        ensure_metrics_described();
        let t0 = Instant::now();

        // Outcomes stay in registration order in both modes.
        let outcomes: Vec<SourceOutcome> = match mode {
            ExecutionMode::Quiet => {
                join_all(self.sources.iter().map(|s| self.collect_source(s))).await
            }
            ExecutionMode::Verbose => {
                let mut outcomes = Vec::with_capacity(self.sources.len());
                for source in &self.sources {
                    let outcome = self.collect_source(source).await;
                    sink.line(&render::progress_line(source, &outcome));
                    outcomes.push(outcome);
                }
                sink.blank();
                outcomes
            }
        };

        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        let merged: Vec<ActivityRecord> = outcomes
            .into_iter()
            .flat_map(SourceOutcome::into_records)
            .collect();
        let found = merged.len();
        let ranked = rank_top_n(merged, TOP_N);

        tracing::info!(
            target: "recent",
            ?mode,
            found,
            failed,
            kept = ranked.len(),
            ms = t0.elapsed().as_millis() as u64,
            "recent activity aggregated"
        );
        ranked
    }

    /// Fetch and parse one source. Every error stops here.
    async fn collect_source(&self, source: &SourceDescriptor) -> SourceOutcome {
        let Some(url) = source.feed_url else {
            return SourceOutcome::Unavailable;
        };

        let body = match self.fetcher.fetch_text(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(source = source.display_name, error = %e, "feed fetch failed");
                counter!("recent_source_errors_total", "source" => source.display_name)
                    .increment(1);
                return SourceOutcome::Failed(FailureKind::from(&e));
            }
        };

        let t0 = Instant::now();
        match source.kind.parse(&body) {
            Ok(records) => {
                histogram!("recent_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
                counter!("recent_records_total").increment(records.len() as u64);
                if records.is_empty() {
                    SourceOutcome::Empty
                } else {
                    SourceOutcome::Found(records)
                }
            }
            Err(e) => {
                tracing::warn!(source = source.display_name, error = %e, "feed parse failed");
                counter!("recent_source_errors_total", "source" => source.display_name)
                    .increment(1);
                SourceOutcome::Failed(FailureKind::Parse)
            }
        }
    }
}

/// Newest first, then truncate. The sort is stable, so records with equal
/// timestamps keep their input order (registration order when merged).
pub fn rank_top_n(mut records: Vec<ActivityRecord>, n: usize) -> Vec<ActivityRecord> {
    records.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    records.truncate(n);
    records
}
