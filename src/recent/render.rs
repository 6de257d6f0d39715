// src/recent/render.rs
use chrono::{DateTime, Utc};
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::recent::types::{
    ActivityRecord, FailureKind, SourceDescriptor, SourceOutcome, SENTINEL_TIMESTAMP,
};
use crate::recent::ProgressSink;
use crate::urls::add_utm_source;

/// One progress line per source, e.g. `🎥 YouTube... ✅ 5 results found!`.
pub fn progress_line(source: &SourceDescriptor, outcome: &SourceOutcome) -> String {
    let status = match outcome {
        SourceOutcome::Found(records) => {
            let n = records.len();
            let noun = if n == 1 { "result" } else { "results" };
            format!("✅ {n} {noun} found!")
        }
        SourceOutcome::Empty | SourceOutcome::Unavailable => "⚠️ No results found".to_string(),
        SourceOutcome::Failed(kind) => failure_text(*kind).to_string(),
    };
    format!("{}... {}", source.label(), status)
}

fn failure_text(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::NotFound => "❌ Request returned 404!",
        FailureKind::Forbidden => "❌ Request returned 403 (Forbidden)!",
        FailureKind::ServerError => "❌ Request returned 500 (Server Error)!",
        FailureKind::RequestFailed => "❌ Request failed!",
        FailureKind::TimedOut => "❌ Request timed out!",
        FailureKind::Parse => "❌ Error: invalid feed!",
    }
}

/// Relative "when" column. Older than two days switches to an absolute date.
pub fn relative_time(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if published == SENTINEL_TIMESTAMP {
        return "unknown".to_string();
    }
    let delta = now.signed_duration_since(published);
    if delta > chrono::Duration::days(2) {
        return published.format("%-d %b %Y").to_string();
    }

    let minutes = delta.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{hours} hours ago")
        };
    }
    let days = delta.num_days();
    if days == 1 {
        "1 day ago".to_string()
    } else {
        format!("{days} days ago")
    }
}

/// Cut to `max_width` chars, ending in "..." when shortened.
pub fn truncate_title(title: &str, max_width: usize) -> String {
    if title.chars().count() <= max_width {
        return title.to_string();
    }
    let keep = max_width.saturating_sub(3);
    let mut out: String = title.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Link")]
    link: String,
}

/// Rounded four-column table of ranked records.
pub fn activity_table(records: &[ActivityRecord], now: DateTime<Utc>, title_width: usize) -> String {
    let rows = records.iter().map(|r| ActivityRow {
        source: format!("{} {}", r.source_icon(), r.source_name()),
        activity: truncate_title(r.title(), title_width),
        when: relative_time(r.published_at(), now),
        link: match add_utm_source(r.url()) {
            u if u.is_empty() => "-".to_string(),
            u => u,
        },
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::center()))
        .with(Modify::new(Columns::single(1)).with(Alignment::left()))
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .with(Modify::new(Columns::single(3)).with(Alignment::center()));
    table.to_string()
}

/// Writes progress lines to stdout in gray.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl ProgressSink for TerminalSink {
    fn line(&mut self, text: &str) {
        println!("{}", text.bright_black());
    }

    fn blank(&mut self) {
        println!();
    }
}

pub fn print_header() {
    println!("{}", "Fetching recent activity...".bold());
    println!();
}

/// Prints the table, or the neutral empty message when nothing came back.
pub fn print_activities(records: &[ActivityRecord], title_width: usize) {
    if records.is_empty() {
        println!("{}", "No recent activities found.".yellow());
        return;
    }
    println!("{}", activity_table(records, Utc::now(), title_width));
}
