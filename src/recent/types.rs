// src/recent/types.rs
use chrono::{DateTime, Utc};

/// Upper bound on records taken from a single feed, in document order.
pub const PER_SOURCE_CAP: usize = 5;

/// Size of the ranked list handed to the renderer.
pub const TOP_N: usize = 5;

/// Stand-in for a missing or unparseable timestamp. Sorts after every real date.
pub const SENTINEL_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Every place recent activity can come from, in registration order.
/// Registration order is also the tie-break order when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Blog,
    YouTube,
    GitHub,
    Bluesky,
    LinkedIn,
}

impl SourceKind {
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Blog,
        SourceKind::YouTube,
        SourceKind::GitHub,
        SourceKind::Bluesky,
        SourceKind::LinkedIn,
    ];

    pub const fn display_name(self) -> &'static str {
        match self {
            SourceKind::Blog => "Blog",
            SourceKind::YouTube => "YouTube",
            SourceKind::GitHub => "GitHub",
            SourceKind::Bluesky => "Bluesky",
            SourceKind::LinkedIn => "LinkedIn",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            SourceKind::Blog => "📝",
            SourceKind::YouTube => "🎥",
            SourceKind::GitHub => "⚡",
            SourceKind::Bluesky => "🦋",
            SourceKind::LinkedIn => "💼",
        }
    }

    /// `None` means the source has no public feed at all (LinkedIn).
    /// Such a source is never fetched and always contributes nothing.
    pub const fn feed_url(self) -> Option<&'static str> {
        match self {
            SourceKind::Blog => Some("https://ardalis.com/rss"),
            SourceKind::YouTube => {
                Some("https://www.youtube.com/feeds/videos.xml?channel_id=UCkvBKVrZ_RepwX7UgfnFIUA")
            }
            SourceKind::GitHub => Some("https://github.com/ardalis.atom"),
            SourceKind::Bluesky => Some("https://bsky.app/profile/ardalis.com/rss"),
            SourceKind::LinkedIn => None,
        }
    }

    const fn descriptor(self) -> SourceDescriptor {
        SourceDescriptor {
            kind: self,
            display_name: self.display_name(),
            icon: self.icon(),
            feed_url: self.feed_url(),
        }
    }
}

/// Static description of one registered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub feed_url: Option<&'static str>,
}

impl SourceDescriptor {
    /// `"{icon} {name}"`, as shown in progress lines and the table.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.display_name)
    }
}

static REGISTRY: [SourceDescriptor; 5] = [
    SourceKind::Blog.descriptor(),
    SourceKind::YouTube.descriptor(),
    SourceKind::GitHub.descriptor(),
    SourceKind::Bluesky.descriptor(),
    SourceKind::LinkedIn.descriptor(),
];

/// The process-wide source table, in registration order.
pub fn registry() -> &'static [SourceDescriptor] {
    &REGISTRY
}

/// One normalized item from any feed.
///
/// Fields are private so a record can't be mutated after a parser builds it;
/// the source name and icon always come from the producing [`SourceKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    title: String,
    url: String,
    published_at: DateTime<Utc>,
    source: SourceKind,
}

impl ActivityRecord {
    pub fn new(
        source: SourceKind,
        title: impl Into<String>,
        url: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            published_at,
            source,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn source_name(&self) -> &'static str {
        self.source.display_name()
    }

    pub fn source_icon(&self) -> &'static str {
        self.source.icon()
    }

    pub fn has_known_date(&self) -> bool {
        self.published_at != SENTINEL_TIMESTAMP
    }
}

/// Why a source contributed nothing. Only surfaced in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Forbidden,
    ServerError,
    RequestFailed,
    TimedOut,
    Parse,
}

/// What one source produced during a single aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Found(Vec<ActivityRecord>),
    Empty,
    /// Source has no public feed; nothing was fetched.
    Unavailable,
    Failed(FailureKind),
}

impl SourceOutcome {
    pub fn into_records(self) -> Vec<ActivityRecord> {
        match self {
            SourceOutcome::Found(records) => records,
            _ => Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SourceOutcome::Failed(_))
    }
}
