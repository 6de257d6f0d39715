// tests/parsers_fixtures.rs
use ardalis_cli::recent::types::{SourceKind, PER_SOURCE_CAP, SENTINEL_TIMESTAMP};
use chrono::{TimeZone, Utc};

const BLOG_XML: &str = include_str!("fixtures/blog_rss.xml");
const YOUTUBE_XML: &str = include_str!("fixtures/youtube_atom.xml");
const GITHUB_XML: &str = include_str!("fixtures/github_atom.xml");
const BLUESKY_XML: &str = include_str!("fixtures/bluesky_rss.xml");
const ATOM_INTERLEAVED_XML: &str = include_str!("fixtures/atom_interleaved_links.xml");
const RSS_INTERLEAVED_XML: &str = include_str!("fixtures/rss_interleaved_items.xml");

#[test]
fn blog_fixture_is_capped_and_normalized() {
    let items = SourceKind::Blog.parse(BLOG_XML).expect("blog parse ok");
    assert_eq!(items.len(), PER_SOURCE_CAP, "sixth item must be dropped");

    assert_eq!(items[0].title(), "Avoid Primitive Obsession with Value Objects");
    assert_eq!(items[0].url(), "https://ardalis.com/avoid-primitive-obsession/");
    assert_eq!(
        items[0].published_at(),
        Utc.with_ymd_and_hms(2026, 10, 14, 10, 0, 0).unwrap()
    );
    assert_eq!(items[1].title(), "Specification Pattern & Repositories");
    assert_eq!(items[2].title(), "Untitled");
    assert!(items.iter().all(|r| r.source() == SourceKind::Blog));
}

#[test]
fn blog_fixture_keeps_item_with_bad_date() {
    let items = SourceKind::Blog.parse(BLOG_XML).unwrap();
    let guard = items
        .iter()
        .find(|r| r.title() == "Guard Clauses Revisited")
        .expect("record kept despite bad date");
    assert_eq!(guard.published_at(), SENTINEL_TIMESTAMP);
}

#[test]
fn youtube_fixture_uses_published_and_alternate_link() {
    let items = SourceKind::YouTube.parse(YOUTUBE_XML).expect("youtube parse ok");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title(), "Domain Events in .NET");
    assert_eq!(items[0].url(), "https://www.youtube.com/watch?v=aaa111");
    assert_eq!(
        items[0].published_at(),
        Utc.with_ymd_and_hms(2026, 10, 16, 14, 0, 0).unwrap()
    );
    assert_eq!(items[1].source_icon(), "🎥");
}

#[test]
fn github_fixture_strips_username_and_uses_updated() {
    let items = SourceKind::GitHub.parse(GITHUB_XML).expect("github parse ok");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title(), "pushed to main in ardalis/CleanArchitecture");
    assert_eq!(items[1].title(), "starred dotnet/aspire");
    assert_eq!(
        items[1].published_at(),
        Utc.with_ymd_and_hms(2026, 10, 12, 11, 0, 0).unwrap()
    );
    assert_eq!(items[1].url(), "https://github.com/dotnet/aspire");
}

#[test]
fn bluesky_fixture_uses_description_and_profile_fallback() {
    let items = SourceKind::Bluesky.parse(BLUESKY_XML).expect("bluesky parse ok");
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0].title(),
        "New video on domain events is up. Feedback welcome!"
    );
    assert_eq!(items[0].url(), "https://bsky.app/profile/ardalis.com/post/3kabc");
    assert_eq!(
        items[0].published_at(),
        Utc.with_ymd_and_hms(2026, 10, 15, 18, 20, 0).unwrap()
    );
    assert_eq!(items[1].url(), "https://bsky.app/profile/ardalis.com");
}

#[test]
fn schema_mismatch_is_a_parse_error() {
    assert!(SourceKind::YouTube.parse(BLOG_XML).is_err());
    assert!(SourceKind::Blog.parse(GITHUB_XML).is_err());
    assert!(SourceKind::Bluesky.parse("<html><body>rate limited</body></html>").is_err());
}

#[test]
fn atom_entry_with_links_around_title_parses() {
    let items = SourceKind::GitHub
        .parse(ATOM_INTERLEAVED_XML)
        .expect("split <link> elements are valid atom");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title(), "published GuardClauses v5.0.0");
    assert_eq!(
        items[0].url(),
        "https://github.com/ardalis/GuardClauses/releases/tag/v5.0.0"
    );
    assert_eq!(items[1].url(), "https://github.com/ardalis/Specification");
    assert_eq!(
        items[1].published_at(),
        Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap()
    );
}

#[test]
fn rss_channel_with_elements_between_items_parses() {
    let items = SourceKind::Blog
        .parse(RSS_INTERLEAVED_XML)
        .expect("channel elements between items are valid rss");
    let titles: Vec<_> = items.iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["First Post", "Second Post", "Third Post"]);
}
