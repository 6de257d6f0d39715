// src/recent/parsers.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::Deserialize;

use crate::recent::types::{ActivityRecord, SourceKind, PER_SOURCE_CAP, SENTINEL_TIMESTAMP};

pub const UNTITLED: &str = "Untitled";

/// Account name the GitHub activity feed repeats at the start of every title.
pub const GITHUB_USERNAME: &str = "ardalis";

const BLUESKY_PROFILE_URL: &str = "https://bsky.app/profile/ardalis.com";

static GITHUB_TITLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^{GITHUB_USERNAME}\s+")).unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("document has no root element")]
    NoRoot,
    #[error("expected <{expected}> root, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
    #[error("malformed xml: {0}")]
    Xml(String),
}

// ---------- RSS 2.0 ----------

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<Text>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<Text>,
}

// ---------- Atom ----------

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: Option<Text>,
    #[serde(rename = "link", default)]
    link: Vec<Link>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Element text, ignoring attributes such as `type="html"`.
#[derive(Debug, Default, Deserialize)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Clone, Copy)]
enum TitleField {
    Title,
    Description,
}

#[derive(Clone, Copy)]
enum DateField {
    Published,
    Updated,
}

impl SourceKind {
    /// Turn a fetched feed document into at most five records, in document order.
    pub fn parse(self, doc: &str) -> Result<Vec<ActivityRecord>, ParseError> {
        match self {
            SourceKind::Blog => parse_rss(doc, self, TitleField::Title, ""),
            SourceKind::Bluesky => {
                parse_rss(doc, self, TitleField::Description, BLUESKY_PROFILE_URL)
            }
            SourceKind::YouTube => parse_atom(doc, self, DateField::Published, None),
            SourceKind::GitHub => {
                parse_atom(doc, self, DateField::Updated, Some(&*GITHUB_TITLE_PREFIX))
            }
            // No public feed exists; this is permanent, not a failure.
            SourceKind::LinkedIn => Ok(Vec::new()),
        }
    }
}

fn parse_rss(
    doc: &str,
    kind: SourceKind,
    title_from: TitleField,
    fallback_url: &str,
) -> Result<Vec<ActivityRecord>, ParseError> {
    let xml = scrub_html_entities_for_xml(doc);
    expect_root(&xml, "rss")?;
    let rss: Rss = from_str(&xml).map_err(|e| ParseError::Xml(e.to_string()))?;

    let records = rss
        .channel
        .item
        .into_iter()
        .take(PER_SOURCE_CAP)
        .map(|it| {
            let raw_title = match title_from {
                TitleField::Title => it.title,
                TitleField::Description => it.description,
            };
            let url = it
                .link
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| fallback_url.to_string());
            ActivityRecord::new(
                kind,
                clean_title(raw_title.map(|t| t.value).as_deref(), None),
                url,
                parse_published(it.pub_date.as_deref()),
            )
        })
        .collect();
    Ok(records)
}

fn parse_atom(
    doc: &str,
    kind: SourceKind,
    date_from: DateField,
    strip_prefix: Option<&Regex>,
) -> Result<Vec<ActivityRecord>, ParseError> {
    let xml = scrub_html_entities_for_xml(doc);
    expect_root(&xml, "feed")?;
    let feed: Feed = from_str(&xml).map_err(|e| ParseError::Xml(e.to_string()))?;

    let records = feed
        .entry
        .into_iter()
        .take(PER_SOURCE_CAP)
        .map(|e| {
            let raw_date = match date_from {
                DateField::Published => e.published.as_deref(),
                DateField::Updated => e.updated.as_deref(),
            };
            ActivityRecord::new(
                kind,
                clean_title(e.title.map(|t| t.value).as_deref(), strip_prefix),
                entry_href(&e.link),
                parse_published(raw_date),
            )
        })
        .collect();
    Ok(records)
}

/// First `rel="alternate"` link wins, otherwise the first link with an href.
fn entry_href(links: &[Link]) -> String {
    links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate") && l.href.is_some())
        .or_else(|| links.iter().find(|l| l.href.is_some()))
        .and_then(|l| l.href.clone())
        .unwrap_or_default()
}

/// Serde ignores the root element name, so an Atom body would deserialize as
/// an empty RSS channel (and vice versa). Check the root explicitly.
fn expect_root(xml: &str, expected: &'static str) -> Result<(), ParseError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let found = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                return if found == expected {
                    Ok(())
                } else {
                    Err(ParseError::UnexpectedRoot { expected, found })
                };
            }
            Ok(Event::Eof) => return Err(ParseError::NoRoot),
            Err(e) => return Err(ParseError::Xml(e.to_string())),
            Ok(_) => {}
        }
    }
}

/// Decode entities, drop markup, collapse whitespace. Blank becomes "Untitled".
pub fn clean_title(raw: Option<&str>, strip_prefix: Option<&Regex>) -> String {
    static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

    let Some(raw) = raw else {
        return UNTITLED.to_string();
    };
    let decoded = html_escape::decode_html_entities(raw);
    let stripped = RE_TAGS.replace_all(&decoded, "");
    let mut out = RE_WS.replace_all(&stripped, " ").trim().to_string();

    if let Some(re) = strip_prefix {
        out = re.replace(&out, "").into_owned();
    }

    if out.is_empty() {
        UNTITLED.to_string()
    } else {
        out
    }
}

/// Best-effort timestamp parsing. Never fails: anything unreadable becomes
/// [`SENTINEL_TIMESTAMP`] so the record is kept but ranks last.
pub fn parse_published(raw: Option<&str>) -> DateTime<Utc> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return SENTINEL_TIMESTAMP;
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return dt.with_timezone(&Utc);
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.and_utc();
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(SENTINEL_TIMESTAMP)
}

/// Named HTML entities (`&nbsp;`, `&copy;`, ...) are not defined in XML and
/// make the whole document unreadable. Decode them up front; anything that
/// decodes to an XML-special char is re-escaped, unknown names are kept literal.
fn scrub_html_entities_for_xml(s: &str) -> String {
    static RE_ENTITY: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").unwrap());

    RE_ENTITY
        .replace_all(s, |caps: &regex::Captures| {
            let whole = &caps[0];
            if matches!(&caps[1], "amp" | "lt" | "gt" | "quot" | "apos") {
                return whole.to_string();
            }
            let decoded = html_escape::decode_html_entities(whole);
            if decoded == whole {
                format!("&amp;{}", &whole[1..])
            } else {
                html_escape::encode_safe(&decoded).into_owned()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rss(items: &str) -> String {
        format!(r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title>{items}</channel></rss>"#)
    }

    #[test]
    fn rfc2822_and_rfc3339_dates_parse() {
        let a = parse_published(Some("Tue, 13 Oct 2026 09:30:00 GMT"));
        assert_eq!(a, Utc.with_ymd_and_hms(2026, 10, 13, 9, 30, 0).unwrap());
        let b = parse_published(Some("2026-10-13T11:30:00+02:00"));
        assert_eq!(a, b);
    }

    #[test]
    fn naive_dates_are_treated_as_utc() {
        let d = parse_published(Some("2026-10-13"));
        assert_eq!(d, Utc.with_ymd_and_hms(2026, 10, 13, 0, 0, 0).unwrap());
        let dt = parse_published(Some(" 2026-10-13 08:00:00 "));
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 10, 13, 8, 0, 0).unwrap());
    }

    #[test]
    fn naive_dates_with_fractional_seconds_parse() {
        let dt = parse_published(Some("2026-10-13T09:30:00.123"));
        assert_eq!(dt.timestamp_millis() % 1_000, 123);
        assert_eq!(dt.format("%F %T").to_string(), "2026-10-13 09:30:00");
        let spaced = parse_published(Some("2026-10-13 09:30:00.5"));
        assert_eq!(spaced.timestamp_millis() % 1_000, 500);
    }

    #[test]
    fn html_entities_do_not_break_the_feed() {
        let doc = rss("<item><title>&copy; 2026 Ardalis&nbsp;&mdash; Tips &amp; Tricks &bogus;</title></item>");
        let out = SourceKind::Blog.parse(&doc).unwrap();
        assert_eq!(out[0].title(), "© 2026 Ardalis — Tips & Tricks &bogus;");
    }

    #[test]
    fn xml_entities_pass_through_and_unknown_ones_stay_literal() {
        assert_eq!(scrub_html_entities_for_xml("x &amp; y &lt;"), "x &amp; y &lt;");
        assert_eq!(scrub_html_entities_for_xml("&bogus;"), "&amp;bogus;");
        assert_eq!(scrub_html_entities_for_xml("&hellip;"), "…");
    }

    #[test]
    fn missing_or_garbage_dates_become_sentinel() {
        assert_eq!(parse_published(None), SENTINEL_TIMESTAMP);
        assert_eq!(parse_published(Some("   ")), SENTINEL_TIMESTAMP);
        assert_eq!(parse_published(Some("last tuesday")), SENTINEL_TIMESTAMP);
    }

    #[test]
    fn titles_are_cleaned_and_defaulted() {
        assert_eq!(clean_title(Some("  <b>Clean</b>&amp;\n Simple "), None), "Clean& Simple");
        assert_eq!(clean_title(Some("   "), None), UNTITLED);
        assert_eq!(clean_title(None, None), UNTITLED);
    }

    #[test]
    fn github_prefix_is_stripped_only_at_start() {
        let t = clean_title(
            Some("ardalis   starred ardalis/CleanArchitecture"),
            Some(&*GITHUB_TITLE_PREFIX),
        );
        assert_eq!(t, "starred ardalis/CleanArchitecture");
    }

    #[test]
    fn rss_items_are_capped_at_five() {
        let items: String = (0..8)
            .map(|i| format!("<item><title>post {i}</title><link>https://x/{i}</link></item>"))
            .collect();
        let out = SourceKind::Blog.parse(&rss(&items)).unwrap();
        assert_eq!(out.len(), PER_SOURCE_CAP);
        assert_eq!(out[0].title(), "post 0");
        assert_eq!(out[4].url(), "https://x/4");
    }

    #[test]
    fn bluesky_uses_description_and_profile_fallback() {
        let doc = rss("<item><description>hello sky</description><pubDate>Tue, 13 Oct 2026 09:30:00 GMT</pubDate></item>");
        let out = SourceKind::Bluesky.parse(&doc).unwrap();
        assert_eq!(out[0].title(), "hello sky");
        assert_eq!(out[0].url(), BLUESKY_PROFILE_URL);
    }

    #[test]
    fn atom_document_is_rejected_by_rss_parser() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><title>x</title></entry></feed>"#;
        let err = SourceKind::Blog.parse(doc).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { expected: "rss", .. }));
    }

    #[test]
    fn non_xml_body_is_a_parse_error() {
        assert!(SourceKind::YouTube.parse("not a feed").is_err());
        assert!(SourceKind::GitHub.parse("").is_err());
    }

    #[test]
    fn linkedin_never_yields_records() {
        assert!(SourceKind::LinkedIn.parse("<rss/>").unwrap().is_empty());
    }

    #[test]
    fn alternate_link_preferred_over_others() {
        let links = vec![
            Link {
                href: Some("https://self".into()),
                rel: Some("self".into()),
            },
            Link {
                href: Some("https://alt".into()),
                rel: Some("alternate".into()),
            },
        ];
        assert_eq!(entry_href(&links), "https://alt");
        assert_eq!(entry_href(&[]), "");
    }
}
