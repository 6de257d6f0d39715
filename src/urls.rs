// src/urls.rs
//! Profile links and the UTM tag added to every outbound link.

use anyhow::Context;
use clap::ValueEnum;

pub const BLOG: &str = "https://ardalis.com";
pub const BLUESKY: &str = "https://bsky.app/profile/ardalis.com";
pub const CONTACT: &str = "https://ardalis.com/contact/";
pub const DOMETRAIN: &str = "https://dometrain.com/author/steve-ardalis-smith/";
pub const GITHUB: &str = "https://github.com/ardalis";
pub const LINKEDIN: &str = "https://www.linkedin.com/in/stevenandrewsmith/";
pub const NIMBLEPROS: &str = "https://nimblepros.com";
pub const NUGET: &str = "https://www.nuget.org/profiles/ardalis";
pub const PLURALSIGHT: &str = "https://www.pluralsight.com/authors/steve-smith";
pub const SPEAKER: &str = "https://sessionize.com/ardalis";
pub const SUBSCRIBE: &str = "https://ardalis.com/tips";
pub const YOUTUBE: &str = "https://youtube.com/@Ardalis";

pub const UTM_SOURCE: &str = "ardaliscli";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileTarget {
    Blog,
    Bluesky,
    Contact,
    Dometrain,
    Github,
    Linkedin,
    Nimblepros,
    Nuget,
    Pluralsight,
    Speaker,
    Subscribe,
    Youtube,
}

impl ProfileTarget {
    pub fn url(self) -> &'static str {
        match self {
            ProfileTarget::Blog => BLOG,
            ProfileTarget::Bluesky => BLUESKY,
            ProfileTarget::Contact => CONTACT,
            ProfileTarget::Dometrain => DOMETRAIN,
            ProfileTarget::Github => GITHUB,
            ProfileTarget::Linkedin => LINKEDIN,
            ProfileTarget::Nimblepros => NIMBLEPROS,
            ProfileTarget::Nuget => NUGET,
            ProfileTarget::Pluralsight => PLURALSIGHT,
            ProfileTarget::Speaker => SPEAKER,
            ProfileTarget::Subscribe => SUBSCRIBE,
            ProfileTarget::Youtube => YOUTUBE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileTarget::Blog => "Blog",
            ProfileTarget::Bluesky => "Bluesky",
            ProfileTarget::Contact => "Contact",
            ProfileTarget::Dometrain => "Dometrain",
            ProfileTarget::Github => "GitHub",
            ProfileTarget::Linkedin => "LinkedIn",
            ProfileTarget::Nimblepros => "NimblePros",
            ProfileTarget::Nuget => "NuGet",
            ProfileTarget::Pluralsight => "Pluralsight",
            ProfileTarget::Speaker => "Speaker",
            ProfileTarget::Subscribe => "Subscribe",
            ProfileTarget::Youtube => "YouTube",
        }
    }
}

/// Append `utm_source=ardaliscli`. Empty URLs and URLs already carrying a
/// `utm_source` are returned unchanged. Fragments stay at the end.
pub fn add_utm_source(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.contains("utm_source=") {
        return url.to_string();
    }
    let (base, fragment) = match url.split_once('#') {
        Some((b, f)) => (b, Some(f)),
        None => (url, None),
    };
    let sep = if base.contains('?') { '&' } else { '?' };
    let mut out = format!("{base}{sep}utm_source={UTM_SOURCE}");
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}

/// Launch the system browser. Errors are returned for the caller to report.
pub fn open_in_browser(url: &str) -> anyhow::Result<()> {
    tracing::info!(url, "opening browser");
    open::that(url).with_context(|| format!("opening {url}"))
}
