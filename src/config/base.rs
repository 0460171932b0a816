//! `[base]` section configuration.
//!
//! Site metadata used by the document head, footer, rss and sitemap.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in notes.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Notes"
/// description = "Things I learned"
/// author = "Alice"
/// url = "https://notes.example.com"
/// twitter = "@alice"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used in `<title>` and `og:title`.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Author name for the footer and rss feed.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Site description for meta tags and the rss channel.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,

    /// Base URL prefixed to every sitemap/rss link, used verbatim.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: String,

    /// BCP 47 language code, e.g. "en", "vi".
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Copyright notice for the rss channel.
    #[serde(default)]
    pub copyright: String,

    /// Preview image for `og:image`.
    #[serde(default = "defaults::base::image")]
    #[educe(Default = defaults::base::image())]
    pub image: Option<String>,

    /// Twitter handle for `twitter:site`; omitted from the head when unset.
    #[serde(default)]
    pub twitter: Option<String>,
}

impl BaseConfig {
    /// Host part of the base URL, e.g. `notes.example.com`, for `og:site_name`.
    pub fn site_name(&self) -> &str {
        let url = self.url.trim_end_matches('/');
        url.split_once("://").map_or(url, |(_, rest)| rest)
    }
}
