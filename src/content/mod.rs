//! Site content: static item lists and file-backed posts.
//!
//! Projects and bookmarks are plain [`ContentItem`] lists fixed at startup
//! (built-in defaults or `[[projects]]` / `[[bookmarks]]` in `notes.toml`).
//! Posts come from a [`PostSource`], read fresh on every build.

mod post;

pub use post::{
    DirPostSource, POSTS_DIR, Post, PostError, PostMetadata, PostSource,
    sort_newest_first,
};

use serde::{Deserialize, Serialize};

/// A single project or bookmark entry.
///
/// # Example
/// ```toml
/// [[projects]]
/// title = "Pilot"
/// year = 2022
/// description = "Simple HTTP network layer written in Swift"
/// url = "https://github.com/Thieurom/Pilot"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentItem {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// External link, opened in a new tab.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl ContentItem {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: None,
            url: url.to_owned(),
            year: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    pub const fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }
}
