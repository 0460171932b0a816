//! `[build]` section configuration.
//!
//! Paths, minification, and the rss/sitemap generators.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in notes.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory, posts live in content/posts
/// output = "public"        # Output directory
/// minify = true            # Minify HTML
///
/// [build.sitemap]
/// routes = ["", "/posts", "/projects"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root, set from the CLI.
    #[serde(default = "defaults::build::root", skip_serializing)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to root)
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory path (relative to root)
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Assets directory path (relative to root), copied as-is into output
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Minify HTML and XML output
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Remove the output directory before building
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// RSS feed configuration
    #[serde(default)]
    pub rss: RssConfig,

    /// Sitemap configuration
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[build.rss]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    /// Enable RSS feed generation
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path for the feed (relative to output)
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,
}

/// `[build.sitemap]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Enable sitemap generation
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path for the sitemap (relative to output)
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,

    /// Static route suffixes appended to `[base].url`, in order
    #[serde(default = "defaults::build::sitemap::routes")]
    #[educe(Default = defaults::build::sitemap::routes())]
    pub routes: Vec<String>,
}
