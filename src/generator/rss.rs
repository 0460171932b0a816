//! rss feed generation.
//!
//! One item per post, newest first, linking to the post page.

use crate::{
    config::SiteConfig,
    content::{POSTS_DIR, Post, sort_newest_first},
    log,
    utils::{
        date::to_rfc2822,
        minify::compact_feed,
    },
};
use anyhow::{Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::fs;

// ============================================================================
// Public API
// ============================================================================

/// Build rss feed if enabled in config.
pub fn build_rss(config: &SiteConfig, posts: &[Post]) -> Result<()> {
    if config.build.rss.enable {
        RssFeed::new(config, posts).write()?;
    }
    Ok(())
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: Vec<Post>,
}

impl<'a> RssFeed<'a> {
    fn new(config: &'a SiteConfig, posts: &[Post]) -> Self {
        let mut posts = posts.to_vec();
        sort_newest_first(&mut posts);
        Self { config, posts }
    }

    /// Generate rss xml string
    fn to_xml(&self) -> Result<String> {
        let base = &self.config.base;
        let items: Vec<_> = self
            .posts
            .iter()
            .map(|post| post_to_rss_item(post, self.config))
            .collect();

        let mut channel = ChannelBuilder::default()
            .title(&base.title)
            .link(&base.url)
            .description(&base.description)
            .language(base.language.clone())
            .generator(format!("notes-ssg {}", env!("CARGO_PKG_VERSION")))
            .items(items)
            .build();
        if !base.copyright.is_empty() {
            channel.set_copyright(base.copyright.clone());
        }

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    /// Write rss feed to file
    fn write(self) -> Result<()> {
        let xml = self.to_xml()?;
        let xml = compact_feed(&xml, self.config);
        let rss_path = &self.config.build.rss.path;

        if let Some(parent) = rss_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(rss_path, &*xml)?;

        log!("rss"; "{} ({} items)", rss_path.file_name().unwrap_or_default().to_string_lossy(), self.posts.len());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Absolute URL of a post page.
fn post_link(post: &Post, config: &SiteConfig) -> String {
    format!(
        "{}/{POSTS_DIR}/{}",
        config.base.url.trim_end_matches('/'),
        urlencoding::encode(&post.slug)
    )
}

/// Convert a post to an rss item.
///
/// Posts whose date cannot be parsed are kept, without a `pubDate`.
fn post_to_rss_item(post: &Post, config: &SiteConfig) -> rss::Item {
    let link = post_link(post, config);

    ItemBuilder::default()
        .title(Some(post.metadata.title.clone()))
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(post.metadata.summary.clone())
        .pub_date(to_rfc2822(&post.metadata.published_at))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostMetadata;
    use tempfile::TempDir;

    fn make_config(url: &str) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.url = url.to_string();
        config
    }

    fn make_post(slug: &str, date: &str, summary: Option<&str>) -> Post {
        Post {
            slug: slug.into(),
            metadata: PostMetadata {
                title: format!("Title {slug}"),
                published_at: date.into(),
                summary: summary.map(String::from),
                ..Default::default()
            },
            content: String::new(),
        }
    }

    #[test]
    fn test_post_to_rss_item() {
        let config = make_config("https://example.com/");
        let post = make_post("hello", "2024-01-01", Some("Test Summary"));

        let item = post_to_rss_item(&post, &config);
        assert_eq!(item.title(), Some("Title hello"));
        assert_eq!(item.link(), Some("https://example.com/posts/hello"));
        assert_eq!(item.description(), Some("Test Summary"));
        assert!(item.guid().unwrap().is_permalink());
        assert!(item.pub_date().unwrap().contains("Jan 2024"));
    }

    #[test]
    fn test_post_to_rss_item_bad_date() {
        let config = make_config("https://example.com");
        let item = post_to_rss_item(&make_post("x", "someday", None), &config);
        assert_eq!(item.pub_date(), None);
        assert_eq!(item.description(), None);
    }

    #[test]
    fn test_feed_is_newest_first() {
        let config = make_config("https://example.com");
        let posts = vec![
            make_post("old", "2022-01-01", None),
            make_post("new", "2024-01-01", None),
        ];
        let xml = RssFeed::new(&config, &posts).to_xml().unwrap();

        assert!(xml.contains("<link>https://example.com</link>"));
        assert!(xml.find("Title new").unwrap() < xml.find("Title old").unwrap());
        assert!(xml.contains("notes-ssg"));
    }

    #[test]
    fn test_feed_with_copyright() {
        let mut config = make_config("https://example.com");
        config.base.copyright = "© Doan Thieu".into();
        let xml = RssFeed::new(&config, &[]).to_xml().unwrap();
        assert!(xml.contains("<copyright>"));
    }

    #[test]
    fn test_build_rss_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut config = make_config("https://example.com");
        config.build.rss.path = dir.path().join("feed/rss.xml");

        build_rss(&config, &[make_post("hello", "2024-01-01", None)]).unwrap();
        let xml = fs::read_to_string(&config.build.rss.path).unwrap();
        assert!(xml.contains("https://example.com/posts/hello"));
    }

    #[test]
    fn test_build_rss_disabled() {
        let dir = TempDir::new().unwrap();
        let mut config = make_config("https://example.com");
        config.build.rss.enable = false;
        config.build.rss.path = dir.path().join("rss.xml");

        build_rss(&config, &[]).unwrap();
        assert!(!config.build.rss.path.exists());
    }
}
