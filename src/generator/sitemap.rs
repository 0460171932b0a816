//! Sitemap generation.
//!
//! Lists every indexable URL: the configured static routes first, then one
//! entry per post in the order the post source returns them.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    content::{POSTS_DIR, PostSource},
    log,
    utils::{
        date::today_ymd,
        minify::compact_feed,
    },
};
use anyhow::{Context, Result};
use std::fs;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// A URL plus its last-modified date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub url: String,
    pub last_modified: String,
}

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, source: &impl PostSource) -> Result<()> {
    if config.build.sitemap.enable {
        let entries = collect_routes(config, source, &today_ymd())?;
        write(&entries, config)?;
    }
    Ok(())
}

/// Ask the post source for posts and build the full entry list.
pub fn collect_routes(
    config: &SiteConfig,
    source: &impl PostSource,
    today: &str,
) -> Result<Vec<RouteEntry>> {
    let posts = source.posts().context("Failed to list posts for sitemap")?;
    let slugs = posts
        .iter()
        .map(|post| (post.slug.as_str(), post.metadata.published_at.as_str()));

    Ok(build_routes(
        &config.base.url,
        &config.build.sitemap.routes,
        slugs,
        today,
    ))
}

/// Static routes stamped with `today`, then posts with their publish date.
///
/// URLs are plain concatenation: nothing is deduplicated, sorted, or
/// validated.
pub fn build_routes<'a>(
    base_url: &str,
    routes: &[String],
    posts: impl IntoIterator<Item = (&'a str, &'a str)>,
    today: &str,
) -> Vec<RouteEntry> {
    let statics = routes.iter().map(|route| RouteEntry {
        url: format!("{base_url}{route}"),
        last_modified: today.to_owned(),
    });
    let posts = posts.into_iter().map(|(slug, published_at)| RouteEntry {
        url: format!("{base_url}/{POSTS_DIR}/{slug}"),
        last_modified: published_at.to_owned(),
    });

    statics.chain(posts).collect()
}

// ============================================================================
// Serialization
// ============================================================================

/// Generate sitemap XML string.
pub(crate) fn into_xml(entries: &[RouteEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 96);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            escape_xml(&entry.last_modified)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Write sitemap to output file.
fn write(entries: &[RouteEntry], config: &SiteConfig) -> Result<()> {
    let sitemap_path = &config.build.sitemap.path;
    let xml = into_xml(entries);
    let xml = compact_feed(&xml, config);

    if let Some(parent) = sitemap_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(sitemap_path, &*xml)
        .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

    log!("sitemap"; "{} ({} urls)", sitemap_path.file_name().unwrap_or_default().to_string_lossy(), entries.len());
    Ok(())
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Post, PostMetadata};

    const BASE: &str = "https://thieus-notes.vercel.app";
    const TODAY: &str = "2025-03-14";

    fn routes() -> Vec<String> {
        vec!["".into(), "/posts".into()]
    }

    fn post(slug: &str, date: &str) -> Post {
        Post {
            slug: slug.into(),
            metadata: PostMetadata {
                title: slug.into(),
                published_at: date.into(),
                ..Default::default()
            },
            content: String::new(),
        }
    }

    #[test]
    fn test_static_routes_only() {
        let no_posts: [(&str, &str); 0] = [];
        let entries = build_routes(BASE, &routes(), no_posts, TODAY);

        assert_eq!(
            entries,
            vec![
                RouteEntry {
                    url: BASE.into(),
                    last_modified: TODAY.into()
                },
                RouteEntry {
                    url: format!("{BASE}/posts"),
                    last_modified: TODAY.into()
                },
            ]
        );
    }

    #[test]
    fn test_post_route_passes_date_through() {
        let entries = build_routes(BASE, &routes(), [("hello", "2024-01-01")], TODAY);

        assert_eq!(
            entries[2],
            RouteEntry {
                url: format!("{BASE}/posts/hello"),
                last_modified: "2024-01-01".into()
            }
        );
    }

    #[test]
    fn test_order_and_length() {
        let posts = [("b-post", "2023-05-01"), ("a-post", "2024-06-01"), ("c", "not a date")];
        let entries = build_routes(BASE, &routes(), posts, TODAY);

        assert_eq!(entries.len(), 2 + 3);
        assert_eq!(entries[0].url, BASE);
        assert_eq!(entries[1].url, format!("{BASE}/posts"));
        assert_eq!(entries[2].url, format!("{BASE}/posts/b-post"));
        assert_eq!(entries[3].url, format!("{BASE}/posts/a-post"));
        assert_eq!(entries[4].last_modified, "not a date");
    }

    #[test]
    fn test_no_dedup_or_validation() {
        let routes = vec!["/posts".to_string(), "/posts".to_string()];
        let entries = build_routes("not a url", &routes, [("a b", "x")], TODAY);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], entries[1]);
        assert_eq!(entries[2].url, "not a url/posts/a b");
    }

    #[test]
    fn test_collect_routes_uses_post_source() {
        let config = SiteConfig::default();
        let source = vec![post("hello", "2024-01-01"), post("again", "2024-02-01")];
        let entries = collect_routes(&config, &source, TODAY).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].url, format!("{BASE}/posts/hello"));
        assert_eq!(entries[3].last_modified, "2024-02-01");
    }

    #[test]
    fn test_entries_identical_apart_from_today() {
        let posts = [("hello", "2024-01-01")];
        let first = build_routes(BASE, &routes(), posts, "2025-01-01");
        let second = build_routes(BASE, &routes(), posts, "2025-01-02");

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.url, b.url);
        }
        assert_eq!(first[2], second[2]);
        assert_ne!(first[0].last_modified, second[0].last_modified);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_xml() {
        let entries = build_routes(BASE, &routes(), [("q&a", "2024-01-01")], TODAY);
        let xml = into_xml(&entries);

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains(&format!("<loc>{BASE}</loc>")));
        assert!(xml.contains(&format!("<lastmod>{TODAY}</lastmod>")));
        assert!(xml.contains(&format!("<loc>{BASE}/posts/q&amp;a</loc>")));
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = into_xml(&[]);
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }
}
