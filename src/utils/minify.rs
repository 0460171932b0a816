//! Output compaction, gated by `[build].minify`.
//!
//! Pages go through `minify-html`. The sitemap and rss feed are plain
//! line-per-element XML, so dropping indentation and line breaks is enough.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Compact a rendered page document.
pub fn compact_page<'a>(html: &'a str, config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(html.as_bytes());
    }

    // Pages carry no inline scripts or styles, only markup.
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    Cow::Owned(minify_html::minify(html.as_bytes(), &cfg))
}

/// Compact the sitemap or rss feed.
pub fn compact_feed<'a>(xml: &'a str, config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(xml.as_bytes());
    }

    let compact: String = xml
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    Cow::Owned(compact.into_bytes())
}
