//! HTML rendering.
//!
//! ```text
//! lists      ContentItem / Post slices ──► fragment
//!   │
//! pages      fragments + heading text  ──► Page { route, title, body }
//!   │
//! document   Page + SiteConfig         ──► full HTML document
//! ```
//!
//! Everything here is a pure function of its inputs; the build module owns
//! all IO.

mod document;
mod lists;
mod pages;

pub use document::render_document;
pub use pages::{bookmarks_page, home_page, post_page, posts_page, projects_page};

use pulldown_cmark::{Options, Parser, html};

/// A rendered page body waiting for the document shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Site-relative route without trailing slash, `""` for the home page.
    pub route: String,
    /// Page title; `None` uses the site title alone.
    pub title: Option<String>,
    /// Meta description; `None` uses the site description.
    pub description: Option<String>,
    /// Preview image; `None` uses the site image.
    pub image: Option<String>,
    /// Markup placed inside `<main>`.
    pub body: String,
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a markdown post body to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("hello"), "hello");
        assert_eq!(escape_html("<b>"), "&lt;b&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(
            escape_html(r#"Apple's "Landmarks""#),
            "Apple&#39;s &quot;Landmarks&quot;"
        );
    }

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("# Title\n\nSome *emphasis* and ~~strike~~.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<del>strike</del>"));
    }

    #[test]
    fn test_markdown_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_markdown_empty() {
        assert_eq!(markdown_to_html(""), "");
    }
}
