//! Document shell: head metadata, nav bar and theme footer around a page.

use super::{Page, escape_html};
use crate::config::SiteConfig;

const NAV: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Notes", "/posts"),
    ("Projects", "/projects"),
    ("Bookmarks", "/bookmarks"),
];

/// Wrap a page in the full HTML document.
///
/// `year` is the copyright year shown in the footer, passed in so rendering
/// stays a pure function of its inputs.
pub fn render_document(page: &Page, config: &SiteConfig, year: i32) -> String {
    let mut html = String::with_capacity(page.body.len() + 2048);

    html.push_str("<!DOCTYPE html>");
    html.push_str(&format!(
        r#"<html lang="{}">"#,
        escape_html(&config.base.language)
    ));
    push_head(&mut html, page, config);
    html.push_str("<body>");
    push_nav(&mut html);
    html.push_str("<main>");
    html.push_str(&page.body);
    html.push_str("</main>");
    push_footer(&mut html, config, year);
    html.push_str("</body></html>");

    html
}

fn push_head(html: &mut String, page: &Page, config: &SiteConfig) {
    let base = &config.base;
    let title = match &page.title {
        Some(title) => format!("{title} | {}", base.title),
        None => base.title.clone(),
    };
    let description = page.description.as_deref().unwrap_or(&base.description);

    html.push_str("<head>");
    html.push_str(r#"<meta charset="utf-8">"#);
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    html.push_str(&format!("<title>{}</title>", escape_html(&title)));

    push_meta(html, "name", "robots", "follow, index");
    push_meta(html, "name", "description", description);
    push_meta(html, "property", "og:site_name", base.site_name());
    push_meta(html, "property", "og:description", description);
    push_meta(html, "property", "og:title", &base.title);
    if let Some(image) = page.image.as_ref().or(base.image.as_ref()) {
        push_meta(html, "property", "og:image", image);
    }
    if let Some(twitter) = &base.twitter {
        push_meta(html, "name", "twitter:site", twitter);
    }

    html.push_str(r#"<link rel="stylesheet" href="/style.css">"#);
    if config.build.rss.enable {
        let href = config
            .build
            .rss
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rss.xml".into());
        html.push_str(&format!(
            r#"<link rel="alternate" type="application/rss+xml" title="{}" href="/{}">"#,
            escape_html(&base.title),
            escape_html(&href)
        ));
    }
    html.push_str("</head>");
}

fn push_meta(html: &mut String, attr: &str, key: &str, content: &str) {
    html.push_str(&format!(
        r#"<meta {attr}="{key}" content="{}">"#,
        escape_html(content)
    ));
}

fn push_nav(html: &mut String) {
    html.push_str("<nav>");
    for (label, href) in NAV {
        html.push_str(&format!(r#"<a href="{href}">{label}</a>"#));
    }
    html.push_str("</nav>");
}

/// Theme footer: `<time>YEAR</time> © AUTHOR.` then the external links.
fn push_footer(html: &mut String, config: &SiteConfig, year: i32) {
    html.push_str("<footer><p>");
    html.push_str(&format!(
        "<time>{year}</time> © {}.",
        escape_html(&config.base.author)
    ));
    for link in &config.footer.links {
        html.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_html(&link.url),
            escape_html(&link.name)
        ));
    }
    html.push_str("</p></footer>");
}
