//! List renderers: one entry per item, in input order.
//!
//! Entries carry `data-key` with their position in the list. The lists are
//! fixed for the lifetime of a build, so position is a stable key.

use super::escape_html;
use crate::{
    content::{ContentItem, Post, sort_newest_first},
    utils::date::format_long,
};

/// Attributes for links that leave the site.
const EXTERNAL: &str = r#"rel="noopener noreferrer" target="_blank""#;

/// Render the projects list.
///
/// ```html
/// <div class="projects">
///   <a data-key="0" class="project" href="…" rel="noopener noreferrer" target="_blank">
///     <div class="row"><p class="project-title">…</p><p class="project-description">…</p></div>
///   </a>
/// </div>
/// ```
pub fn render_projects(projects: &[ContentItem]) -> String {
    let mut html = String::from(r#"<div class="projects">"#);

    for (index, project) in projects.iter().enumerate() {
        html.push_str(&format!(
            r#"<a data-key="{index}" class="project" href="{}" {EXTERNAL}>"#,
            escape_html(&project.url)
        ));
        html.push_str(r#"<div class="row">"#);
        html.push_str(&format!(
            r#"<p class="project-title">{}</p>"#,
            escape_html(&project.title)
        ));
        html.push_str(&format!(
            r#"<p class="project-description">{}</p>"#,
            escape_html(project.description.as_deref().unwrap_or_default())
        ));
        html.push_str("</div></a>");
    }

    html.push_str("</div>");
    html
}

/// Render the bookmarks list as a bulleted list of external links.
pub fn render_bookmarks(bookmarks: &[ContentItem]) -> String {
    let mut html = String::from(r#"<ul class="bookmarks">"#);

    for (index, bookmark) in bookmarks.iter().enumerate() {
        html.push_str(&format!(
            r#"<li data-key="{index}"><a href="{}" {EXTERNAL}><p class="bookmark-title">{}</p></a></li>"#,
            escape_html(&bookmark.url),
            escape_html(&bookmark.title)
        ));
    }

    html.push_str("</ul>");
    html
}

/// Render the posts list, newest first, linking to each post page.
pub fn render_posts(posts: &[Post]) -> String {
    let mut sorted = posts.to_vec();
    sort_newest_first(&mut sorted);

    let mut html = String::from(r#"<div class="posts">"#);

    for (index, post) in sorted.iter().enumerate() {
        let href = format!("/posts/{}", urlencoding::encode(&post.slug));
        html.push_str(&format!(
            r#"<a data-key="{index}" class="post-link" href="{}">"#,
            escape_html(&href)
        ));
        html.push_str(r#"<div class="row">"#);
        html.push_str(&format!(
            r#"<p class="post-date">{}</p>"#,
            escape_html(&format_long(&post.metadata.published_at))
        ));
        html.push_str(&format!(
            r#"<p class="post-title">{}</p>"#,
            escape_html(&post.metadata.title)
        ));
        html.push_str("</div></a>");
    }

    html.push_str("</div>");
    html
}
