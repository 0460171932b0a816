//! Page assemblers: heading text plus one or more list renderers.

use super::{Page, escape_html, lists, markdown_to_html};
use crate::{
    config::SiteConfig,
    content::{ContentItem, Post},
    utils::date::format_long,
};

/// Wrap a heading and content in the common page section.
fn section(heading: &str, content: &str) -> String {
    format!(
        r#"<section><h1 class="title">{}</h1>{content}</section>"#,
        escape_html(heading)
    )
}

/// `/` - greeting and intro line.
pub fn home_page(config: &SiteConfig) -> Page {
    let intro = format!(r#"<p class="intro">{}</p>"#, escape_html(&config.home.intro));
    Page {
        route: String::new(),
        title: None,
        description: None,
        image: None,
        body: section(&config.home.heading, &intro),
    }
}

/// `/posts` - every post, newest first.
pub fn posts_page(posts: &[Post]) -> Page {
    let list = format!(r#"<div class="list">{}</div>"#, lists::render_posts(posts));
    Page {
        route: "/posts".into(),
        title: Some("Notes".into()),
        description: None,
        image: None,
        body: section("Notes", &list),
    }
}

/// `/posts/<slug>` - a single post.
pub fn post_page(post: &Post) -> Page {
    let meta = &post.metadata;
    let mut body = String::from("<section>");
    body.push_str(&format!(
        r#"<h1 class="title">{}</h1>"#,
        escape_html(&meta.title)
    ));
    body.push_str(&format!(
        r#"<p class="post-date"><time datetime="{}">{}</time></p>"#,
        escape_html(&meta.published_at),
        escape_html(&format_long(&meta.published_at))
    ));
    body.push_str(r#"<article class="prose">"#);
    body.push_str(&markdown_to_html(&post.content));
    body.push_str("</article></section>");

    Page {
        route: post.url_path(),
        title: Some(meta.title.clone()),
        description: meta.summary.clone(),
        image: meta.image.clone(),
        body,
    }
}

/// `/projects` - the project list.
pub fn projects_page(projects: &[ContentItem]) -> Page {
    let list = format!(r#"<div class="list">{}</div>"#, lists::render_projects(projects));
    Page {
        route: "/projects".into(),
        title: Some("Projects".into()),
        description: None,
        image: None,
        body: section("Projects", &list),
    }
}

/// `/bookmarks` - the bookmark list.
pub fn bookmarks_page(bookmarks: &[ContentItem]) -> Page {
    let list = format!(r#"<div class="list">{}</div>"#, lists::render_bookmarks(bookmarks));
    Page {
        route: "/bookmarks".into(),
        title: Some("Bookmarks".into()),
        description: None,
        image: None,
        body: section("Bookmarks", &list),
    }
}
