//! File-backed posts.
//!
//! Each `*.md` / `*.mdx` file directly under `<content>/posts/` is one post;
//! its file stem is the slug. A post starts with a frontmatter block:
//!
//! ```text
//! ---
//! title: 'Hello, world'
//! publishedAt: 2024-01-01
//! summary: First note.
//! ---
//! Body in **markdown**.
//! ```

use crate::{config::SiteConfig, utils::date::parse_published};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory under `[build].content` holding posts.
pub const POSTS_DIR: &str = "posts";

/// Extensions recognised as posts
const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\s*---\s*([\s\S]*?)\s*---").unwrap());

/// Errors raised while loading posts.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to list posts")]
    Walk(#[from] walkdir::Error),

    #[error("`{0}` has no frontmatter block")]
    MissingFrontmatter(PathBuf),

    #[error("`{path}` is missing frontmatter field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("slug `{slug}` is used by both `{}` and `{}`", .paths.0.display(), .paths.1.display())]
    DuplicateSlug {
        slug: String,
        paths: (PathBuf, PathBuf),
    },

    #[error("`{0}` does not give a usable slug")]
    InvalidSlug(PathBuf),
}

/// Frontmatter of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMetadata {
    pub title: String,
    /// Raw `publishedAt` value, never reformatted.
    pub published_at: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    /// Any other `key: value` pairs, in file order.
    pub extra: Vec<(String, String)>,
}

/// A single post record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub metadata: PostMetadata,
    /// Markdown body with the frontmatter stripped.
    pub content: String,
}

impl Post {
    /// Parse a post from its file contents.
    ///
    /// `path` is only used for error messages.
    pub fn parse(slug: &str, source: &str, path: &Path) -> Result<Self, PostError> {
        let caps = FRONTMATTER
            .captures(source)
            .ok_or_else(|| PostError::MissingFrontmatter(path.to_path_buf()))?;
        let block = caps.get(1).map_or("", |m| m.as_str());
        let body_start = caps.get(0).map_or(0, |m| m.end());

        let mut title = None;
        let mut published_at = None;
        let mut metadata = PostMetadata::default();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = unquote(value.trim()).to_owned();
            match key {
                "title" => title = Some(value),
                "publishedAt" => published_at = Some(value),
                "summary" => metadata.summary = Some(value),
                "image" => metadata.image = Some(value),
                "" => {}
                _ => metadata.extra.push((key.to_owned(), value)),
            }
        }

        let missing = |field| PostError::MissingField {
            path: path.to_path_buf(),
            field,
        };
        metadata.title = title.ok_or_else(|| missing("title"))?;
        metadata.published_at = published_at.ok_or_else(|| missing("publishedAt"))?;

        Ok(Self {
            slug: slug.to_owned(),
            metadata,
            content: source[body_start..].trim().to_owned(),
        })
    }

    /// Site-relative URL path of the post page.
    pub fn url_path(&self) -> String {
        format!("/{POSTS_DIR}/{}", self.slug)
    }
}

/// Strip one pair of surrounding `'` or `"` quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    match bytes {
        [b'\'' | b'"', .., b'\'' | b'"'] => &value[1..value.len() - 1],
        _ => value,
    }
}

/// Sort posts by publish date, newest first.
///
/// Posts with unparseable dates go last; ties keep their order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let a = parse_published(&a.metadata.published_at);
        let b = parse_published(&b.metadata.published_at);
        match (a, b) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

// ============================================================================
// Post Sources
// ============================================================================

/// Anything that can list the site's posts.
///
/// Called once per build; implementations must not cache across calls.
pub trait PostSource {
    fn posts(&self) -> Result<Vec<Post>, PostError>;
}

impl PostSource for Vec<Post> {
    fn posts(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.clone())
    }
}

/// Reads posts from a directory, in file-name order.
#[derive(Debug, Clone)]
pub struct DirPostSource {
    dir: PathBuf,
}

impl DirPostSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<content>/posts` of the given site.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.build.content.join(POSTS_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PostSource for DirPostSource {
    fn posts(&self) -> Result<Vec<Post>, PostError> {
        let mut posts = Vec::new();
        let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            let is_post = entry.file_type().is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| POST_EXTENSIONS.contains(&ext));
            if !is_post {
                continue;
            }

            let slug = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            if matches!(slug.as_str(), "" | "." | "..") {
                return Err(PostError::InvalidSlug(path.to_path_buf()));
            }
            if let Some(first) = seen.insert(slug.clone(), path.to_path_buf()) {
                return Err(PostError::DuplicateSlug {
                    slug,
                    paths: (first, path.to_path_buf()),
                });
            }

            let source =
                fs::read_to_string(path).map_err(|err| PostError::Io(path.to_path_buf(), err))?;
            posts.push(Post::parse(&slug, &source, path)?);
        }

        Ok(posts)
    }
}
