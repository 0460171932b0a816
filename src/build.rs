//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_all()
//!     │
//!     ├── prepare_output()  ──► clean / create output dir
//!     ├── load_posts()      ──► DirPostSource, read fresh every build
//!     │
//!     ├── rayon::join
//!     │     ├── build_site()  ──► pages, style.css, assets
//!     │     └── build_rss()
//!     │
//!     └── build_sitemap()
//! ```

use crate::{
    config::SiteConfig,
    content::{DirPostSource, Post, PostSource},
    generator::{build_rss, build_sitemap},
    log,
    render::{
        Page, bookmarks_page, home_page, post_page, posts_page, projects_page, render_document,
    },
    utils::{
        date::current_year,
        minify::compact_page,
    },
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Stylesheet written to the output root (embedded at compile time)
const STYLESHEET: &str = include_str!("embed/style.css");

/// Build everything: pages, assets, rss and sitemap.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_all(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let posts = load_posts(config)?;

    let (site_result, rss_result) = rayon::join(
        || build_site(config, &posts),
        || build_rss(config, &posts),
    );
    rss_result?;
    let stats = site_result?;

    build_sitemap(config, &posts)?;

    log_build_result(output, &stats)
}

/// Counts reported after a build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub pages: usize,
    pub posts: usize,
    pub assets: usize,
}

/// Render every page and copy static files into the output directory.
pub fn build_site(config: &SiteConfig, posts: &[Post]) -> Result<BuildStats> {
    let year = current_year();

    let mut pages = vec![
        home_page(config),
        posts_page(posts),
        projects_page(&config.projects),
        bookmarks_page(&config.bookmarks),
    ];
    pages.par_extend(posts.par_iter().map(post_page));

    pages
        .par_iter()
        .try_for_each(|page| write_page(page, config, year))?;

    write_stylesheet(config)?;
    let assets = copy_assets(config)?;

    Ok(BuildStats {
        pages: pages.len(),
        posts: posts.len(),
        assets,
    })
}

/// Read posts from `<content>/posts`.
///
/// A missing posts directory means no posts yet, not an error.
fn load_posts(config: &SiteConfig) -> Result<Vec<Post>> {
    let source = DirPostSource::from_config(config);
    if !source.dir().exists() {
        log!("warn"; "no posts directory at {}", source.dir().display());
        return Ok(Vec::new());
    }
    source
        .posts()
        .with_context(|| format!("Failed to load posts from {}", source.dir().display()))
}

/// Create the output directory, removing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// `output/<route>/index.html`
fn page_output_path(output: &Path, route: &str) -> PathBuf {
    output
        .join(route.trim_start_matches('/'))
        .join("index.html")
}

fn write_page(page: &Page, config: &SiteConfig, year: i32) -> Result<()> {
    let path = page_output_path(&config.build.output, &page.route);
    let html = render_document(page, config, year);
    let html = compact_page(&html, config);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &*html).with_context(|| format!("Failed to write {}", path.display()))
}

fn write_stylesheet(config: &SiteConfig) -> Result<()> {
    let path = config.build.output.join("style.css");
    fs::write(&path, STYLESHEET).with_context(|| format!("Failed to write {}", path.display()))
}

/// Copy every file under `[build].assets` into the output root.
fn copy_assets(config: &SiteConfig) -> Result<usize> {
    let assets = &config.build.assets;
    if !assets.exists() {
        return Ok(0);
    }

    let files: Vec<PathBuf> = WalkDir::new(assets)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.par_iter().try_for_each(|source| {
        let relative = source.strip_prefix(assets)?;
        let dest = config.build.output.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &dest)
            .with_context(|| format!("Failed to copy asset {}", relative.display()))?;
        Ok::<_, anyhow::Error>(())
    })?;

    Ok(files.len())
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path, stats: &BuildStats) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty");
    } else {
        log!(
            "build";
            "{} pages ({} posts), {} assets",
            stats.pages,
            stats.posts,
            stats.assets
        );
    }

    Ok(())
}
