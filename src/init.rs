//! Site initialization module.
//!
//! Creates a new site with the default configuration and a first post.

use crate::{config::SiteConfig, content::POSTS_DIR, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// First post of a fresh site
const HELLO_POST: &str = "---
title: 'Hello, world'
publishedAt: '{date}'
summary: 'The first note.'
---

Welcome to your notes. Edit `content/posts/hello.md` and run `notes serve`.
";

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Init in the current directory only when it is completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!("Current directory is not empty. Use `notes init <SITE_NAME>` to create in a subdirectory.");
    }

    init_site_structure(config)?;
    init_default_config(&config.config_path)?;
    init_first_post(&config.build.content)?;
    init_ignored_files(root, &[config.build.output.as_path()])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Create content, posts and assets directories
fn init_site_structure(config: &SiteConfig) -> Result<()> {
    let build = &config.build;
    for path in [&build.content.join(POSTS_DIR), &build.assets] {
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `notes init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(path).with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

fn init_first_post(content: &Path) -> Result<()> {
    let path = content.join(POSTS_DIR).join("hello.md");
    let post = HELLO_POST.replace("{date}", &crate::utils::date::today_ymd());
    fs::write(&path, post).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with the given paths, relative to root
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p))
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}\n"))
        .collect::<String>();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::Cli,
        content::{DirPostSource, PostSource},
    };
    use clap::Parser;
    use tempfile::TempDir;

    fn init_config(root: &Path, name: Option<&str>) -> SiteConfig {
        let mut args = vec!["notes", "--root", root.to_str().unwrap(), "init"];
        args.extend(name);
        let mut config = SiteConfig::default();
        config.update_with_cli(&Cli::parse_from(args));
        config
    }

    #[test]
    fn test_new_site_with_name() {
        let dir = TempDir::new().unwrap();
        let config = init_config(dir.path(), Some("blog"));
        new_site(&config, true).unwrap();

        let site = dir.path().join("blog");
        assert!(site.join("notes.toml").is_file());
        assert!(site.join("assets").is_dir());
        assert_eq!(fs::read_to_string(site.join(".gitignore")).unwrap(), "/public\n");

        let loaded = SiteConfig::from_path(&site.join("notes.toml")).unwrap();
        assert_eq!(loaded.base.title, SiteConfig::default().base.title);
        assert_eq!(loaded.projects.len(), 8);

        let posts = DirPostSource::new(site.join("content/posts")).posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello");
        assert_eq!(posts[0].metadata.title, "Hello, world");
    }

    #[test]
    fn test_new_site_in_empty_dir() {
        let dir = TempDir::new().unwrap();
        let config = init_config(dir.path(), None);
        new_site(&config, false).unwrap();
        assert!(dir.path().join("notes.toml").is_file());
    }

    #[test]
    fn test_new_site_rejects_non_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "hi").unwrap();
        let config = init_config(dir.path(), None);

        let err = new_site(&config, false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_existing_content_dir_fails() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog/content/posts")).unwrap();
        let config = init_config(dir.path(), Some("blog"));

        assert!(new_site(&config, true).is_err());
    }
}
