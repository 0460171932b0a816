//! Site configuration management for `notes.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[base]`         | Site metadata (title, author, url, og image)   |
//! | `[home]`         | Landing page heading and intro                 |
//! | `[build]`        | Paths, minify, rss, sitemap                    |
//! | `[serve]`        | Preview server (port, interface, watch)        |
//! | `[footer]`       | Theme footer links                             |
//! | `[[projects]]`   | Project list (replaces the built-in one)       |
//! | `[[bookmarks]]`  | Bookmark list                                  |
//! | `[extra]`        | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Notes"
//! url = "https://notes.example.com"
//!
//! [build]
//! output = "public"
//!
//! [[bookmarks]]
//! title = "The Rust Book"
//! url = "https://doc.rust-lang.org/book/"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod serve;
mod site;

pub use error::ConfigError;
pub use site::FooterLink;

use base::BaseConfig;
use build::BuildConfig;
use serve::ServeConfig;
use site::{FooterConfig, HomeConfig};

use crate::{
    cli::{Cli, Commands},
    content::ContentItem,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing notes.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Landing page text
    #[serde(default)]
    pub home: HomeConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Theme footer
    #[serde(default)]
    pub footer: FooterConfig,

    /// Projects, in display order
    #[serde(default = "defaults::content::projects")]
    #[educe(Default = defaults::content::projects())]
    pub projects: Vec<ContentItem>,

    /// Bookmarks, in display order
    #[serde(default = "defaults::content::bookmarks")]
    #[educe(Default = defaults::content::bookmarks())]
    pub bookmarks: Vec<ContentItem>,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.update_path_with_root(&root, cli);

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.rss.enable, args.rss.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            Self::update_option(&mut self.base.url, args.base_url.as_ref());
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            // Provisional until the server binds, see `serve_at`.
            self.base.url = format!("http://{}:{}", self.serve.interface, self.serve.port);
        }
    }

    /// Point the site at the address the preview server actually bound.
    ///
    /// The port may differ from the configured one when it was taken.
    pub fn serve_at(&mut self, addr: SocketAddr) {
        self.serve.port = addr.port();
        self.base.url = format!("http://{addr}");
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        // Apply CLI overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.rss.path = self.build.output.join(&self.build.rss.path);
        self.build.sitemap.path = self.build.output.join(&self.build.sitemap.path);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for a build/serve run.
    ///
    /// The base URL is not checked: sitemap entries are built
    /// from it verbatim.
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!(ConfigError::NotFound(self.config_path.clone()));
        }

        if self.build.rss.enable && self.base.url.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[base.url] is required for rss generation".into()
            ));
        }

        let output = &self.build.output;
        let overlaps = [self.get_root(), &self.build.content, &self.build.assets]
            .into_iter()
            .any(|dir| dir.starts_with(output));
        if overlaps {
            bail!(ConfigError::Validation(
                "[build.output] must not contain the project root, content or assets".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("notes").chain(args.iter().copied()))
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str(
            r#"
            [base]
            title = "My Notes"
            author = "Test Author"

            [[projects]]
            title = "Pilot"
            url = "https://github.com/Thieurom/Pilot"
            "#,
        )
        .unwrap();

        assert_eq!(config.base.title, "My Notes");
        assert_eq!(config.base.author, "Test Author");
        assert_eq!(config.projects.len(), 1);
        assert!(config.bookmarks.is_empty());
    }

    #[test]
    fn test_default_projects_are_builtin() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.projects.len(), 8);
        assert_eq!(config.projects[0].title, "DevSettings");
        assert_eq!(config.projects[7].title, "BlocksApp");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[base\ntitle = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_fields() {
        let config = SiteConfig::from_str(
            r#"
            [extra]
            analytics = "G-123"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.extra.get("analytics").and_then(|v| v.as_str()),
            Some("G-123")
        );
    }

    #[test]
    fn test_default_config_serializes_back() {
        let text = toml::to_string_pretty(&SiteConfig::default()).unwrap();
        let config = SiteConfig::from_str(&text).unwrap();
        assert_eq!(config.projects, SiteConfig::default().projects);
        assert_eq!(config.build.sitemap.routes, vec!["", "/posts"]);
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_update_with_cli_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "-o", "dist", "build"]));

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.output, root.join("dist"));
        assert_eq!(config.build.content, root.join("content"));
        assert_eq!(config.build.sitemap.path, root.join("dist/sitemap.xml"));
        assert_eq!(config.build.rss.path, root.join("dist/rss.xml"));
        assert_eq!(config.config_path, root.join("notes.toml"));
    }

    #[test]
    fn test_update_with_cli_build_args() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&[
            "build",
            "--clean",
            "--minify=false",
            "--sitemap=false",
            "--base-url",
            "https://preview.example.com",
        ]));

        assert!(config.build.clean);
        assert!(!config.build.minify);
        assert!(!config.build.sitemap.enable);
        assert!(config.build.rss.enable);
        assert_eq!(config.base.url, "https://preview.example.com");
    }

    #[test]
    fn test_update_with_cli_serve_rewrites_url() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["serve", "-p", "8000", "-i", "0.0.0.0"]));

        assert_eq!(config.serve.port, 8000);
        assert_eq!(config.base.url, "http://0.0.0.0:8000");
    }

    #[test]
    fn test_serve_at_replaces_port_and_url() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["serve", "-p", "8000", "-i", "127.0.0.1"]));
        config.serve_at("127.0.0.1:8003".parse().unwrap());

        assert_eq!(config.serve.port, 8003);
        assert_eq!(config.base.url, "http://127.0.0.1:8003");
    }

    #[test]
    fn test_update_with_cli_init_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "init", "blog"]));

        // Not created yet, so kept as given rather than canonicalized
        assert_eq!(config.get_root(), dir.path().join("blog"));
    }

    #[test]
    fn test_validate_missing_config() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", dir.path().to_str().unwrap(), "build"]));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validate_ok_and_output_overlap() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.toml"), "").unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "build"]));
        assert!(config.validate().is_ok());

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "-o", ".", "build"]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rss_needs_url() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.toml"), "").unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "build", "--base-url", ""]));
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "build", "--base-url", "", "--rss=false"]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_malformed_url() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.toml"), "").unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&[
            "--root",
            dir.path().to_str().unwrap(),
            "build",
            "--base-url",
            "not a url",
        ]));
        assert!(config.validate().is_ok());
    }
}
