//! Notes - a static site generator for a personal portfolio and blog.

mod build;
mod cli;
mod config;
mod content;
mod generator;
mod init;
mod logger;
mod render;
mod serve;
mod utils;
mod watch;

use anyhow::{Result, bail};
use build::build_all;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use serve::serve_site;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        log!("error"; "{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    logger::set_quiet(cli.quiet);
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init { name } => new_site(config, name.is_some()),
        Commands::Build { .. } => build_all(config),
        Commands::Serve { .. } => serve_site(config, cli),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
