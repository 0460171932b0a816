//! File system watcher for live rebuild.
//!
//! Monitors the content and asset directories and the config file, and
//! rebuilds the whole site once a burst of changes settles.
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► handle_changes() ──► build_all()
//! ```
//!
//! A config change reloads `notes.toml` before rebuilding. The server keeps
//! serving the output directory it started with.

use crate::{
    build::build_all,
    cli::Cli,
    config::SiteConfig,
    load_config, log,
    logger::log_rebuild,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// What a changed path means for the rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Config,
    Source,
    Ignored,
}

fn categorize_path(path: &Path, config: &SiteConfig) -> Change {
    let build = &config.build;
    if path == config.config_path {
        Change::Config
    } else if path.starts_with(&build.output) {
        // Output may sit inside a watched dir; never rebuild on our own writes.
        Change::Ignored
    } else if path.starts_with(&build.content) || path.starts_with(&build.assets) {
        Change::Source
    } else {
        Change::Ignored
    }
}

/// `/proj/content/posts/a.md` → `content/posts/a.md`
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<_> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Rebuild for a batch of changed paths. Returns true if a rebuild ran.
fn handle_changes(paths: &[PathBuf], config: &mut SiteConfig, cli: &Cli) -> bool {
    let mut config_changed = false;
    let mut sources = Vec::new();

    for path in paths {
        match categorize_path(path, config) {
            Change::Config => config_changed = true,
            Change::Source => sources.push(path),
            Change::Ignored => {}
        }
    }

    if config_changed {
        match load_config(cli) {
            Ok(mut reloaded) => {
                // The server stays on the address it bound at startup.
                if cli.is_serve() {
                    reloaded.serve = config.serve.clone();
                    reloaded.base.url = config.base.url.clone();
                }
                *config = reloaded;
            }
            Err(e) => {
                log_rebuild(false, "config reload failed");
                log!("error"; "{e:#}");
                return true;
            }
        }
    } else if sources.is_empty() {
        return false;
    }

    let root = config.get_root();
    let trigger = if config_changed {
        rel_path(&config.config_path, root)
    } else {
        match sources.as_slice() {
            [one] => rel_path(one, root),
            many => format!("{} files", many.len()),
        }
    };

    match build_all(config) {
        Ok(()) => log_rebuild(true, &format!("rebuilt ({trigger})")),
        Err(e) => {
            log_rebuild(false, &format!("build failed ({trigger})"));
            log!("error"; "{e:#}");
        }
    }
    true
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let build = &config.build;
    let targets = [
        (&build.content, RecursiveMode::Recursive),
        (&build.assets, RecursiveMode::Recursive),
        (&config.config_path, RecursiveMode::NonRecursive),
    ];

    let mut watched = Vec::new();
    for (path, mode) in targets {
        if path.exists() {
            watcher
                .watch(path, mode)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
            watched.push(rel_path(path, config.get_root()));
        }
    }

    log!("watch"; "{}", watched.join(", "));
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking(config: &SiteConfig, cli: &Cli) -> Result<()> {
    let mut config = config.clone();

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &config)?;

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut config, cli) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            // Irrelevant events, timeout with nothing pending
            _ => {}
        }
    }

    Ok(())
}
