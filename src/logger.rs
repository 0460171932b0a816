//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("build"; "wrote {} pages", count);
//! log!("error"; "{:#}", err);
//! ```
//!
//! `error` and `warn` lines go to stderr and are never silenced; everything
//! else goes to stdout and is dropped in quiet mode.

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stderr, stdout},
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Suppress non-error output
static QUIET: AtomicBool = AtomicBool::new(false);

/// Length of brackets around module name plus the trailing space: "[] "
const PREFIX_OVERHEAD: usize = 3;

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Enable or disable quiet mode.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

/// Whether a module's lines belong on stderr.
fn is_diagnostic(module_lower: &str) -> bool {
    matches!(module_lower, "error" | "warn")
}

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to the terminal width; multiline
/// messages (error chains) are printed as-is.
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let diagnostic = is_diagnostic(&module_lower);
    if !diagnostic && QUIET.load(Ordering::Relaxed) {
        return;
    }

    let prefix = colorize_prefix(module, &module_lower);
    let message = if message.contains('\n') {
        message
    } else {
        let max_msg_len = (get_terminal_width() as usize).saturating_sub(module.len() + PREFIX_OVERHEAD);
        truncate_str(message, max_msg_len)
    };

    if diagnostic {
        let mut out = stderr().lock();
        writeln!(out, "{prefix} {message}").ok();
        out.flush().ok();
    } else {
        let mut out = stdout().lock();
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
        writeln!(out, "{prefix} {message}").ok();
        out.flush().ok();
    }
}

/// Log the outcome of a watch-triggered rebuild with a local timestamp.
pub fn log_rebuild(ok: bool, message: &str) {
    let timestamp = format!("[{}]", chrono::Local::now().format("%H:%M:%S")).dimmed();
    let symbol = if ok { "✓".green() } else { "✗".red() };
    log("watch", &format!("{timestamp} {symbol} {message}"));
}

/// Apply color to a module prefix based on module type.
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
