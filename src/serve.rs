//! Local preview server.
//!
//! Serves the build output over HTTP with `tiny_http`:
//!
//! - Static file serving from the build output directory
//! - Automatic `index.html` resolution for directories
//! - File watching and auto-rebuild (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Serve files             Rebuild on change
//!          │                       │
//!          └───────────┬───────────┘
//!                      ▼
//!              config.build.output
//! ```

use crate::{build::build_all, cli::Cli, config::SiteConfig, log, watch::watch_for_changes_blocking};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the preview server with optional file watching.
///
/// Binds to the configured interface and port (retrying on conflict), builds
/// the site against the bound address, then blocks handling requests until
/// Ctrl+C is received.
pub fn serve_site(config: &SiteConfig, cli: &'static Cli) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let mut served = config.clone();
    served.serve_at(addr);
    let config: &'static SiteConfig = Box::leak(Box::new(served));
    build_all(config)?;

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if config.serve.watch {
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking(config, cli) {
                log!("error"; "watch: {err:#}");
            }
        });
    }

    // Handle requests in main thread (blocks until Ctrl+C)
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &config.build.output) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, serve_root: &Path) -> Result<()> {
    match resolve_path(serve_root, request.url()) {
        Some(path) => serve_file(request, &path),
        None => serve_not_found(request),
    }
}

/// Map a request URL to a file under `serve_root`.
///
/// Resolution order:
/// 1. Exact file match
/// 2. Directory with index.html
/// 3. Nothing found (or the path escapes the root) → `None`
fn resolve_path(serve_root: &Path, url: &str) -> Option<PathBuf> {
    // Strip query string (e.g. ?t=123) before decoding
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = urlencoding::decode(path).ok()?;
    let request_path = Path::new(decoded.trim_matches('/'));

    let escapes = request_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return None;
    }

    let local_path = serve_root.join(request_path);
    if local_path.is_file() {
        return Some(local_path);
    }

    let index_path = local_path.join("index.html");
    index_path.is_file().then_some(index_path)
}

// ============================================================================
// Response Helpers
// ============================================================================

fn content_type_header(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("invalid header value `{value}`"))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(content).with_header(content_type_header(guess_content_type(path))?);

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type_header("text/plain; charset=utf-8")?],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_output() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("index.html"), "home").unwrap();
        fs::write(root.join("style.css"), "body{}").unwrap();
        fs::create_dir_all(root.join("posts/hello world")).unwrap();
        fs::write(root.join("posts/hello world/index.html"), "post").unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        dir
    }

    #[test]
    fn test_resolve_index() {
        let dir = make_output();
        let root = dir.path();

        assert_eq!(resolve_path(root, "/"), Some(root.join("index.html")));
        assert_eq!(
            resolve_path(root, "/posts/hello%20world"),
            Some(root.join("posts/hello world/index.html"))
        );
        assert_eq!(
            resolve_path(root, "/posts/hello%20world/"),
            Some(root.join("posts/hello world/index.html"))
        );
    }

    #[test]
    fn test_resolve_file_with_query() {
        let dir = make_output();
        let root = dir.path();
        assert_eq!(resolve_path(root, "/style.css?t=1"), Some(root.join("style.css")));
    }

    #[test]
    fn test_resolve_not_found() {
        let dir = make_output();
        let root = dir.path();
        assert_eq!(resolve_path(root, "/missing"), None);
        assert_eq!(resolve_path(root, "/empty"), None);
    }

    #[test]
    fn test_resolve_rejects_parent_dirs() {
        let dir = make_output();
        let inner = dir.path().join("posts");
        assert_eq!(resolve_path(&inner, "/../index.html"), None);
        assert_eq!(resolve_path(&inner, "/%2E%2E/index.html"), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.html")), "text/html; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("rss.xml")), "application/xml; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("logo.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn test_site_url_follows_fallback_port() {
        let taken = Server::http("127.0.0.1:0").unwrap();
        let busy = taken.server_addr().to_ip().unwrap().port();

        let (_server, addr) = try_bind_port("127.0.0.1".parse().unwrap(), busy, MAX_PORT_RETRIES).unwrap();
        assert_ne!(addr.port(), busy);

        let mut config = SiteConfig::default();
        config.serve.port = busy;
        config.serve_at(addr);
        assert_eq!(config.base.url, format!("http://127.0.0.1:{}", addr.port()));
    }

    #[test]
    fn test_content_type_header() {
        assert!(content_type_header("text/css").is_ok());
    }
}
