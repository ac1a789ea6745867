//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Request, State};
use axum::http::Uri;
use axum::middleware;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::{project_root, ConfigFile};

/// A built site being served.
struct ServedSite {
    dir: PathBuf,
    base_url: String,
}

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>, open: bool) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;
    let base_url = file_config.routes().base();
    let dir = dir.unwrap_or_else(|| project_root(config_path).join(&file_config.docs.output));

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'quire build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!("Serving {} at http://{}{}", dir.display(), addr, base_url);

    let site = Arc::new(ServedSite {
        dir: dir.clone(),
        base_url: base_url.clone(),
    });
    let files = ServeDir::new(&dir).not_found_service(ServeFile::new(dir.join("404.html")));
    let app = Router::new()
        .fallback_service(files)
        .layer(middleware::map_request_with_state(site, rewrite_uri));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    if open {
        let url = format!("http://{}{}", addr, base_url);
        if let Err(e) = open::that(&url) {
            tracing::debug!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}

async fn rewrite_uri(State(site): State<Arc<ServedSite>>, mut request: Request) -> Request {
    if let Some(path) = resolve_path(&site.base_url, &site.dir, request.uri().path()) {
        if let Ok(uri) = path.parse::<Uri>() {
            *request.uri_mut() = uri;
        }
    }
    request
}

/// Map a request path under the base URL to a path inside the output
/// directory. Extensionless page URLs resolve to their `.html` file.
fn resolve_path(base_url: &str, dir: &Path, path: &str) -> Option<String> {
    let relative = path.strip_prefix(base_url.trim_end_matches('/'))?;
    if !relative.is_empty() && !relative.starts_with('/') {
        return None;
    }

    let relative = if relative.is_empty() { "/" } else { relative };
    let file = relative.trim_start_matches('/');

    let is_page = !file.is_empty()
        && !relative.ends_with('/')
        && Path::new(file).extension().is_none()
        && dir.join(format!("{}.html", file)).is_file();

    if is_page {
        Some(format!("{}.html", relative))
    } else {
        Some(relative.to_string())
    }
}
