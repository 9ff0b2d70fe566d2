//! Preview server
//!
//! Renders pages on request so edits show up on refresh, with no build
//! step in between. Unpublished pages are served here (preview is for
//! seeing unfinished work); skipped paths are not.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::{PlinthError, PlinthResult};
use crate::render::{render, RenderOutput};

struct ServeState {
    root: PathBuf,
}

/// Serve the site from `root` on `127.0.0.1:port` until Ctrl-C.
pub async fn serve(root: PathBuf, port: u16) -> PlinthResult<()> {
    let state = Arc::new(ServeState { root: root.clone() });

    let app = Router::new()
        .fallback(serve_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("serving {} on http://{}", root.display(), addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}

async fn serve_page(State(state): State<Arc<ServeState>>, uri: Uri) -> Response {
    let request_path = uri.path().to_string();
    let root = state.root.clone();

    // Rendering is synchronous file IO; keep it off the async workers.
    match tokio::task::spawn_blocking(move || resolve_request(&root, &request_path)).await {
        Ok(resolved) => resolved.into_response(),
        Err(e) => {
            tracing::error!("render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

/// What a request resolved to, before HTTP dressing
#[derive(Debug)]
enum ResolvedPage {
    Html(String),
    Raw(Vec<u8>, &'static str),
    NotFound,
    Error(String),
}

impl IntoResponse for ResolvedPage {
    fn into_response(self) -> Response {
        match self {
            ResolvedPage::Html(html) => Html(html).into_response(),
            ResolvedPage::Raw(bytes, content_type) => {
                ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
            }
            ResolvedPage::NotFound => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
            ResolvedPage::Error(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

fn resolve_request(root: &Path, request_path: &str) -> ResolvedPage {
    let source = source_for_request(root, request_path);
    match render(&source, root) {
        Ok(RenderOutput::Rendered(_, html)) | Ok(RenderOutput::Hidden(_, html)) => {
            ResolvedPage::Html(html)
        }
        Ok(RenderOutput::RawFile(path)) => match std::fs::read(root.join(&path)) {
            Ok(bytes) => ResolvedPage::Raw(bytes, content_type_for(&path)),
            Err(_) => ResolvedPage::NotFound,
        },
        Ok(RenderOutput::NoOutput) | Ok(RenderOutput::Dir(_)) => ResolvedPage::NotFound,
        // A page that is not there is a 404; a page that will not render
        // is a 500 with the reason in the body.
        Err(PlinthError::FileRead { .. }) => ResolvedPage::NotFound,
        Err(e) => ResolvedPage::Error(e.to_string()),
    }
}

// Map a request path to a source path: directory-style requests resolve to
// index.html, and .html requests prefer a matching .md source when one
// exists.
fn source_for_request(root: &Path, request_path: &str) -> PathBuf {
    let trimmed = request_path.trim_start_matches('/');
    let mut path = if trimmed.is_empty() || trimmed.ends_with('/') {
        PathBuf::from(trimmed).join("index.html")
    } else {
        PathBuf::from(trimmed)
    };

    if path.extension().is_some_and(|e| e == "html") {
        let markdown = path.with_extension("md");
        if root.join(&markdown).is_file() {
            path = markdown;
        }
    }

    path
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
