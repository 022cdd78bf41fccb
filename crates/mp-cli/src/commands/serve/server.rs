//! Preview server using axum, with static files served from disk

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use mp_core::external_id_from_path;
use mp_jinja::{PreviewOutcome, Previewer};
use std::net::SocketAddr;
use std::path::{Component, PathBuf};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::cli::{GlobalArgs, ServeArgs};
use crate::commands::common::load_previewer;

/// State shared across all handlers
struct AppState {
    previewer: Previewer,
    static_root: PathBuf,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let mut previewer = load_previewer(global)?;
    if args.cache {
        previewer = previewer.with_cache(true);
    } else if args.no_cache {
        previewer = previewer.with_cache(false);
    }

    let config = previewer.config();
    let host = args.host.clone().unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let prefix = config.route_prefix().to_string();
    let static_root = config.static_dir_absolute(previewer.root());

    match previewer.scan() {
        Ok(catalog) => log::info!(
            "Found {} templates in {}",
            catalog.len(),
            config.template_dir_absolute(previewer.root()).display()
        ),
        Err(e) => log::warn!("{}", e),
    }
    log::debug!(
        "Template set cache {}",
        if previewer.is_cached() { "enabled" } else { "disabled" }
    );

    let state = Arc::new(AppState {
        previewer,
        static_root,
    });
    let app = router(&prefix, state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host:port")?;

    let url = format!("http://{}:{}{}", host, port, prefix);
    println!("Serving email template previews at {}", url);

    if args.open && open::that(&url).is_err() {
        eprintln!("Could not open browser automatically. Visit: {}", url);
    }

    println!("Press Ctrl+C to stop.\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}:{}", host, port))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("Server stopped");
    Ok(())
}

fn router(prefix: &str, state: Arc<AppState>) -> Router {
    let routes = if prefix == "/" {
        Router::new()
            .route("/", get(preview_index))
            .route("/{*name}", get(preview_named))
    } else {
        Router::new()
            .route(prefix, get(preview_index))
            .route(&format!("{}/", prefix), get(preview_index))
            .route(&format!("{}/{{*name}}", prefix), get(preview_named))
    };
    routes
        .fallback(get(static_handler))
        .layer(CompressionLayer::new())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
    }
}

/// GET {prefix} and {prefix}/
async fn preview_index(State(state): State<Arc<AppState>>) -> Response {
    preview(state, String::new()).await
}

/// GET {prefix}/{*name}
async fn preview_named(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    let id = external_id_from_path(&name, "", &state.previewer.config().extension);
    preview(state, id).await
}

async fn preview(state: Arc<AppState>, id: String) -> Response {
    let outcome = tokio::task::spawn_blocking(move || state.previewer.handle(&id)).await;
    match outcome {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => {
            log::error!("Preview task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Preview task failed").into_response()
        }
    }
}

fn outcome_response(outcome: PreviewOutcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        outcome.into_body(),
    )
        .into_response()
}

/// Fallback handler: serve files from the static directory
async fn static_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let Some(path) = resolve_static_path(&state.static_root, uri.path()) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };
    let path = if path.is_dir() {
        path.join("index.html")
    } else {
        path
    };

    match tokio::fs::read(&path).await {
        Ok(content) => {
            let mime = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime),
                    (header::CACHE_CONTROL, "no-cache".to_string()),
                ],
                content,
            )
                .into_response()
        }
        Err(e) => {
            log::debug!("Static file {} not served: {}", path.display(), e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

/// Map a request path onto the static root. Returns `None` for paths that
/// would escape it.
fn resolve_static_path(root: &std::path::Path, uri_path: &str) -> Option<PathBuf> {
    let relative = std::path::Path::new(uri_path.trim_start_matches('/'));
    let mut resolved = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}
