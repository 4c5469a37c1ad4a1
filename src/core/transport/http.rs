//! HTTP transport implementation.
//!
//! Serves registered resources over plain HTTP GET, so browsers can load
//! module stylesheets, scripts and images straight from the registry.
//!
//! Routes:
//! - `GET /resources/{*path}`: first provider (in registration order) that has `path`
//! - `GET /providers/{provider}/{*path}`: only the named provider
//! - `GET /providers`: registered providers as JSON
//! - `GET /health`

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{HttpConfig, TransportError};
use crate::core::Result;
use crate::domains::resources::{ResourceError, ResourceRegistry};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<ResourceRegistry>,
}

/// Provider summary returned by `GET /providers`.
#[derive(Debug, Serialize)]
struct ProviderSummary<'a> {
    name: &'a str,
    kind: &'static str,
    development_root: Option<&'a FsPath>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the router serving `registry`.
    pub fn router(&self, registry: Arc<ResourceRegistry>) -> Router {
        let mut app = Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_check))
            .route("/providers", get(list_providers))
            .route("/providers/{provider}/{*path}", get(serve_scoped))
            .route("/resources/{*path}", get(serve_any))
            .with_state(AppState { registry })
            .layer(TraceLayer::new_for_http());

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, registry: Arc<ResourceRegistry>) -> Result<()> {
        let addr = self.address();
        let app = self.router(registry);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Any provider:   GET /resources/{{path}}");
        info!("  → Named provider: GET /providers/{{provider}}/{{path}}");
        info!("  → Providers:      GET /providers");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::serve(&addr, e))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Root handler - provides API info.
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Resource Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "resources": "/resources/{path}",
            "provider_resources": "/providers/{provider}/{path}",
            "providers": "/providers",
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// List registered providers in lookup order.
async fn list_providers(State(state): State<AppState>) -> Response {
    let providers: Vec<_> = state
        .registry
        .list_providers()
        .iter()
        .map(|(name, provider)| ProviderSummary {
            name,
            kind: provider.kind(),
            development_root: provider.development_root(),
        })
        .collect();

    Json(serde_json::json!({ "providers": providers })).into_response()
}

/// Serve a resource from the first provider that has it.
#[instrument(skip_all, fields(path = %path))]
async fn serve_any(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    match state.registry.locate(&path) {
        Some((provider, file)) => {
            debug!("{} served by provider {}", path, provider);
            serve_file(file).await
        }
        None => error_response(StatusCode::NOT_FOUND, format!("Resource not found: {}", path)),
    }
}

/// Serve a resource from a named provider.
#[instrument(skip_all, fields(provider = %provider, path = %path))]
async fn serve_scoped(
    State(state): State<AppState>,
    Path((provider, path)): Path<(String, String)>,
) -> Response {
    match state.registry.resolve(Some(&provider), &path) {
        Ok(Some(file)) => serve_file(file).await,
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            ResourceError::not_found(&path).to_string(),
        ),
        Err(e @ ResourceError::ProviderNotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, e.to_string())
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn serve_file(file: PathBuf) -> Response {
    match tokio::fs::File::open(&file).await {
        Ok(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type(&file))],
            Body::from_stream(ReaderStream::new(handle)),
        )
            .into_response(),
        Err(e) => {
            warn!("Failed to open resource {}: {}", file.display(), e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ResourceError::from(e).to_string(),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Content type for a resource, from its file extension.
pub fn content_type(file: &FsPath) -> &'static str {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "html" | "htm" => "text/html; charset=utf-8",
        "txt" => "text/plain; charset=utf-8",
        "json" | "map" => "application/json",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}
