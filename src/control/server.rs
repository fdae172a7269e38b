//! HTTP server for the status/control API
//!
//! This module binds the loopback listener, builds the axum router and runs
//! it as a background task.

use crate::config::{ServerConfig, UiConfig};
use crate::control::handler::{content_type_for, resolve_local_path, LOCAL_FILE_PREFIX};
use crate::control::{Ack, ControlHandler, ModesResponse, StatusResponse};
use crate::error::{MuserError, Result};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::io::ReaderStream;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

/// Built-in UI document served at `/`
pub const DEFAULT_INDEX_HTML: &str = include_str!("../../web/index.html");

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    handler: Arc<ControlHandler>,
    index_html: Arc<str>,
}

impl AppState {
    /// Create state from a handler and the UI document
    pub fn new(handler: ControlHandler, index_html: impl Into<Arc<str>>) -> Self {
        Self {
            handler: Arc::new(handler),
            index_html: index_html.into(),
        }
    }

    /// Run a blocking handler call off the async workers.
    async fn call<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&ControlHandler) -> T + Send + 'static,
        T: Send + 'static,
    {
        let handler = self.handler.clone();
        match tokio::task::spawn_blocking(move || f(&handler)).await {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Player task failed: {}", e);
                None
            }
        }
    }
}

/// Load the UI document: the configured override, or the built-in page.
pub fn index_document(ui: &UiConfig) -> Result<String> {
    match &ui.index_path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            MuserError::Config(format!("Failed to read UI document {:?}: {}", path, e))
        }),
        None => Ok(DEFAULT_INDEX_HTML.to_string()),
    }
}

/// Build the router with all routes
///
/// Every route answers cross-origin requests, so other local pages and
/// widgets can poll the API.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/status", get(status))
        .route("/api/modes", get(modes))
        .route("/api/play_pause", post(play_pause))
        .route("/api/next", post(next_track))
        .route("/api/prev", post(prev_track))
        .route("/api/seek/:percentage", post(seek))
        .route("/api/seek_relative/:offset", post(seek_relative))
        .route("/api/shuffle", post(shuffle))
        .route("/api/loop", post(toggle_loop))
        .route("/local-file/*path", get(local_file))
        .layer(cors)
        .with_state(state)
}

/// HTTP server bound to a loopback address
pub struct HttpServer {
    listener: TcpListener,
    addr: SocketAddr,
}

impl HttpServer {
    /// Bind the listener; port 0 picks a free port.
    pub async fn bind(config: &ServerConfig) -> Result<Self> {
        let ip: IpAddr = config.bind_address.parse().map_err(|_| {
            MuserError::Config(format!("Invalid bind address: {}", config.bind_address))
        })?;

        let listener = TcpListener::bind(SocketAddr::new(ip, config.port))
            .await
            .map_err(|e| MuserError::Server(format!("Failed to bind {}: {}", ip, e)))?;

        let addr = listener.local_addr()?;
        info!("HTTP server listening on {}", addr);

        Ok(Self { listener, addr })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the UI
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serve until `shutdown` resolves
    pub async fn serve<F>(self, state: AppState, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, router(state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| MuserError::Server(format!("HTTP server failed: {}", e)))
    }

    /// Serve on a background task until the process exits
    pub fn spawn(self, state: AppState) -> JoinHandle<Result<()>> {
        tokio::spawn(self.serve(state, std::future::pending()))
    }
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "player": state.handler.has_player(),
        })),
    )
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let resp = state.call(|h| h.status()).await;
    Json(resp.unwrap_or_else(StatusResponse::no_player))
}

async fn modes(State(state): State<AppState>) -> Json<ModesResponse> {
    let resp = state.call(|h| h.modes()).await;
    Json(resp.unwrap_or_else(ModesResponse::unknown))
}

async fn play_pause(State(state): State<AppState>) -> Json<Ack> {
    state.call(|h| h.play_pause()).await;
    Json(Ack::ok())
}

async fn next_track(State(state): State<AppState>) -> Json<Ack> {
    state.call(|h| h.next()).await;
    Json(Ack::ok())
}

async fn prev_track(State(state): State<AppState>) -> Json<Ack> {
    state.call(|h| h.previous()).await;
    Json(Ack::ok())
}

async fn seek(State(state): State<AppState>, Path(percentage): Path<f64>) -> Json<Ack> {
    state.call(move |h| h.seek_fraction(percentage)).await;
    Json(Ack::ok())
}

async fn seek_relative(State(state): State<AppState>, Path(offset): Path<f64>) -> Json<Ack> {
    state.call(move |h| h.seek_relative(offset)).await;
    Json(Ack::ok())
}

async fn shuffle(State(state): State<AppState>) -> Json<Ack> {
    state.call(|h| h.toggle_shuffle()).await;
    Json(Ack::ok())
}

async fn toggle_loop(State(state): State<AppState>) -> Json<Ack> {
    state.call(|h| h.toggle_loop()).await;
    Json(Ack::ok())
}

/// Stream a local artwork file, or 404
///
/// Reads the undecoded request path so artwork names that are not UTF-8
/// still resolve.
async fn local_file(uri: Uri) -> Response {
    let raw = uri
        .path()
        .strip_prefix(LOCAL_FILE_PREFIX)
        .unwrap_or_default();
    let path = resolve_local_path(raw);

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => {
            debug!("Local file not found: {:?}", path);
            return StatusCode::NOT_FOUND.into_response();
        }
    }

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("Failed to open {:?}: {}", path, e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let body = Body::from_stream(ReaderStream::new(file));
    ([(header::CONTENT_TYPE, content_type_for(&path))], body).into_response()
}
