//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Dispatch requests to the API handlers or the static file server

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::handlers;
use crate::http::request::{request_id, QueryParams};
use crate::observability::metrics;
use crate::routing::Route;
use crate::upstream::{UpstreamFetcher, UpstreamResolver};

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid upstream origin: {0}")]
    Origin(#[from] url::ParseError),

    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
///
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<UpstreamResolver>,
    pub fetcher: UpstreamFetcher,
    pub static_files: ServeDir,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let state = AppState {
            resolver: Arc::new(UpstreamResolver::new(&config.upstream.origin)?),
            fetcher: UpstreamFetcher::new()?,
            static_files: ServeDir::new(&config.static_files.root),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until a message arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = %self.config.upstream.origin,
            static_root = %self.config.static_files.root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn make_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request),
    )
}

/// Single entry point: route by method and path prefix.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let route = Route::for_request(request.method(), request.uri().path());
    let query = QueryParams::from_uri(request.uri());

    tracing::debug!(
        route = route.name(),
        path = %request.uri().path(),
        "Dispatching request"
    );

    let response = match route {
        Route::TankaList => handlers::tanka_list(&state, &query).await.into_response(),
        Route::TankaPage => handlers::tanka_page(&state, &query).await.into_response(),
        Route::Asset => handlers::asset(&state, &query).await.into_response(),
        Route::Static => state.static_files.oneshot(request).await.into_response(),
    };

    metrics::record_request(route.name(), response.status().as_u16(), start_time);
    response
}
