//! HTTP server setup and controller embedding.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind the server to a listener with graceful shutdown
//! - Bridge async transport and the blocking dispatch core
//!
//! # Design Decisions
//! - The controller is synchronous by contract, so each request runs it
//!   on the blocking thread pool instead of stalling a runtime worker
//! - Service errors become the hosting environment's default error page:
//!   a 500 with one plain diagnostic line

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ControllerConfig;
use crate::dispatch::{DispatchController, ServiceError};
use crate::http::request::{extract_path_info, DispatchRequest, RequestIdLayer, X_REQUEST_ID};
use crate::http::response::ResponseHandle;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<DispatchController>,
    pub mapping_prefix: String,
}

/// HTTP server hosting the front controller.
pub struct HttpServer {
    router: Router,
    config: ControllerConfig,
}

impl HttpServer {
    /// Create a new HTTP server around an initialized controller.
    pub fn new(config: ControllerConfig, controller: Arc<DispatchController>) -> Self {
        let state = AppState {
            controller,
            mapping_prefix: config.dispatch.mapping_prefix.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ControllerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

/// Catch-all handler: snapshot the request, run the controller on the
/// blocking pool, convert the collected response state.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path_info = extract_path_info(request.uri().path(), &state.mapping_prefix);
    let dispatch_request =
        DispatchRequest::new(request.method().clone(), request.uri().clone(), path_info);

    tracing::debug!(
        request_id = %request_id,
        method = %dispatch_request.method(),
        path = %dispatch_request.path(),
        "dispatching request"
    );

    let response_handle = ResponseHandle::new();
    let controller = Arc::clone(&state.controller);
    let sink = response_handle.clone();
    let served =
        tokio::task::spawn_blocking(move || controller.service(&dispatch_request, &sink)).await;

    match served {
        Ok(Ok(())) => response_handle.into_http_response(),
        Ok(Err(err)) => {
            tracing::error!(request_id = %request_id, error = %err, "request dispatch failed");
            error_page(&err)
        }
        Err(join_error) => {
            tracing::error!(request_id = %request_id, error = %join_error, "dispatch task panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, "dispatch task failed").into_response()
        }
    }
}

/// Default error page: one plain diagnostic line.
fn error_page(err: &ServiceError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("request processing failed: {err}"),
    )
        .into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install Ctrl+C handler");
    }
    tracing::info!("shutdown signal received");
}
