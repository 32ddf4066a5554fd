//! Response sink handed to the controller and its collaborators.
//!
//! # Responsibilities
//! - Collect status, content type and body produced during dispatch
//! - Expose the transport's "send a bare status code" operation
//! - Convert the collected state into an HTTP response
//!
//! # Design Decisions
//! - Cheap-to-clone shared handle: the factory embeds a clone in the
//!   request context so the lifecycle can write output, while the HTTP
//!   layer keeps its own clone to build the final response
//! - A poisoned lock degrades to the inner state instead of panicking;
//!   the state is per-request and a torn write only garbles one response

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct ResponseState {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Default for ResponseState {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            content_type: None,
            body: Vec::new(),
        }
    }
}

/// Shared per-request response sink.
#[derive(Clone, Debug, Default)]
pub struct ResponseHandle {
    inner: Arc<Mutex<ResponseState>>,
}

impl ResponseHandle {
    /// Create an empty 200 response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a bare status code with no body, discarding anything written
    /// so far.
    pub fn send_error(&self, status: StatusCode) {
        self.with(|state| {
            state.status = status;
            state.content_type = None;
            state.body.clear();
        });
    }

    /// Set the response status.
    pub fn set_status(&self, status: StatusCode) {
        self.with(|state| state.status = status);
    }

    /// Set the response content type.
    pub fn set_content_type(&self, content_type: &str) {
        let content_type = content_type.to_string();
        self.with(|state| state.content_type = Some(content_type));
    }

    /// Append bytes to the response body.
    pub fn write(&self, bytes: &[u8]) {
        self.with(|state| state.body.extend_from_slice(bytes));
    }

    /// The current response status.
    pub fn status(&self) -> StatusCode {
        self.with(|state| state.status)
    }

    /// Consume the handle into an HTTP response.
    pub fn into_http_response(self) -> Response {
        let (status, content_type, body) = self.with(|state| {
            (
                state.status,
                state.content_type.take(),
                std::mem::take(&mut state.body),
            )
        });

        let mut builder = Response::builder().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }

    fn with<R>(&self, f: impl FnOnce(&mut ResponseState) -> R) -> R {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}
