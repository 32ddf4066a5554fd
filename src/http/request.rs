//! Request-side transport boundary.
//!
//! # Responsibilities
//! - Carry the verb, full path and extra-path suffix into the controller
//! - Compute the extra path relative to the controller's mapping prefix
//! - Stamp every request with an `x-request-id` header for tracing
//!
//! # Design Decisions
//! - `DispatchRequest` is a plain snapshot; the controller never touches
//!   the underlying hyper request or its body
//! - Request ID added as early as possible so every log line downstream
//!   can carry it

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Uri};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Transport request snapshot handed to the dispatch controller.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    method: Method,
    uri: Uri,
    path_info: Option<String>,
}

impl DispatchRequest {
    /// Build a request snapshot. `path_info` is the extra path suffix
    /// relative to the controller's mapping, when one exists.
    pub fn new(method: Method, uri: Uri, path_info: Option<String>) -> Self {
        Self {
            method,
            uri,
            path_info,
        }
    }

    /// The HTTP verb, exactly as received.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full request path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The request URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Extra path suffix relative to the controller's mapping prefix.
    pub fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }
}

/// Extra path suffix of `path` relative to `mapping_prefix`.
///
/// Mirrors servlet-style prefix mappings: mounted at `/app`, the path
/// `/app/x/y` has extra path `/x/y` and `/app` itself has none. Mounted
/// at the root, the whole path is the extra path.
pub fn extract_path_info(path: &str, mapping_prefix: &str) -> Option<String> {
    let prefix = mapping_prefix.trim_end_matches('/');
    if prefix.is_empty() {
        if path.is_empty() || path == "/" {
            return None;
        }
        return Some(path.to_string());
    }

    match path.strip_prefix(prefix) {
        Some("") => None,
        Some(rest) if rest.starts_with('/') => Some(rest.to_string()),
        _ => None,
    }
}

/// Tower layer inserting a UUIDv4 `x-request-id` header when the client
/// did not send one.
#[derive(Clone, Copy, Debug)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        if !request.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                request.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_info_under_prefix() {
        assert_eq!(
            extract_path_info("/app/view/home", "/app"),
            Some("/view/home".to_string())
        );
        assert_eq!(extract_path_info("/app", "/app"), None);
        assert_eq!(extract_path_info("/application", "/app"), None);
        assert_eq!(extract_path_info("/other/x", "/app"), None);
    }

    #[test]
    fn test_path_info_at_root() {
        assert_eq!(extract_path_info("/", "/"), None);
        assert_eq!(
            extract_path_info("/WEB-INF/x", "/"),
            Some("/WEB-INF/x".to_string())
        );
    }

    #[test]
    fn test_trailing_slash_prefix_is_normalized() {
        assert_eq!(
            extract_path_info("/app/view", "/app/"),
            Some("/view".to_string())
        );
    }
}
