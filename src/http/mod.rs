//! HTTP embedding subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, blocking-pool bridge)
//!     → request.rs (request ID, DispatchRequest snapshot, extra path)
//!     → [dispatch subsystem services the request]
//!     → response.rs (collected status/body → HTTP response)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{DispatchRequest, RequestIdLayer, X_REQUEST_ID};
pub use response::ResponseHandle;
pub use server::HttpServer;
