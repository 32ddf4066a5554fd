//! Front controller for a server-side UI framework.
//!
//! A single entry point receives every HTTP request, validates its verb
//! and path, dispatches it through the framework's request processing
//! lifecycle, and guarantees per-request context cleanup regardless of
//! outcome. The component tree, render pipeline and the lifecycle's
//! internals belong to the embedding framework; this crate defines the
//! seams it plugs into and owns everything between transport and
//! lifecycle.

pub mod config;
pub mod context;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod resource;

pub use config::ControllerConfig;
pub use dispatch::{DispatchController, FrameworkFault, ProcessingError, ServiceError};
pub use http::HttpServer;
