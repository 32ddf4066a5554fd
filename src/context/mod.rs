//! Per-request context seam.
//!
//! # Data Flow
//! ```text
//! ContextFactory.acquire(request, response, lifecycle)
//!     → Box<dyn RequestContext>        owned by the controller
//!     → dispatched (resource handler or lifecycle)
//!     → RequestContext.release(self)   exactly once, on every exit path
//! ```
//!
//! # Design Decisions
//! - `release` consumes the boxed context, so a double release is a
//!   compile error rather than a runtime bug
//! - Contexts never cross request boundaries; each one lives strictly
//!   inside a single `service()` invocation

use std::sync::Arc;

use crate::http::request::DispatchRequest;
use crate::http::response::ResponseHandle;
use crate::lifecycle::LifecycleExecutor;
use crate::registry::FactoryError;
use crate::resource::ResourceHandler;

/// Opaque per-request state owned by the application framework.
///
/// The controller only ever borrows a context for the duration of one
/// request, then releases it.
pub trait RequestContext: Send {
    /// The transport request this context was created for.
    fn request(&self) -> &DispatchRequest;

    /// The transport response sink for this request.
    fn response(&self) -> &ResponseHandle;

    /// Resource handler bound to this request's application.
    fn resource_handler(&self) -> Arc<dyn ResourceHandler>;

    /// Release all resources held by the context. Consuming: the
    /// controller calls this at most once per acquired context.
    fn release(self: Box<Self>);
}

/// Produces one [`RequestContext`] per incoming request.
pub trait ContextFactory: Send + Sync {
    /// Create the context for this request, bound to the selected
    /// lifecycle.
    fn acquire(
        &self,
        request: &DispatchRequest,
        response: ResponseHandle,
        lifecycle: Arc<dyn LifecycleExecutor>,
    ) -> Result<Box<dyn RequestContext>, FactoryError>;

    /// Context left over from pre-request startup work, if any. The
    /// controller queries this at most once over its lifetime and
    /// releases whatever it gets back.
    fn leftover_startup_context(&self) -> Option<Box<dyn RequestContext>> {
        None
    }
}
