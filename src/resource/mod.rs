//! Static resource handling seam.
//!
//! # Responsibilities
//! - Decide whether a request targets a static resource
//! - Serve such requests directly, bypassing the lifecycle entirely
//!
//! # Design Decisions
//! - The handler is reached through the request context, so each
//!   application supplies its own resource strategy without the
//!   controller knowing about it

use crate::context::RequestContext;
use crate::dispatch::faults::FrameworkFault;

/// Serves static resources outside the request processing lifecycle.
pub trait ResourceHandler: Send + Sync {
    /// Whether this request targets a static resource.
    fn is_resource_request(&self, context: &dyn RequestContext) -> bool;

    /// Serve the resource. Only called after
    /// [`is_resource_request`](ResourceHandler::is_resource_request)
    /// returned true.
    fn handle_resource_request(
        &self,
        context: &mut dyn RequestContext,
    ) -> Result<(), FrameworkFault>;
}
