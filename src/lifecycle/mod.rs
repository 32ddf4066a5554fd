//! Lifecycle executor seam.
//!
//! # Data Flow
//! ```text
//! DispatchController.service()
//!     → LifecycleExecutor.execute(context)   process and update state
//!     → LifecycleExecutor.render(context)    produce output
//! ```
//!
//! # Design Decisions
//! - execute-before-render is a hard ordering invariant enforced by the
//!   controller; implementations never reorder phases themselves
//! - Implementations are registered under an identifier so deployments
//!   can select a lifecycle variant through configuration
//! - Phase internals are framework territory; this crate only defines
//!   the seam the controller calls against

use crate::context::RequestContext;
use crate::dispatch::faults::FrameworkFault;

/// Lifecycle identifier used when configuration selects no variant.
pub const DEFAULT_LIFECYCLE_ID: &str = "default";

/// The two ordered operations of the request processing lifecycle.
///
/// Both phases may raise the generic application-layer fault; the
/// controller owns its translation into transport errors.
pub trait LifecycleExecutor: Send + Sync {
    /// Process the request and update application state.
    fn execute(&self, context: &mut dyn RequestContext) -> Result<(), FrameworkFault>;

    /// Produce the response output. Always called after a successful
    /// [`execute`](LifecycleExecutor::execute).
    fn render(&self, context: &mut dyn RequestContext) -> Result<(), FrameworkFault>;
}
