//! The request dispatch controller.
//!
//! # Responsibilities
//! - Gate requests on HTTP verb and reserved internal paths
//! - Acquire one request context per request and release it exactly once
//! - Delegate to the resource handler or run execute-then-render
//! - Translate application faults into transport errors at one boundary
//!
//! # Design Decisions
//! - `init` is the constructor and `destroy` consumes the controller, so
//!   servicing an uninitialized or destroyed controller is a compile
//!   error rather than a runtime state check
//! - The leftover-startup cleanup flag is an atomic compare-and-set; a
//!   broad lock here would serialize every in-flight request
//! - Context release rides on an RAII guard wrapping exactly the
//!   dispatch step, so it also fires when a collaborator panics

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::ControllerConfig;
use crate::context::{ContextFactory, RequestContext};
use crate::dispatch::admission::AdmissionTable;
use crate::dispatch::faults::{classify, FrameworkFault, ProcessingError, ServiceError};
use crate::http::request::DispatchRequest;
use crate::http::response::ResponseHandle;
use crate::lifecycle::{LifecycleExecutor, DEFAULT_LIFECYCLE_ID};
use crate::registry::{CollaboratorRegistry, FactoryError};
use crate::resource::ResourceHandler;

/// Extra-path areas reserved for framework internals, compared case
/// insensitively against the upper-cased extra path.
const RESERVED_PATH_PREFIXES: [&str; 2] = ["/WEB-INF", "/META-INF"];

/// Startup failure that must keep the controller out of service.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The context factory could not be resolved.
    #[error("context factory resolution failed")]
    ContextFactory(#[source] FactoryError),

    /// The configured lifecycle could not be resolved.
    #[error("lifecycle {id:?} resolution failed")]
    Lifecycle {
        id: String,
        #[source]
        source: FactoryError,
    },
}

/// Front controller: single entry point for every framework request.
///
/// One instance is shared across all request-handling threads; all
/// steady-state state is read-only except the one-shot startup-cleanup
/// flag.
pub struct DispatchController {
    context_factory: Arc<dyn ContextFactory>,
    lifecycle: Arc<dyn LifecycleExecutor>,
    admission: AdmissionTable,
    startup_context_released: AtomicBool,
}

impl std::fmt::Debug for DispatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchController")
            .field("admission", &self.admission)
            .field(
                "startup_context_released",
                &self.startup_context_released,
            )
            .finish_non_exhaustive()
    }
}

impl DispatchController {
    /// Resolve collaborator handles and build the admission table.
    ///
    /// A resolution failure is logged with its root cause and returned,
    /// leaving the controller unconstructed and therefore unavailable
    /// for traffic.
    pub fn init(
        config: &ControllerConfig,
        registry: &dyn CollaboratorRegistry,
    ) -> Result<Self, StartupError> {
        let context_factory = registry.context_factory().map_err(|e| {
            tracing::error!(error = %e, "front controller startup failed, refusing traffic");
            StartupError::ContextFactory(e)
        })?;

        // Narrow (dispatch) scope wins over the broad (application)
        // scope; the factory default covers both being absent.
        let lifecycle_id = config
            .dispatch
            .lifecycle_id
            .as_deref()
            .or(config.application.lifecycle_id.as_deref())
            .unwrap_or(DEFAULT_LIFECYCLE_ID);
        let lifecycle = registry.lifecycle(lifecycle_id).map_err(|e| {
            tracing::error!(
                lifecycle_id = %lifecycle_id,
                error = %e,
                "lifecycle resolution failed, refusing traffic"
            );
            StartupError::Lifecycle {
                id: lifecycle_id.to_string(),
                source: e,
            }
        })?;

        let admission =
            AdmissionTable::initialize(config.dispatch.allowed_http_methods.as_deref());

        tracing::info!(lifecycle_id = %lifecycle_id, "front controller initialized");

        Ok(Self {
            context_factory,
            lifecycle,
            admission,
            startup_context_released: AtomicBool::new(false),
        })
    }

    /// Process one request. Callable concurrently from any number of
    /// worker threads.
    ///
    /// Verb and reserved-path rejections are answered locally through
    /// `response` (400 and 404, no body) and return `Ok`. Faults from
    /// the lifecycle or the resource handler surface as [`ServiceError`]
    /// with the original root cause preserved.
    pub fn service(
        &self,
        request: &DispatchRequest,
        response: &ResponseHandle,
    ) -> Result<(), ServiceError> {
        if !self.admission.is_allowed(request.method().as_str()) {
            tracing::debug!(method = %request.method(), "method not admitted");
            response.send_error(StatusCode::BAD_REQUEST);
            return Ok(());
        }

        if let Some(path_info) = request.path_info() {
            if is_reserved_path(path_info) {
                tracing::debug!(path_info = %path_info, "reserved path rejected");
                response.send_error(StatusCode::NOT_FOUND);
                return Ok(());
            }
        }

        self.release_leftover_startup_context();

        let context = self
            .context_factory
            .acquire(request, response.clone(), Arc::clone(&self.lifecycle))
            .map_err(|e| {
                ProcessingError::with_cause("request context acquisition failed", Box::new(e))
            })?;

        // The guard scope covers exactly the dispatch step; the context
        // is released when it closes, on every exit path.
        {
            let mut guard = ReleaseGuard::new(context);
            match Self::dispatch(self.lifecycle.as_ref(), guard.context_mut()) {
                Ok(()) => Ok(()),
                Err(fault) => Err(ServiceError::from(classify(fault))),
            }
        }
    }

    /// Delegate to the resource handler, or run the lifecycle's execute
    /// phase followed by its render phase.
    fn dispatch(
        lifecycle: &dyn LifecycleExecutor,
        context: &mut dyn RequestContext,
    ) -> Result<(), FrameworkFault> {
        let handler = context.resource_handler();
        if handler.is_resource_request(context) {
            handler.handle_resource_request(context)
        } else {
            lifecycle.execute(context)?;
            lifecycle.render(context)
        }
    }

    /// One-shot cleanup of a context left over from pre-request startup
    /// work. Runs at most once over the controller's lifetime; the
    /// compare-and-set keeps concurrent first requests from racing it.
    fn release_leftover_startup_context(&self) {
        if self
            .startup_context_released
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            if let Some(leftover) = self.context_factory.leftover_startup_context() {
                tracing::debug!("releasing request context left over from startup");
                leftover.release();
            }
        }
    }

    /// Release collaborator handles and tear down the admission table.
    ///
    /// Consumes the controller, so a `service` call after destruction is
    /// unrepresentable.
    pub fn destroy(mut self) {
        self.admission.teardown();
        tracing::info!("front controller destroyed");
    }
}

/// Owns the request context for the dispatch scope and releases it on
/// every exit path, panics included.
struct ReleaseGuard {
    context: Option<Box<dyn RequestContext>>,
}

impl ReleaseGuard {
    fn new(context: Box<dyn RequestContext>) -> Self {
        Self {
            context: Some(context),
        }
    }

    fn context_mut(&mut self) -> &mut dyn RequestContext {
        match self.context.as_deref_mut() {
            Some(context) => context,
            // The slot is only emptied by drop.
            None => unreachable!("request context accessed after release"),
        }
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if let Some(context) = self.context.take() {
            context.release();
        }
    }
}

fn is_reserved_path(path_info: &str) -> bool {
    let upper = path_info.to_ascii_uppercase();
    RESERVED_PATH_PREFIXES.iter().any(|prefix| {
        upper
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
