//! Front controller demo binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │               FRONT CONTROLLER                │
//!                      │                                               │
//!   Client Request     │  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│  http  │──▶│ admission │──▶│ dispatch  │  │
//!                      │  │ server │   │  + paths  │   │controller │  │
//!                      │  └────────┘   └───────────┘   └─────┬─────┘  │
//!                      │                                     │        │
//!                      │                     ┌───────────────┴─────┐  │
//!                      │                     ▼                     ▼  │
//!   Client Response    │  ┌────────┐  ┌────────────┐   ┌───────────┐ │
//!   ◀──────────────────┼──│response│◀─│ lifecycle  │   │ resource  │ │
//!                      │  │  sink  │  │ exec+render│   │  handler  │ │
//!                      │  └────────┘  └────────────┘   └───────────┘ │
//!                      │                                              │
//!                      │  cross-cutting: config, observability,       │
//!                      │  collaborator registry, fault translation    │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! The demo wiring below registers a trivial page-rendering lifecycle
//! and an inline asset handler so the crate runs standalone; a real
//! framework embedding supplies its own collaborators instead.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use front_controller::config::{load_config, ControllerConfig};
use front_controller::context::{ContextFactory, RequestContext};
use front_controller::dispatch::{DispatchController, FrameworkFault};
use front_controller::http::{DispatchRequest, HttpServer, ResponseHandle};
use front_controller::lifecycle::{LifecycleExecutor, DEFAULT_LIFECYCLE_ID};
use front_controller::observability;
use front_controller::registry::{FactoryError, StaticRegistry};
use front_controller::resource::ResourceHandler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    tracing::info!("front-controller v0.1.0 starting");

    let config_path = Path::new("controller.toml");
    let config = if config_path.exists() {
        load_config(config_path)?
    } else {
        ControllerConfig::default()
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mapping_prefix = %config.dispatch.mapping_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );

    let assets: Arc<dyn ResourceHandler> = Arc::new(DemoAssets);
    let registry = StaticRegistry::new()
        .with_context_factory(Arc::new(DemoContextFactory { assets }))
        .with_lifecycle(DEFAULT_LIFECYCLE_ID, Arc::new(DemoLifecycle));

    let controller = Arc::new(DispatchController::init(&config, &registry)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let server = HttpServer::new(config, controller);
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Demo per-request context: the request/response pair and nothing else.
struct DemoContext {
    request: DispatchRequest,
    response: ResponseHandle,
    assets: Arc<dyn ResourceHandler>,
}

impl RequestContext for DemoContext {
    fn request(&self) -> &DispatchRequest {
        &self.request
    }

    fn response(&self) -> &ResponseHandle {
        &self.response
    }

    fn resource_handler(&self) -> Arc<dyn ResourceHandler> {
        Arc::clone(&self.assets)
    }

    fn release(self: Box<Self>) {}
}

struct DemoContextFactory {
    assets: Arc<dyn ResourceHandler>,
}

impl ContextFactory for DemoContextFactory {
    fn acquire(
        &self,
        request: &DispatchRequest,
        response: ResponseHandle,
        _lifecycle: Arc<dyn LifecycleExecutor>,
    ) -> Result<Box<dyn RequestContext>, FactoryError> {
        Ok(Box::new(DemoContext {
            request: request.clone(),
            response,
            assets: Arc::clone(&self.assets),
        }))
    }
}

/// Lifecycle that renders a one-line page naming the requested view.
struct DemoLifecycle;

impl LifecycleExecutor for DemoLifecycle {
    fn execute(&self, _context: &mut dyn RequestContext) -> Result<(), FrameworkFault> {
        Ok(())
    }

    fn render(&self, context: &mut dyn RequestContext) -> Result<(), FrameworkFault> {
        let path = context.request().path().to_string();
        let response = context.response();
        response.set_content_type("text/html; charset=utf-8");
        response.write(
            format!("<html><body><h1>front-controller</h1><p>view: {path}</p></body></html>")
                .as_bytes(),
        );
        Ok(())
    }
}

/// Serves anything under `/assets/` directly, bypassing the lifecycle.
struct DemoAssets;

impl ResourceHandler for DemoAssets {
    fn is_resource_request(&self, context: &dyn RequestContext) -> bool {
        context
            .request()
            .path_info()
            .is_some_and(|p| p.starts_with("/assets/"))
    }

    fn handle_resource_request(
        &self,
        context: &mut dyn RequestContext,
    ) -> Result<(), FrameworkFault> {
        let response = context.response();
        response.set_content_type("text/plain; charset=utf-8");
        response.write(b"demo asset\n");
        Ok(())
    }
}
