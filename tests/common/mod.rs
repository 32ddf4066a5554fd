//! Shared utilities for integration testing.
//!
//! Spins up the full HTTP server around a spy set of collaborators so
//! tests can drive the controller over real sockets and assert on
//! acquire/release/execute/render counts afterwards.

use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::net::TcpListener;

use front_controller::config::ControllerConfig;
use front_controller::context::{ContextFactory, RequestContext};
use front_controller::dispatch::{DispatchController, FrameworkFault};
use front_controller::http::{DispatchRequest, HttpServer, ResponseHandle};
use front_controller::lifecycle::{LifecycleExecutor, DEFAULT_LIFECYCLE_ID};
use front_controller::registry::{FactoryError, StaticRegistry};
use front_controller::resource::ResourceHandler;

/// Collaborator invocation counts, shared with the running server.
#[derive(Default)]
pub struct Counters {
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
    pub executed: AtomicUsize,
    pub rendered: AtomicUsize,
    pub resource_handled: AtomicUsize,
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub counters: Arc<Counters>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

struct SpyContext {
    counters: Arc<Counters>,
    request: DispatchRequest,
    response: ResponseHandle,
    handler: Arc<dyn ResourceHandler>,
}

impl RequestContext for SpyContext {
    fn request(&self) -> &DispatchRequest {
        &self.request
    }

    fn response(&self) -> &ResponseHandle {
        &self.response
    }

    fn resource_handler(&self) -> Arc<dyn ResourceHandler> {
        Arc::clone(&self.handler)
    }

    fn release(self: Box<Self>) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

struct SpyFactory {
    counters: Arc<Counters>,
    handler: Arc<dyn ResourceHandler>,
}

impl ContextFactory for SpyFactory {
    fn acquire(
        &self,
        request: &DispatchRequest,
        response: ResponseHandle,
        _lifecycle: Arc<dyn LifecycleExecutor>,
    ) -> Result<Box<dyn RequestContext>, FactoryError> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(SpyContext {
            counters: Arc::clone(&self.counters),
            request: request.clone(),
            response,
            handler: Arc::clone(&self.handler),
        }))
    }
}

/// Lifecycle that renders a page naming the view, and fails with an
/// application fault when the extra path is `/boom`.
struct SpyLifecycle {
    counters: Arc<Counters>,
}

impl LifecycleExecutor for SpyLifecycle {
    fn execute(&self, context: &mut dyn RequestContext) -> Result<(), FrameworkFault> {
        self.counters.executed.fetch_add(1, Ordering::SeqCst);
        if context.request().path_info() == Some("/boom") {
            return Err(FrameworkFault::new("boom page"));
        }
        Ok(())
    }

    fn render(&self, context: &mut dyn RequestContext) -> Result<(), FrameworkFault> {
        self.counters.rendered.fetch_add(1, Ordering::SeqCst);
        let path = context.request().path().to_string();
        let response = context.response();
        response.set_content_type("text/html; charset=utf-8");
        response.write(format!("<html><body>view: {path}</body></html>").as_bytes());
        Ok(())
    }
}

/// Treats anything under `/assets/` as a static resource.
struct SpyAssets {
    counters: Arc<Counters>,
}

impl ResourceHandler for SpyAssets {
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
        self.counters.resource_handled.fetch_add(1, Ordering::SeqCst);
        context.response().write(b"asset bytes");
        Ok(())
    }
}

/// Start the server on an ephemeral port with spy collaborators.
pub async fn start_server(config: ControllerConfig) -> TestServer {
    let counters = Arc::new(Counters::default());

    let handler: Arc<dyn ResourceHandler> = Arc::new(SpyAssets {
        counters: Arc::clone(&counters),
    });
    let registry = StaticRegistry::new()
        .with_context_factory(Arc::new(SpyFactory {
            counters: Arc::clone(&counters),
            handler,
        }))
        .with_lifecycle(
            DEFAULT_LIFECYCLE_ID,
            Arc::new(SpyLifecycle {
                counters: Arc::clone(&counters),
            }),
        );

    let controller =
        Arc::new(DispatchController::init(&config, &registry).expect("controller init"));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let server = HttpServer::new(config, controller);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    TestServer { addr, counters }
}
