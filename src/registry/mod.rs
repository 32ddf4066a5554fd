//! Collaborator discovery.
//!
//! # Responsibilities
//! - Resolve the context factory and lifecycle implementations the
//!   controller binds to at startup
//! - Report resolution failures as startup-grade errors
//!
//! # Design Decisions
//! - Typed resolution methods instead of a stringly-typed `resolve(kind)`
//!   call; the compiler keeps callers honest about what they get back
//! - `StaticRegistry` covers the common embedding case (explicit
//!   registration at wiring time); frameworks with their own discovery
//!   mechanism implement [`CollaboratorRegistry`] over it

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::context::ContextFactory;
use crate::lifecycle::LifecycleExecutor;

/// Resolution failure from a [`CollaboratorRegistry`] or a
/// [`ContextFactory`].
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Nothing registered for the requested kind.
    #[error("no {kind} implementation registered")]
    NotRegistered { kind: &'static str },

    /// A lifecycle was requested under an id nobody registered.
    #[error("unknown lifecycle id {id:?}")]
    UnknownLifecycle { id: String },

    /// An implementation-specific resolution failure.
    #[error("{kind} resolution failed: {message}")]
    Resolution { kind: &'static str, message: String },
}

/// Capability lookup the controller resolves its collaborators from.
pub trait CollaboratorRegistry: Send + Sync {
    /// The factory producing per-request contexts.
    fn context_factory(&self) -> Result<Arc<dyn ContextFactory>, FactoryError>;

    /// The lifecycle executor registered under `id`.
    fn lifecycle(&self, id: &str) -> Result<Arc<dyn LifecycleExecutor>, FactoryError>;
}

/// Registry populated explicitly at wiring time.
#[derive(Default)]
pub struct StaticRegistry {
    context_factory: Option<Arc<dyn ContextFactory>>,
    lifecycles: HashMap<String, Arc<dyn LifecycleExecutor>>,
}

impl StaticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the context factory.
    pub fn with_context_factory(mut self, factory: Arc<dyn ContextFactory>) -> Self {
        self.context_factory = Some(factory);
        self
    }

    /// Register a lifecycle executor under an identifier.
    pub fn with_lifecycle(
        mut self,
        id: impl Into<String>,
        lifecycle: Arc<dyn LifecycleExecutor>,
    ) -> Self {
        self.lifecycles.insert(id.into(), lifecycle);
        self
    }
}

impl CollaboratorRegistry for StaticRegistry {
    fn context_factory(&self) -> Result<Arc<dyn ContextFactory>, FactoryError> {
        self.context_factory
            .clone()
            .ok_or(FactoryError::NotRegistered {
                kind: "context factory",
            })
    }

    fn lifecycle(&self, id: &str) -> Result<Arc<dyn LifecycleExecutor>, FactoryError> {
        self.lifecycles
            .get(id)
            .cloned()
            .ok_or_else(|| FactoryError::UnknownLifecycle { id: id.to_string() })
    }
}
