//! Request dispatch subsystem: the front controller core.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → admission.rs (HTTP verb gate, 400 on refusal)
//!     → controller.rs (reserved-path gate, 404 on refusal)
//!     → ContextFactory.acquire (one context per request)
//!     → ResourceHandler OR LifecycleExecutor execute + render
//!     → faults.rs (classify application faults, exactly once)
//!     → RequestContext.release (guaranteed, every exit path)
//! ```
//!
//! # Design Decisions
//! - All gating happens before a context exists; rejected requests
//!   allocate nothing and release nothing
//! - Fault translation lives in a pure function so the policy is
//!   testable without any collaborator in place

pub mod admission;
pub mod controller;
pub mod faults;

pub use admission::AdmissionTable;
pub use controller::{DispatchController, StartupError};
pub use faults::{classify, FaultDisposition, FrameworkFault, ProcessingError, ServiceError};
