//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ControllerConfig (validated, immutable)
//!     → consulted once at controller init
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Two lifecycle-id scopes: the dispatch scope overrides the
//!   application scope, mirroring per-controller vs app-wide settings

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ApplicationConfig;
pub use schema::ControllerConfig;
pub use schema::DispatchConfig;
pub use schema::ListenerConfig;
pub use schema::TimeoutConfig;
