//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! front controller. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the front controller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ControllerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Controller-scope dispatch settings.
    pub dispatch: DispatchConfig,

    /// Application-wide settings consulted when the dispatch scope is
    /// silent.
    pub application: ApplicationConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Dispatch settings scoped to one controller instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Whitespace-separated HTTP methods admitted into dispatch. Absent
    /// or empty means the canonical HTTP/1.1 set; `*` admits any method.
    pub allowed_http_methods: Option<String>,

    /// Lifecycle variant to dispatch through. Overrides the
    /// application-wide setting.
    pub lifecycle_id: Option<String>,

    /// Path prefix the controller is mounted under.
    pub mapping_prefix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            allowed_http_methods: None,
            lifecycle_id: None,
            mapping_prefix: "/".to_string(),
        }
    }
}

/// Application-wide settings (the broad configuration scope).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application-wide lifecycle variant, used when the dispatch scope
    /// names none.
    pub lifecycle_id: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}
