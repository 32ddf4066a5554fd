//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the parsed config

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ControllerConfig;

/// A single semantic problem found in a parsed configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("dispatch.mapping_prefix {0:?} must start with '/'")]
    MappingPrefixNotAbsolute(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &ControllerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !config.dispatch.mapping_prefix.starts_with('/') {
        errors.push(ValidationError::MappingPrefixNotAbsolute(
            config.dispatch.mapping_prefix.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ControllerConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = ControllerConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.dispatch.mapping_prefix = "app".to_string();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).expect_err("invalid config");
        assert_eq!(errors.len(), 3);
    }
}
