//! HTTP method admission control.
//!
//! # Responsibilities
//! - Build the allowed-method set once at controller startup
//! - Answer per-request verb checks without locking
//! - Warn the operator about configured tokens outside HTTP/1.1
//!
//! # Design Decisions
//! - Method comparison is case-sensitive (HTTP method tokens are)
//! - Unrecognized configured tokens are warned about, not rejected;
//!   enforcement uses the configured tokens verbatim
//! - Read-only after construction, so concurrent `is_allowed` calls need
//!   no synchronization

use std::collections::HashSet;

/// Recognized HTTP/1.1 method tokens, upper case per the RFC.
const CANONICAL_METHODS: [&str; 8] = [
    "OPTIONS", "GET", "HEAD", "POST", "PUT", "DELETE", "TRACE", "CONNECT",
];

/// Configured token that admits every method.
const WILDCARD_METHOD: &str = "*";

/// Per-controller set of HTTP methods admitted into dispatch.
///
/// Built once by [`initialize`](AdmissionTable::initialize), immutable
/// during request processing, cleared by
/// [`teardown`](AdmissionTable::teardown).
#[derive(Debug)]
pub struct AdmissionTable {
    allowed: HashSet<String>,
    allow_all: bool,
    active: bool,
}

impl AdmissionTable {
    /// Build the table from the configured whitespace-delimited method
    /// list. `None` and an empty string both yield the default set: every
    /// canonical HTTP/1.1 method, wildcard excluded.
    pub fn initialize(configured: Option<&str>) -> Self {
        let canonical: HashSet<&str> = CANONICAL_METHODS
            .iter()
            .copied()
            .chain([WILDCARD_METHOD])
            .collect();

        let tokens: Vec<&str> = configured
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default();

        for token in &tokens {
            if !canonical.contains(token) {
                tracing::warn!(
                    method = %token,
                    recognized = ?canonical,
                    "configured HTTP method is not a recognized token"
                );
            }
        }

        let allowed: HashSet<String> = if tokens.is_empty() {
            CANONICAL_METHODS.iter().map(|m| m.to_string()).collect()
        } else {
            tokens.iter().map(|m| m.to_string()).collect()
        };
        let allow_all = allowed.contains(WILDCARD_METHOD);

        Self {
            allowed,
            allow_all,
            active: true,
        }
    }

    /// Whether a request with this verb may enter dispatch. Pure and
    /// side-effect free; safe to call from any number of request threads.
    pub fn is_allowed(&self, verb: &str) -> bool {
        self.allow_all || self.allowed.contains(verb)
    }

    /// Clear the table. Calling this twice is a programming-contract
    /// violation and panics.
    pub fn teardown(&mut self) {
        assert!(self.active, "admission table torn down twice");
        self.allowed.clear();
        self.allow_all = false;
        self.active = false;
    }
}
