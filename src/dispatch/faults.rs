//! Fault taxonomy and translation for the dispatch boundary.
//!
//! # Responsibilities
//! - Define the generic application-layer fault raised by collaborators
//! - Define the transport-level errors surfaced by `service()`
//! - Classify application faults into transport faults exactly once
//!
//! # Design Decisions
//! - Classification is a pure function returning a tagged disposition;
//!   the controller decides how to propagate each tag
//! - Pass-through tags preserve the original cause by value, so callers
//!   never see a double-wrapped error

use thiserror::Error;

/// Boxed root cause carried inside a fault.
pub type FaultCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Generic application-layer fault raised by the lifecycle executor and
/// the resource handler. May wrap an underlying cause of any type.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FrameworkFault {
    message: String,
    #[source]
    cause: Option<FaultCause>,
}

impl FrameworkFault {
    /// Create a fault with no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create a fault wrapping an underlying cause.
    pub fn with_cause(message: impl Into<String>, cause: FaultCause) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// The fault message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether an underlying cause is recorded.
    pub fn has_cause(&self) -> bool {
        self.cause.is_some()
    }

    /// Take the underlying cause, or get the fault back when none is
    /// recorded.
    fn into_cause(self) -> Result<FaultCause, Self> {
        match self.cause {
            Some(cause) => Ok(cause),
            None => Err(Self {
                message: self.message,
                cause: None,
            }),
        }
    }
}

/// Transport-level processing error. This is what lifecycle failures look
/// like to the caller of `service()`: a message plus, when known, the true
/// underlying cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProcessingError {
    message: String,
    #[source]
    cause: Option<FaultCause>,
}

impl ProcessingError {
    /// Create a processing error with no recorded cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create a processing error carrying its root cause.
    pub fn with_cause(message: impl Into<String>, cause: FaultCause) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error surfaced by [`DispatchController::service`].
///
/// [`DispatchController::service`]: crate::dispatch::DispatchController::service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport I/O failure, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Transport processing failure.
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Outcome of classifying a [`FrameworkFault`] at the dispatch boundary.
#[derive(Debug)]
pub enum FaultDisposition {
    /// A new processing error was constructed (no cause, or a cause of an
    /// unrecognized type).
    Processing(ProcessingError),

    /// The root cause was already an I/O error; propagate it as-is.
    PassThroughIo(std::io::Error),

    /// The root cause was already a processing error; propagate it as-is.
    PassThroughProcessing(ProcessingError),
}

impl From<FaultDisposition> for ServiceError {
    fn from(disposition: FaultDisposition) -> Self {
        match disposition {
            FaultDisposition::Processing(e) | FaultDisposition::PassThroughProcessing(e) => {
                ServiceError::Processing(e)
            }
            FaultDisposition::PassThroughIo(e) => ServiceError::Io(e),
        }
    }
}

/// Unwrap a [`FrameworkFault`] into a transport-level disposition.
///
/// - No cause: a new processing error carrying the fault's message, with
///   the fault itself recorded as the root cause.
/// - Cause is a [`ProcessingError`] or [`std::io::Error`]: passed through
///   by value, identity preserved.
/// - Any other cause: a new processing error built from the cause's
///   message, with the cause attached.
pub fn classify(fault: FrameworkFault) -> FaultDisposition {
    let cause = match fault.into_cause() {
        Err(envelope) => {
            let message = envelope.message().to_owned();
            return FaultDisposition::Processing(ProcessingError::with_cause(
                message,
                Box::new(envelope),
            ));
        }
        Ok(cause) => cause,
    };

    let cause = match cause.downcast::<ProcessingError>() {
        Ok(processing) => return FaultDisposition::PassThroughProcessing(*processing),
        Err(other) => other,
    };

    let cause = match cause.downcast::<std::io::Error>() {
        Ok(io) => return FaultDisposition::PassThroughIo(*io),
        Err(other) => other,
    };

    let message = cause.to_string();
    FaultDisposition::Processing(ProcessingError::with_cause(message, cause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_no_cause_wraps_envelope() {
        let fault = FrameworkFault::new("view expired");

        match classify(fault) {
            FaultDisposition::Processing(e) => {
                assert_eq!(e.message(), "view expired");
                let source = e.source().expect("envelope recorded as cause");
                assert_eq!(source.to_string(), "view expired");
                assert!(source.downcast_ref::<FrameworkFault>().is_some());
            }
            other => panic!("expected Processing, got {:?}", other),
        }
    }

    #[test]
    fn test_io_cause_passes_through() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "client went away");
        let fault = FrameworkFault::with_cause("render failed", Box::new(io));

        match classify(fault) {
            FaultDisposition::PassThroughIo(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe);
                assert_eq!(e.to_string(), "client went away");
            }
            other => panic!("expected PassThroughIo, got {:?}", other),
        }
    }

    #[test]
    fn test_processing_cause_passes_through() {
        let processing = ProcessingError::new("phase listener blew up");
        let fault = FrameworkFault::with_cause("execute failed", Box::new(processing));

        match classify(fault) {
            FaultDisposition::PassThroughProcessing(e) => {
                assert_eq!(e.message(), "phase listener blew up");
            }
            other => panic!("expected PassThroughProcessing, got {:?}", other),
        }
    }

    #[test]
    fn test_other_cause_is_rewrapped() {
        let fault = FrameworkFault::with_cause("render failed", Box::new(std::fmt::Error));

        match classify(fault) {
            FaultDisposition::Processing(e) => {
                assert_eq!(e.message(), std::fmt::Error.to_string());
                let source = e.source().expect("cause attached");
                assert!(source.downcast_ref::<std::fmt::Error>().is_some());
            }
            other => panic!("expected Processing, got {:?}", other),
        }
    }

    #[test]
    fn test_service_error_from_disposition() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow peer");
        let err: ServiceError = FaultDisposition::PassThroughIo(io).into();
        assert!(matches!(err, ServiceError::Io(_)));

        let err: ServiceError =
            FaultDisposition::Processing(ProcessingError::new("bad state")).into();
        assert!(matches!(err, ServiceError::Processing(_)));
    }
}
