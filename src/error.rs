//! Typed error taxonomy exposed to state consumers.
//!
//! Every failure surfaced through the container is one of three kinds:
//! caller mistakes (`Validation`), persistence failures (`Storage`), and a
//! catch-all for anything unclassified (`Unknown`). All variants carry only
//! owned strings so errors can ride inside cloned, comparable state
//! snapshots.

use thiserror::Error;

/// Failure reported by the record service or the state container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Caller-supplied data violates a documented invariant. Always
    /// recoverable by correcting input.
    #[error("{message}")]
    Validation { message: String },

    /// The underlying persistence engine failed. Recoverable by retry or a
    /// fresh load.
    #[error("{message}")]
    Storage {
        message: String,
        details: Option<String>,
    },

    /// Anything not classified as validation or storage.
    #[error("{message}")]
    Unknown {
        message: String,
        details: Option<String>,
    },
}

impl RecordError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn unknown(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            details,
        }
    }

    /// User-facing, non-technical description of the failure.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Storage { message, .. }
            | Self::Unknown { message, .. } => message,
        }
    }

    /// Technical detail suitable for a collapsed "details" affordance.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Validation { .. } => None,
            Self::Storage { details, .. } | Self::Unknown { details, .. } => details.as_deref(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
