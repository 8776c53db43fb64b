//! Errors surfaced by the share writer and reader.

use thiserror::Error;

/// Outcome categories for share operations.
///
/// Store failures never carry the driver's message; the details are logged
/// where the failure is caught.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The request was malformed or failed validation.
    #[error("{0}")]
    InvalidInput(String),
    /// No live share matches the identifier.
    #[error("Share not found or expired")]
    NotFound,
    /// The share store could not complete the operation.
    #[error("Share store is unavailable, try again later")]
    StoreUnavailable,
}

impl ShareError {
    /// Creates an invalid-input error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
