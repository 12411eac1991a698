//! Error types for message composition.
//!
//! Composition failures are synchronous and leave the builder unchanged:
//! a rejected attachment never partially mutates the owning message.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Error type for message and configuration building.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// Input that is neither an attachment nor structured card data,
    /// or a required value (such as the target URL) that is missing.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected input
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid-input error from a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }
}
