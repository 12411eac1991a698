//! Error types for webhook delivery.
//!
//! Encoding failures surface before any HTTP activity; transport failures
//! pass through from the HTTP client untranslated, since interpreting them
//! (or the response) is explicitly not this layer's job. A failed send leaves
//! the message valid and re-sendable.

use klaxon_core::CoreError;
use thiserror::Error;

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Error type for webhook delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Payload could not be encoded to JSON; no HTTP call was attempted.
    #[error("payload encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Transport-level failure, passed through from the HTTP client as-is.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Client could not be constructed from the given configuration.
    #[error("invalid client configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Message composition failure crossing the delivery API.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl DeliveryError {
    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Whether this error came from the HTTP transport.
    ///
    /// Transport errors mean the POST itself failed; everything else failed
    /// before a request was issued.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
