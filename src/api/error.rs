//! Error types for outbound API calls.

use thiserror::Error;

/// Error type for outbound API calls.
///
/// Covers transport and request-building failures only. HTTP-level
/// failures (4xx/5xx) are reported through the returned response untouched;
/// this client does not retry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused, and
    /// other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the client's timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A configured value could not be encoded as an HTTP header.
    #[error("Invalid value for header '{name}': {reason}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Serialize(#[from] serde_json::Error),
}
