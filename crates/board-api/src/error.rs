//! Error types for the board-api crate.

use thiserror::Error;

/// Errors that can occur when talking to the settings endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Server rejected the bearer token.
    #[error("Unauthorized. Run `wb login <token>` with a valid token.")]
    Unauthorized,

    /// Server asked us to slow down.
    #[error("Rate limited{}", .retry_after.as_ref().map(|r| format!(", retry after {r}")).unwrap_or_default())]
    RateLimited {
        /// Raw `Retry-After` header value, if the server sent one.
        retry_after: Option<String>,
    },

    /// Server returned a 5xx status.
    #[error("Server error: HTTP {0}")]
    Server(u16),

    /// Server returned a status we have no mapping for.
    #[error("Unexpected response: HTTP {0}")]
    Unexpected(u16),

    /// Response body was not the expected JSON shape.
    #[error("Failed to parse settings response: {0}")]
    Parse(String),

    /// Base URL could not be combined with the endpoint path.
    #[error("Invalid base URL '{0}'")]
    InvalidUrl(String),
}
