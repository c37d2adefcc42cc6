use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur when talking to an Autodarts board
#[derive(Error, Debug)]
pub enum BoardError {
    /// HTTP transport error (connection refused, reset, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the fixed per-request timeout
    #[error("Request timeout")]
    Timeout,

    /// Board responded but the payload could not be parsed
    #[error("Malformed payload: {reason} | data: {excerpt}")]
    Payload {
        /// Parse error description
        reason: String,
        /// Truncated raw body for diagnostics
        excerpt: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The monitor was stopped and no further events will arrive
    #[error("Monitor stopped")]
    MonitorStopped,

    /// Event channel error
    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl BoardError {
    /// True when the error means the board could not be reached at all,
    /// as opposed to a reachable board returning a broken payload.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, BoardError::Http(_) | BoardError::Timeout)
    }
}
