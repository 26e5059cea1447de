//! Error types for the WordPress integration.

/// Error from WordPress REST API operations.
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    /// The referenced document or media does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Resource path relative to the REST root, e.g. `pages/148`.
        resource: String,
    },

    /// Server returned an error status or a response we cannot use.
    #[error("HTTP error: {status} - {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body or a description of what was missing.
        message: String,
    },

    /// Connection-level failure (DNS, refused connection, timeout, etc).
    #[error("HTTP request failed")]
    Transport(#[from] reqwest::Error),
}
