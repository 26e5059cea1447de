//! Publish error types.

use crate::error::BlogError;
use crate::generator::GenerateError;

/// Error that aborted a publish.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// A remote call failed.
    #[error(transparent)]
    Remote(#[from] BlogError),

    /// The content generator failed.
    #[error("content generation failed: {0}")]
    Content(#[source] GenerateError),

    /// The chart generator failed.
    #[error("chart generation failed: {0}")]
    Chart(#[source] GenerateError),
}
