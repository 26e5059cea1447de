//! Publish result types.

use crate::types::{DocumentRef, Image};

/// Placeholder content when there is nothing to publish.
pub const NO_DATA_CONTENT: &str = "<h3>Keine Daten vorhanden</h3>";

/// Outcome of a publish that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// No data; the remote system was not contacted.
    NoData,
    /// The document was rewritten.
    Published(PublishReport),
}

impl PublishOutcome {
    /// The content that was published, or the no-data placeholder.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::NoData => NO_DATA_CONTENT,
            Self::Published(report) => &report.content,
        }
    }

    /// The report, if the document was rewritten.
    #[must_use]
    pub fn report(&self) -> Option<&PublishReport> {
        match self {
            Self::NoData => None,
            Self::Published(report) => Some(report),
        }
    }
}

/// What a successful publish changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Document that was rewritten.
    pub document: DocumentRef,
    /// Content written to it.
    pub content: String,
    /// Media uploaded for this publish.
    pub uploaded: Vec<Image>,
    /// Superseded media ids that were deleted.
    pub retired: Vec<String>,
    /// Superseded media that could not be deleted.
    pub cleanup_failures: Vec<CleanupFailure>,
}

impl PublishReport {
    /// True if every superseded media item was deleted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.cleanup_failures.is_empty()
    }
}

/// A best-effort media deletion that failed after the document was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    /// Media item left behind.
    pub media_id: String,
    /// Error chain of the failed delete.
    pub message: String,
}
