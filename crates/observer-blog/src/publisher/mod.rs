//! Publish orchestration.
//!
//! [`PublishOrchestrator`] runs the four publish use cases end to end. Each
//! one is a short linear pipeline:
//!
//! 1. Generate content (short-circuits without any remote call when there
//!    is no data)
//! 2. Render and upload diagrams, if the use case has any; the content is
//!    rendered afterwards so it can embed their URLs
//! 3. Fetch the current document
//! 4. Resolve the media it references
//! 5. Overwrite the document
//! 6. Delete the superseded media (best effort)
//!
//! A failure in steps 1-5 aborts the publish and is returned unchanged.
//! Deletion only ever happens after a successful write, so a published
//! document never references deleted media.
//!
//! # Example
//!
//! ```no_run
//! # async fn run(
//! #     content: &dyn observer_blog::ContentGenerator,
//! #     charts: &dyn observer_blog::ChartGenerator,
//! #     reading: &observer_data::Reading,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! use observer_blog::{DocumentRef, PublishOrchestrator, PublishTargets, WordPressClient};
//!
//! let client = WordPressClient::with_defaults(
//!     "https://blog.example.com/wp-json/wp/v2",
//!     "observer",
//!     "application password",
//! )?;
//! let targets = PublishTargets {
//!     overview: DocumentRef::content_block("146"),
//!     details: DocumentRef::page("148"),
//!     history: DocumentRef::page("150"),
//!     climate_alert: DocumentRef::content_block("152"),
//! };
//! let orchestrator = PublishOrchestrator::new(&client, content, charts, targets);
//!
//! let outcome = orchestrator.publish_overview(reading).await?;
//! println!("{}", outcome.content());
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::PublishOrchestrator;
pub use result::{CleanupFailure, NO_DATA_CONTENT, PublishOutcome, PublishReport};

use observer_config::DocumentsConfig;

use crate::types::DocumentRef;

/// Remote documents the use cases publish into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTargets {
    pub overview: DocumentRef,
    pub details: DocumentRef,
    pub history: DocumentRef,
    pub climate_alert: DocumentRef,
}

impl PublishTargets {
    /// Targets from the `[documents]` config section.
    #[must_use]
    pub fn from_config(config: &DocumentsConfig) -> Self {
        Self {
            overview: DocumentRef::content_block(config.overview.to_string()),
            details: DocumentRef::page(config.details.to_string()),
            history: DocumentRef::page(config.history.to_string()),
            climate_alert: DocumentRef::content_block(config.climate_alert.to_string()),
        }
    }
}
