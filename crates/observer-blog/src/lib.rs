//! WordPress publishing for the climate observer.
//!
//! Turns sensor data into published blog content. Content and chart
//! generation are delegated to [`ContentGenerator`] and [`ChartGenerator`];
//! this crate owns everything that talks to WordPress:
//!
//! - [`WordPressClient`]: REST client behind the [`RemoteResourceClient`] contract
//! - [`DiagramPublisher`]: uploads a chart and resolves its URLs
//! - [`extract_media_id`] / [`extract_media_ids`]: find the media a document embeds
//! - [`PublishOrchestrator`]: the four publish use cases

mod client;
mod diagram;
mod error;
mod generator;
mod media_reference;
mod publisher;
#[cfg(test)]
mod testing;
mod types;

pub use client::{RemoteResourceClient, WordPressClient};
pub use diagram::{DiagramPublisher, diagram_filename};
pub use error::BlogError;
pub use generator::{
    ChartGenerator, ClimateAlertContext, ContentGenerator, DetailsContext, GenerateError,
    HistoryContext, HistoryDiagrams,
};
pub use media_reference::{
    MEDIA_REFERENCE_VERSION, extract_media_id, extract_media_ids, media_reference,
};
pub use publisher::{
    CleanupFailure, NO_DATA_CONTENT, PublishError, PublishOrchestrator, PublishOutcome,
    PublishReport, PublishTargets,
};
pub use types::{DocumentKind, DocumentRef, Image};
