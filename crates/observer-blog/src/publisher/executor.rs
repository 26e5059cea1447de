//! Publish orchestrator implementation.

use std::collections::BTreeMap;
use std::error::Error;

use observer_data::{BoundaryData, ClimateData, Period, Reading, Sensor};
use tracing::{info, warn};

use crate::client::RemoteResourceClient;
use crate::diagram::DiagramPublisher;
use crate::generator::{
    ChartGenerator, ClimateAlertContext, ContentGenerator, DetailsContext, HistoryContext,
    HistoryDiagrams,
};
use crate::media_reference::{extract_media_id, extract_media_ids};
use crate::types::{DocumentRef, Image};

use super::PublishTargets;
use super::error::PublishError;
use super::result::{CleanupFailure, PublishOutcome, PublishReport};

/// Filename prefix of the 24 hour chart.
const DETAILS_DIAGRAM_PREFIX: &str = "verlauf";
/// Filename prefix of a sensor's 365 day temperature chart.
const TEMPERATURE_DIAGRAM_PREFIX: &str = "temperatur";
/// Filename prefix of a sensor's 365 day humidity chart.
const HUMIDITY_DIAGRAM_PREFIX: &str = "luftfeuchtigkeit";

/// Which media referenced by the current document a publish supersedes.
#[derive(Debug, Clone, Copy)]
enum Superseded {
    /// Nothing; the use case uploads no media.
    Nothing,
    /// The single diagram of the document.
    FirstReference,
    /// Every diagram of the document.
    AllReferences,
}

impl Superseded {
    fn resolve(self, body: &str) -> Vec<String> {
        match self {
            Self::Nothing => Vec::new(),
            Self::FirstReference => extract_media_id(body).into_iter().collect(),
            Self::AllReferences => extract_media_ids(body),
        }
    }
}

/// Publishes generated content and charts into the remote documents.
///
/// Steps of one publish run strictly one after another. Independent
/// publishes share no state and may run concurrently as long as they
/// target different documents.
pub struct PublishOrchestrator<'a> {
    client: &'a dyn RemoteResourceClient,
    content: &'a dyn ContentGenerator,
    charts: &'a dyn ChartGenerator,
    targets: PublishTargets,
}

impl<'a> PublishOrchestrator<'a> {
    /// Create a new orchestrator.
    #[must_use]
    pub fn new(
        client: &'a dyn RemoteResourceClient,
        content: &'a dyn ContentGenerator,
        charts: &'a dyn ChartGenerator,
        targets: PublishTargets,
    ) -> Self {
        Self {
            client,
            content,
            charts,
            targets,
        }
    }

    /// Documents this orchestrator publishes into.
    pub fn targets(&self) -> &PublishTargets {
        &self.targets
    }

    /// Publish the latest reading into the overview content block.
    ///
    /// A reading without climate measurements leaves the block untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if content generation, the document fetch or the
    /// document write fails.
    pub async fn publish_overview(&self, reading: &Reading) -> Result<PublishOutcome, PublishError> {
        if reading.climate_measurements().next().is_none() {
            info!("Reading has no climate measurements, skipping overview");
            return Ok(PublishOutcome::NoData);
        }

        let content = self
            .content
            .generate_overview(reading)
            .await
            .map_err(PublishError::Content)?;

        self.replace_document(&self.targets.overview, content, Vec::new(), Superseded::Nothing)
            .await
    }

    /// Publish the 24 hour details page with its chart.
    ///
    /// The chart is uploaded before the content is rendered, because the
    /// content embeds its URL. The chart it replaces is deleted after the
    /// page was written.
    ///
    /// # Errors
    ///
    /// Returns an error if chart or content generation, the upload, the page
    /// fetch or the page write fails. A failed delete of the old chart is
    /// reported in the outcome instead.
    pub async fn publish_details(
        &self,
        period: Period,
        data: &ClimateData,
    ) -> Result<PublishOutcome, PublishError> {
        if is_empty(data) {
            info!("No climate measurements, skipping details");
            return Ok(PublishOutcome::NoData);
        }

        let chart = self
            .charts
            .create_24_hour_chart(period, data)
            .await
            .map_err(PublishError::Chart)?;
        let diagram = self
            .diagrams()
            .publish(&chart, DETAILS_DIAGRAM_PREFIX)
            .await?;

        let context = DetailsContext {
            period,
            data,
            diagram: &diagram,
        };
        let content = self
            .content
            .generate_details(context)
            .await
            .map_err(PublishError::Content)?;

        self.replace_document(
            &self.targets.details,
            content,
            vec![diagram],
            Superseded::FirstReference,
        )
        .await
    }

    /// Publish the 365 day history page with two charts per sensor.
    ///
    /// All charts are uploaded before the page is touched. Sensors without
    /// boundaries get no charts. If any sensor's chart fails the whole
    /// publish fails; the page is never half updated.
    ///
    /// # Errors
    ///
    /// Same as [`publish_details`](Self::publish_details).
    pub async fn publish_history(
        &self,
        period: Period,
        data: &BoundaryData,
    ) -> Result<PublishOutcome, PublishError> {
        if is_empty(data) {
            info!("No climate boundaries, skipping history");
            return Ok(PublishOutcome::NoData);
        }

        let publisher = self.diagrams();
        let mut diagrams = BTreeMap::new();
        for (sensor, boundaries) in data.iter().filter(|(_, b)| !b.is_empty()) {
            let temperature_chart = self
                .charts
                .create_365_day_temperature_chart(period, boundaries, sensor)
                .await
                .map_err(PublishError::Chart)?;
            let temperature = publisher
                .publish(
                    &temperature_chart,
                    &format!("{TEMPERATURE_DIAGRAM_PREFIX}-{}", sensor.sgtin),
                )
                .await?;

            let humidity_chart = self
                .charts
                .create_365_day_humidity_chart(period, boundaries, sensor)
                .await
                .map_err(PublishError::Chart)?;
            let humidity = publisher
                .publish(
                    &humidity_chart,
                    &format!("{HUMIDITY_DIAGRAM_PREFIX}-{}", sensor.sgtin),
                )
                .await?;

            diagrams.insert(
                sensor.clone(),
                HistoryDiagrams {
                    temperature,
                    humidity,
                },
            );
        }

        let context = HistoryContext {
            period,
            data,
            diagrams: &diagrams,
        };
        let content = self
            .content
            .generate_history(context)
            .await
            .map_err(PublishError::Content)?;

        let uploaded = diagrams
            .into_values()
            .flat_map(|d| [d.temperature, d.humidity])
            .collect();
        self.replace_document(
            &self.targets.history,
            content,
            uploaded,
            Superseded::AllReferences,
        )
        .await
    }

    /// Publish the climate alert content block.
    ///
    /// Nothing is published when the generator finds nothing to alert about.
    ///
    /// # Errors
    ///
    /// Returns an error if content generation, the document fetch or the
    /// document write fails.
    pub async fn publish_climate_alert(
        &self,
        period: Period,
        data: &ClimateData,
    ) -> Result<PublishOutcome, PublishError> {
        if is_empty(data) {
            info!("No climate measurements, skipping climate alert");
            return Ok(PublishOutcome::NoData);
        }

        let context = ClimateAlertContext { period, data };
        let Some(content) = self
            .content
            .generate_climate_alert(context)
            .await
            .map_err(PublishError::Content)?
        else {
            info!("Nothing to alert about, skipping climate alert");
            return Ok(PublishOutcome::NoData);
        };

        self.replace_document(
            &self.targets.climate_alert,
            content,
            Vec::new(),
            Superseded::Nothing,
        )
        .await
    }

    fn diagrams(&self) -> DiagramPublisher<'a> {
        DiagramPublisher::new(self.client)
    }

    /// Fetch, rewrite, then retire what the new content no longer shows.
    async fn replace_document(
        &self,
        document: &DocumentRef,
        content: String,
        uploaded: Vec<Image>,
        superseded: Superseded,
    ) -> Result<PublishOutcome, PublishError> {
        let current = self.client.read_document(document).await?;

        // Never retire media the new content embeds.
        let stale: Vec<String> = superseded
            .resolve(&current)
            .into_iter()
            .filter(|id| !uploaded.iter().any(|image| &image.id == id))
            .collect();

        self.client.write_document(document, &content).await?;
        info!("Published {} ({} new media)", document, uploaded.len());

        let (retired, cleanup_failures) = self.retire_media(stale).await;

        Ok(PublishOutcome::Published(PublishReport {
            document: document.clone(),
            content,
            uploaded,
            retired,
            cleanup_failures,
        }))
    }

    /// Delete superseded media one by one. Failures are collected, not raised.
    async fn retire_media(&self, ids: Vec<String>) -> (Vec<String>, Vec<CleanupFailure>) {
        let mut retired = Vec::new();
        let mut failures = Vec::new();

        for id in ids {
            match self.client.delete_media(&id).await {
                Ok(()) => retired.push(id),
                Err(err) => {
                    let message = error_chain(&err);
                    warn!(media_id = %id, error = %message, "Could not delete superseded media");
                    failures.push(CleanupFailure {
                        media_id: id,
                        message,
                    });
                }
            }
        }

        (retired, failures)
    }
}

fn is_empty<T>(data: &BTreeMap<Sensor, Vec<T>>) -> bool {
    data.values().all(Vec::is_empty)
}

/// Walk the error source chain and join all messages.
fn error_chain(err: &dyn Error) -> String {
    let mut msgs = vec![err.to_string()];
    let mut source = err.source();
    while let Some(s) = source {
        msgs.push(s.to_string());
        source = s.source();
    }
    msgs.join(": ")
}
