//! Contracts for the content and chart generators.
//!
//! Both are external collaborators: the publisher only passes domain data in
//! and receives opaque HTML or image bytes back. Inputs are immutable render
//! contexts built once per step.

use std::collections::BTreeMap;
use std::error::Error;

use async_trait::async_trait;
use observer_data::{
    BoundaryData, ClimateData, ClimateMeasurementBoundaries, OperatingEvent, Period, Reading,
    Sensor,
};

use crate::types::Image;

/// Error reported by a content or chart generator.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct GenerateError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl GenerateError {
    /// Create an error with a message only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping its cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Input for the 24 hour details page.
#[derive(Debug, Clone, Copy)]
pub struct DetailsContext<'a> {
    /// The 24 hours covered by the page.
    pub period: Period,
    /// Measurements per sensor within `period`.
    pub data: &'a ClimateData,
    /// Published 24 hour chart.
    pub diagram: &'a Image,
}

/// Both published history charts of one sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDiagrams {
    /// Daily temperature boundaries chart.
    pub temperature: Image,
    /// Daily humidity boundaries chart.
    pub humidity: Image,
}

/// Input for the 365 day history page.
#[derive(Debug, Clone, Copy)]
pub struct HistoryContext<'a> {
    /// The 365 days covered by the page.
    pub period: Period,
    /// Daily boundaries per sensor within `period`.
    pub data: &'a BoundaryData,
    /// Published charts of every sensor with boundaries.
    pub diagrams: &'a BTreeMap<Sensor, HistoryDiagrams>,
}

/// Input for the climate alert.
#[derive(Debug, Clone, Copy)]
pub struct ClimateAlertContext<'a> {
    /// Window the alert looks at.
    pub period: Period,
    /// Measurements per sensor within `period`.
    pub data: &'a ClimateData,
}

/// Renders HTML fragments from domain data.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_overview(&self, reading: &Reading) -> Result<String, GenerateError>;

    async fn generate_details(&self, context: DetailsContext<'_>) -> Result<String, GenerateError>;

    async fn generate_history(&self, context: HistoryContext<'_>) -> Result<String, GenerateError>;

    /// `None` means there is nothing worth alerting about.
    async fn generate_climate_alert(
        &self,
        context: ClimateAlertContext<'_>,
    ) -> Result<Option<String>, GenerateError>;

    async fn generate_operating_alert(
        &self,
        events: &[OperatingEvent],
    ) -> Result<String, GenerateError>;
}

/// Renders charts into raster images.
#[async_trait]
pub trait ChartGenerator: Send + Sync {
    async fn create_24_hour_chart(
        &self,
        period: Period,
        data: &ClimateData,
    ) -> Result<Vec<u8>, GenerateError>;

    async fn create_365_day_temperature_chart(
        &self,
        period: Period,
        data: &[ClimateMeasurementBoundaries],
        sensor: &Sensor,
    ) -> Result<Vec<u8>, GenerateError>;

    async fn create_365_day_humidity_chart(
        &self,
        period: Period,
        data: &[ClimateMeasurementBoundaries],
        sensor: &Sensor,
    ) -> Result<Vec<u8>, GenerateError>;
}
