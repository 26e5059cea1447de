//! Reporting periods and daily aggregates.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Sensor;

/// Half-open time span a publish reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Start of the span.
    pub start: DateTime<Utc>,
    /// End of the span.
    pub end: DateTime<Utc>,
}

impl Period {
    /// Create a period.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Daily minimum, average and maximum of one sensor's climate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateMeasurementBoundaries {
    /// Sensor the aggregate belongs to.
    pub sensor: Arc<Sensor>,
    /// Day the aggregate covers.
    pub day: NaiveDate,
    pub minimum_temperature: f64,
    pub average_temperature: f64,
    pub maximum_temperature: f64,
    pub minimum_humidity: f64,
    pub average_humidity: f64,
    pub maximum_humidity: f64,
}
