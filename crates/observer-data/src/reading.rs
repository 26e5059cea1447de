//! Timestamped batch of measurements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ClimateMeasurement, Measurement, OperatingMeasurement};

/// One timestamped batch of measurements.
///
/// The reading owns its measurements; they are created and dropped together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// When the batch was taken.
    pub reading_time: DateTime<Utc>,
    /// Measurements taken at `reading_time`, in no particular order.
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Reading {
    /// Create an empty reading.
    #[must_use]
    pub fn new(reading_time: DateTime<Utc>) -> Self {
        Self {
            reading_time,
            measurements: Vec::new(),
        }
    }

    /// Add a measurement (builder style).
    #[must_use]
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurements.push(measurement);
        self
    }

    /// True if the reading carries no measurements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Climate measurements, in insertion order.
    pub fn climate_measurements(&self) -> impl Iterator<Item = &ClimateMeasurement> {
        self.measurements.iter().filter_map(Measurement::as_climate)
    }

    /// The operating measurement, if one was taken.
    #[must_use]
    pub fn operating_measurement(&self) -> Option<&OperatingMeasurement> {
        self.measurements.iter().find_map(Measurement::as_operating)
    }
}
