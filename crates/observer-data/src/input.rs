//! JSON documents carrying publish input.
//!
//! Measurements are stored flat; [`group_by_sensor`](crate::group_by_sensor)
//! turns them into the per-sensor maps the generators work on.

use serde::Deserialize;

use crate::{
    BoundaryData, ClimateData, ClimateMeasurement, ClimateMeasurementBoundaries, Period,
    group_by_sensor,
};

/// Climate measurements over a period (details and climate alert).
#[derive(Debug, Clone, Deserialize)]
pub struct ClimateInput {
    #[serde(flatten)]
    pub period: Period,
    #[serde(default)]
    pub measurements: Vec<ClimateMeasurement>,
}

impl ClimateInput {
    /// Measurements grouped by sensor.
    #[must_use]
    pub fn into_data(self) -> (Period, ClimateData) {
        let data = group_by_sensor(self.measurements, |m| &m.sensor);
        (self.period, data)
    }
}

/// Daily aggregates over a period (history).
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryInput {
    #[serde(flatten)]
    pub period: Period,
    #[serde(default)]
    pub boundaries: Vec<ClimateMeasurementBoundaries>,
}

impl HistoryInput {
    /// Aggregates grouped by sensor.
    #[must_use]
    pub fn into_data(self) -> (Period, BoundaryData) {
        let data = group_by_sensor(self.boundaries, |b| &b.sensor);
        (self.period, data)
    }
}
