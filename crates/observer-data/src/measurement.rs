//! Measurement variants.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Sensor;

/// A single typed value set taken as part of a [`Reading`](crate::Reading).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Measurement {
    /// Temperature and humidity from one sensor.
    Climate(ClimateMeasurement),
    /// Health of the observing host itself.
    Operating(OperatingMeasurement),
}

/// Climate values reported by a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateMeasurement {
    /// Sensor that produced the values.
    pub sensor: Arc<Sensor>,
    /// When the sensor took the values.
    pub measuring_time: DateTime<Utc>,
    /// Temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Absolute humidity in g/m³.
    #[serde(default)]
    pub vapor_amount: f64,
}

/// Operating values of the observing host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingMeasurement {
    /// Memory usage in percent.
    pub mem_usage: f64,
    /// CPU load average.
    pub cpu_load: f64,
    /// CPU temperature in °C.
    pub cpu_temp: f64,
    /// Uptime in seconds.
    pub uptime: f64,
}

impl Measurement {
    /// The climate values, if this is a climate measurement.
    #[must_use]
    pub fn as_climate(&self) -> Option<&ClimateMeasurement> {
        match self {
            Self::Climate(climate) => Some(climate),
            Self::Operating(_) => None,
        }
    }

    /// The operating values, if this is an operating measurement.
    #[must_use]
    pub fn as_operating(&self) -> Option<&OperatingMeasurement> {
        match self {
            Self::Operating(operating) => Some(operating),
            Self::Climate(_) => None,
        }
    }
}
