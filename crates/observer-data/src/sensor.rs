//! Sensor reference data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hardware type of a climate sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorType {
    /// Indoor temperature and humidity sensor.
    #[serde(rename = "HmIP-STH")]
    HmipSth,
    /// Outdoor temperature and humidity sensor.
    #[serde(rename = "HmIP-STHO")]
    HmipStho,
    /// Wall thermostat with humidity sensor.
    #[serde(rename = "HmIP-WTH-2")]
    HmipWth2,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HmipSth => "HmIP-STH",
            Self::HmipStho => "HmIP-STHO",
            Self::HmipWth2 => "HmIP-WTH-2",
        };
        f.write_str(name)
    }
}

/// A physical sensor.
///
/// Ordering follows the numeric id, which keeps per-sensor maps in a stable
/// order across publishes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sensor {
    /// Local identity.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Hardware type.
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    /// Stable external serial.
    pub sgtin: String,
    /// Display color, e.g. `#FF0000`.
    pub color: String,
}

impl Sensor {
    /// Create a sensor.
    #[must_use]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        sensor_type: SensorType,
        sgtin: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            sensor_type,
            sgtin: sgtin.into(),
            color: color.into(),
        }
    }
}
