//! Operating alert events.

use serde::{Deserialize, Serialize};

/// Something noteworthy about the observing host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperatingEvent {
    /// An operating value crossed its threshold.
    Exceedance {
        /// Name of the operating value, e.g. `cpu_temp`.
        name: String,
        value: f64,
        threshold: f64,
    },
    /// A collection or publish step failed.
    Error {
        /// Human readable description.
        message: String,
    },
}

impl OperatingEvent {
    /// True for threshold exceedances.
    #[must_use]
    pub fn is_exceedance(&self) -> bool {
        matches!(self, Self::Exceedance { .. })
    }
}
