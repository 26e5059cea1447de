//! Domain data for the climate observer.
//!
//! A [`Reading`] is one timestamped batch of [`Measurement`]s. Measurements
//! are a closed set of variants, so filtering for climate or operating
//! values is a pattern match rather than a runtime type check.
//!
//! Per-sensor series are kept in [`BTreeMap`]s keyed by [`Sensor`], which
//! gives generators and publishers a deterministic sensor order.

mod event;
mod input;
mod measurement;
mod period;
mod reading;
mod sensor;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use event::OperatingEvent;
pub use input::{ClimateInput, HistoryInput};
pub use measurement::{ClimateMeasurement, Measurement, OperatingMeasurement};
pub use period::{ClimateMeasurementBoundaries, Period};
pub use reading::Reading;
pub use sensor::{Sensor, SensorType};

/// Climate measurements per sensor.
pub type ClimateData = BTreeMap<Sensor, Vec<ClimateMeasurement>>;

/// Daily aggregates per sensor.
pub type BoundaryData = BTreeMap<Sensor, Vec<ClimateMeasurementBoundaries>>;

/// Group values by the sensor they belong to, keeping per-sensor order.
pub fn group_by_sensor<T, F>(values: impl IntoIterator<Item = T>, sensor: F) -> BTreeMap<Sensor, Vec<T>>
where
    F: Fn(&T) -> &Arc<Sensor>,
{
    let mut grouped: BTreeMap<Sensor, Vec<T>> = BTreeMap::new();
    for value in values {
        let key = Sensor::clone(sensor(&value));
        grouped.entry(key).or_default().push(value);
    }
    grouped
}
