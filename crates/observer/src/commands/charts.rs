//! Chart images rendered ahead of time into a directory.

use std::path::PathBuf;

use async_trait::async_trait;
use observer_blog::{ChartGenerator, GenerateError};
use observer_data::{ClimateData, ClimateMeasurementBoundaries, Period, Sensor};
use tracing::debug;

/// [`ChartGenerator`] reading finished PNG files from a directory.
///
/// Expected files: `24h.png`, `{sgtin}-temperature.png` and
/// `{sgtin}-humidity.png`.
pub(crate) struct ChartDirectory {
    dir: Option<PathBuf>,
}

impl ChartDirectory {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    /// For publishes that do not embed charts.
    pub(crate) fn none() -> Self {
        Self { dir: None }
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, GenerateError> {
        let dir = self
            .dir
            .as_deref()
            .ok_or_else(|| GenerateError::new(format!("No chart directory given for {name}")))?;
        let path = dir.join(name);
        debug!(path = %path.display(), "Reading chart");
        tokio::fs::read(&path).await.map_err(|e| {
            GenerateError::with_source(format!("Cannot read chart {}", path.display()), e)
        })
    }
}

#[async_trait]
impl ChartGenerator for ChartDirectory {
    async fn create_24_hour_chart(
        &self,
        _period: Period,
        _data: &ClimateData,
    ) -> Result<Vec<u8>, GenerateError> {
        self.read("24h.png").await
    }

    async fn create_365_day_temperature_chart(
        &self,
        _period: Period,
        _data: &[ClimateMeasurementBoundaries],
        sensor: &Sensor,
    ) -> Result<Vec<u8>, GenerateError> {
        self.read(&format!("{}-temperature.png", sensor.sgtin)).await
    }

    async fn create_365_day_humidity_chart(
        &self,
        _period: Period,
        _data: &[ClimateMeasurementBoundaries],
        sensor: &Sensor,
    ) -> Result<Vec<u8>, GenerateError> {
        self.read(&format!("{}-humidity.png", sensor.sgtin)).await
    }
}
