//! Render contexts handed to the templates.
//!
//! Each template gets one immutable, serializable value built up front from
//! the domain data. Timestamps are formatted here, numbers by the template
//! filters.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use minijinja::Value;
use observer_blog::{HistoryDiagrams, Image, media_reference};
use observer_data::{
    BoundaryData, ClimateData, ClimateMeasurement, ClimateMeasurementBoundaries, OperatingEvent,
    Period, Reading, Sensor,
};
use serde::Serialize;

/// Formats UTC timestamps in the blog's local time.
///
/// Without a fixed offset every timestamp is converted with the offset the
/// local time zone has at that instant, so periods across a DST change show
/// wall clock times.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    offset: Option<FixedOffset>,
}

impl Clock {
    pub(crate) fn local_zone() -> Self {
        Self { offset: None }
    }

    pub(crate) fn fixed(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    fn local(&self, time: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => time.with_timezone(&offset),
            None => time.with_timezone(&Local).fixed_offset(),
        }
    }

    pub(crate) fn timestamp(&self, time: DateTime<Utc>) -> String {
        self.local(time).format("%d.%m.%Y %H:%M").to_string()
    }

    fn period(&self, period: Period) -> PeriodView {
        PeriodView {
            start: self.timestamp(period.start),
            end: self.timestamp(period.end),
        }
    }
}

fn day(day: NaiveDate) -> String {
    day.format("%d.%m.%Y").to_string()
}

#[derive(Debug, Serialize)]
pub(crate) struct PeriodView {
    start: String,
    end: String,
}

#[derive(Debug, Serialize)]
struct SensorView<'a> {
    name: &'a str,
    color: &'a str,
}

impl<'a> From<&'a Sensor> for SensorView<'a> {
    fn from(sensor: &'a Sensor) -> Self {
        Self {
            name: &sensor.name,
            color: &sensor.color,
        }
    }
}

#[derive(Debug, Serialize)]
struct MeasurementView<'a> {
    sensor: SensorView<'a>,
    temperature: f64,
    humidity: f64,
    vapor_amount: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverviewView<'a> {
    date: String,
    time: String,
    measurements: Vec<MeasurementView<'a>>,
}

impl<'a> OverviewView<'a> {
    pub(crate) fn new(reading: &'a Reading, clock: &Clock) -> Self {
        let local = clock.local(reading.reading_time);
        let mut measurements: Vec<&ClimateMeasurement> = reading.climate_measurements().collect();
        measurements.sort_by(|a, b| a.sensor.cmp(&b.sensor));

        Self {
            date: local.format("%d.%m.%Y").to_string(),
            time: local.format("%H:%M").to_string(),
            measurements: measurements
                .into_iter()
                .map(|m| MeasurementView {
                    sensor: SensorView::from(m.sensor.as_ref()),
                    temperature: m.temperature,
                    humidity: m.humidity,
                    vapor_amount: m.vapor_amount,
                })
                .collect(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

/// An extreme value and when it was observed.
#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct Extreme {
    pub(crate) value: f64,
    pub(crate) at: String,
}

/// Lowest and highest temperature and humidity of one sensor.
#[derive(Debug, Serialize)]
pub(crate) struct SensorExtremes<'a> {
    sensor: SensorView<'a>,
    pub(crate) min_temperature: Extreme,
    pub(crate) max_temperature: Extreme,
    pub(crate) min_humidity: Extreme,
    pub(crate) max_humidity: Extreme,
}

impl<'a> SensorExtremes<'a> {
    /// `None` for a sensor without measurements.
    pub(crate) fn from_measurements(
        sensor: &'a Sensor,
        measurements: &[ClimateMeasurement],
        clock: &Clock,
    ) -> Option<Self> {
        let extreme = |m: &ClimateMeasurement, value: f64| Extreme {
            value,
            at: clock.timestamp(m.measuring_time),
        };
        let min_t = min_by(measurements, |m| m.temperature)?;
        let max_t = max_by(measurements, |m| m.temperature)?;
        let min_h = min_by(measurements, |m| m.humidity)?;
        let max_h = max_by(measurements, |m| m.humidity)?;

        Some(Self {
            sensor: sensor.into(),
            min_temperature: extreme(min_t, min_t.temperature),
            max_temperature: extreme(max_t, max_t.temperature),
            min_humidity: extreme(min_h, min_h.humidity),
            max_humidity: extreme(max_h, max_h.humidity),
        })
    }

    /// `None` for a sensor without boundaries.
    pub(crate) fn from_boundaries(
        sensor: &'a Sensor,
        boundaries: &[ClimateMeasurementBoundaries],
    ) -> Option<Self> {
        let extreme = |b: &ClimateMeasurementBoundaries, value: f64| Extreme {
            value,
            at: day(b.day),
        };
        let min_t = min_by(boundaries, |b| b.minimum_temperature)?;
        let max_t = max_by(boundaries, |b| b.maximum_temperature)?;
        let min_h = min_by(boundaries, |b| b.minimum_humidity)?;
        let max_h = max_by(boundaries, |b| b.maximum_humidity)?;

        Some(Self {
            sensor: sensor.into(),
            min_temperature: extreme(min_t, min_t.minimum_temperature),
            max_temperature: extreme(max_t, max_t.maximum_temperature),
            min_humidity: extreme(min_h, min_h.minimum_humidity),
            max_humidity: extreme(max_h, max_h.maximum_humidity),
        })
    }
}

fn min_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    items.iter().min_by(|a, b| key(a).total_cmp(&key(b)))
}

fn max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    items.iter().max_by(|a, b| key(a).total_cmp(&key(b)))
}

fn climate_extremes<'a>(data: &'a ClimateData, clock: &Clock) -> Vec<SensorExtremes<'a>> {
    data.iter()
        .filter_map(|(sensor, measurements)| {
            SensorExtremes::from_measurements(sensor, measurements, clock)
        })
        .collect()
}

/// A published diagram embedded with its media reference.
///
/// URLs and the reference are passed through unescaped so the reference
/// token stays intact in the published HTML.
#[derive(Debug, Serialize)]
struct DiagramView {
    full: Value,
    preview: Value,
    reference: Value,
    title: String,
}

impl DiagramView {
    fn full_size(image: &Image, title: String) -> Self {
        Self {
            full: Value::from_safe_string(image.full.clone()),
            preview: Value::from_safe_string(image.full.clone()),
            reference: Value::from_safe_string(media_reference(&image.id)),
            title,
        }
    }

    fn thumbnail(image: &Image, title: String) -> Self {
        let preview = image.thumbnail.as_ref().unwrap_or(&image.full);
        Self {
            full: Value::from_safe_string(image.full.clone()),
            preview: Value::from_safe_string(preview.clone()),
            reference: Value::from_safe_string(media_reference(&image.id)),
            title,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DetailsView<'a> {
    period: PeriodView,
    diagram_image: DiagramView,
    sensors: Vec<SensorExtremes<'a>>,
}

impl<'a> DetailsView<'a> {
    pub(crate) fn new(
        period: Period,
        data: &'a ClimateData,
        diagram: &Image,
        clock: &Clock,
    ) -> Self {
        Self {
            period: clock.period(period),
            diagram_image: DiagramView::full_size(
                diagram,
                "Verlauf der letzten 24 Stunden".to_owned(),
            ),
            sensors: climate_extremes(data, clock),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

#[derive(Debug, Serialize)]
struct HistorySection<'a> {
    name: &'a str,
    temperature: Option<DiagramView>,
    humidity: Option<DiagramView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryView<'a> {
    period: PeriodView,
    summaries: Vec<SensorExtremes<'a>>,
    sections: Vec<HistorySection<'a>>,
}

impl<'a> HistoryView<'a> {
    pub(crate) fn new(
        period: Period,
        data: &'a BoundaryData,
        diagrams: &BTreeMap<Sensor, HistoryDiagrams>,
        clock: &Clock,
    ) -> Self {
        let summaries = data
            .iter()
            .filter_map(|(sensor, boundaries)| SensorExtremes::from_boundaries(sensor, boundaries))
            .collect();
        let sections = data
            .iter()
            .filter(|(_, boundaries)| !boundaries.is_empty())
            .map(|(sensor, _)| {
                let published = diagrams.get(sensor);
                HistorySection {
                    name: &sensor.name,
                    temperature: published.map(|d| {
                        DiagramView::thumbnail(
                            &d.temperature,
                            format!("Temperatur {}", sensor.name),
                        )
                    }),
                    humidity: published.map(|d| {
                        DiagramView::thumbnail(
                            &d.humidity,
                            format!("Luftfeuchtigkeit {}", sensor.name),
                        )
                    }),
                }
            })
            .collect();

        Self {
            period: clock.period(period),
            summaries,
            sections,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ClimateAlertView<'a> {
    period: PeriodView,
    sensors: Vec<SensorExtremes<'a>>,
}

impl<'a> ClimateAlertView<'a> {
    pub(crate) fn new(period: Period, data: &'a ClimateData, clock: &Clock) -> Self {
        Self {
            period: clock.period(period),
            sensors: climate_extremes(data, clock),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

#[derive(Debug, Serialize)]
struct ExceedanceView<'a> {
    name: &'a str,
    value: f64,
    threshold: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct OperatingAlertView<'a> {
    exceedances: Vec<ExceedanceView<'a>>,
    errors: Vec<&'a str>,
}

impl<'a> OperatingAlertView<'a> {
    pub(crate) fn new(events: &'a [OperatingEvent]) -> Self {
        let mut exceedances = Vec::new();
        let mut errors = Vec::new();
        for event in events {
            match event {
                OperatingEvent::Exceedance {
                    name,
                    value,
                    threshold,
                } => exceedances.push(ExceedanceView {
                    name,
                    value: *value,
                    threshold: *threshold,
                }),
                OperatingEvent::Error { message } => errors.push(message.as_str()),
            }
        }
        Self {
            exceedances,
            errors,
        }
    }
}
