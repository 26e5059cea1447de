//! HTML content for the climate observer blog.
//!
//! [`HtmlContentGenerator`] renders the overview, details, history and alert
//! fragments from embedded minijinja templates. Every published diagram is
//! embedded together with its [`media_reference`](observer_blog::media_reference)
//! so a later publish can find and retire it.
//!
//! Timestamps are shown in the local time of the machine (or a fixed offset
//! via [`HtmlContentGenerator::with_offset`]), numbers with a decimal comma.

mod context;
mod filters;

use async_trait::async_trait;
use chrono::FixedOffset;
use minijinja::Environment;
use observer_blog::{
    ClimateAlertContext, ContentGenerator, DetailsContext, GenerateError, HistoryContext,
    NO_DATA_CONTENT,
};
use observer_data::{OperatingEvent, Reading};
use serde::Serialize;
use tracing::debug;

use crate::context::{
    ClimateAlertView, Clock, DetailsView, HistoryView, OperatingAlertView, OverviewView,
};

/// Placeholder for a history page without any published diagram.
pub const NO_DIAGRAMS_CONTENT: &str = "<h3>Keine Diagramme vorhanden</h3>";

const TEMPLATES: [(&str, &str); 6] = [
    ("_extremes.html", include_str!("../templates/_extremes.html")),
    ("overview.html", include_str!("../templates/overview.html")),
    ("details.html", include_str!("../templates/details.html")),
    ("history.html", include_str!("../templates/history.html")),
    ("climate-alert.html", include_str!("../templates/climate-alert.html")),
    ("operating-alert.html", include_str!("../templates/operating-alert.html")),
];

/// Template based [`ContentGenerator`].
pub struct HtmlContentGenerator {
    env: Environment<'static>,
    clock: Clock,
}

impl HtmlContentGenerator {
    /// Create a generator showing times in the local time zone.
    pub fn new() -> Result<Self, GenerateError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        filters::register(&mut env);
        for (name, source) in TEMPLATES {
            env.add_template(name, source).map_err(|e| {
                GenerateError::with_source(format!("Invalid template {name}"), e)
            })?;
        }

        Ok(Self {
            env,
            clock: Clock::local_zone(),
        })
    }

    /// Show times with a fixed UTC offset instead of the local time zone.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.clock = Clock::fixed(offset);
        self
    }

    fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, GenerateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| GenerateError::with_source(format!("Unknown template {name}"), e))?;
        let html = template
            .render(context)
            .map_err(|e| GenerateError::with_source(format!("Failed to render {name}"), e))?;
        debug!(template = name, bytes = html.len(), "Rendered content");
        Ok(html.trim_end().to_owned())
    }
}

#[async_trait]
impl ContentGenerator for HtmlContentGenerator {
    async fn generate_overview(&self, reading: &Reading) -> Result<String, GenerateError> {
        let view = OverviewView::new(reading, &self.clock);
        if view.is_empty() {
            return Ok(NO_DATA_CONTENT.to_owned());
        }
        self.render("overview.html", view)
    }

    async fn generate_details(&self, context: DetailsContext<'_>) -> Result<String, GenerateError> {
        let view = DetailsView::new(context.period, context.data, context.diagram, &self.clock);
        if view.is_empty() {
            return Ok(NO_DATA_CONTENT.to_owned());
        }
        self.render("details.html", view)
    }

    async fn generate_history(&self, context: HistoryContext<'_>) -> Result<String, GenerateError> {
        let view = HistoryView::new(context.period, context.data, context.diagrams, &self.clock);
        if view.is_empty() {
            return Ok(NO_DATA_CONTENT.to_owned());
        }
        if context.diagrams.is_empty() {
            return Ok(NO_DIAGRAMS_CONTENT.to_owned());
        }
        self.render("history.html", view)
    }

    async fn generate_climate_alert(
        &self,
        context: ClimateAlertContext<'_>,
    ) -> Result<Option<String>, GenerateError> {
        let view = ClimateAlertView::new(context.period, context.data, &self.clock);
        if view.is_empty() {
            return Ok(None);
        }
        self.render("climate-alert.html", view).map(Some)
    }

    async fn generate_operating_alert(
        &self,
        events: &[OperatingEvent],
    ) -> Result<String, GenerateError> {
        self.render("operating-alert.html", OperatingAlertView::new(events))
    }
}
