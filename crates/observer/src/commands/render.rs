//! `observer render` subcommand group.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use observer_blog::{ClimateAlertContext, ContentGenerator};
use observer_content::HtmlContentGenerator;
use observer_data::{ClimateInput, OperatingEvent, Reading};

use super::input::read_json;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render commands.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input JSON file.
    #[arg(short, long)]
    input: PathBuf,
}

/// Render commands. Output goes to stdout; the blog is not contacted.
#[derive(Subcommand)]
pub(crate) enum RenderCommand {
    /// Render the overview of a reading.
    Overview(RenderArgs),
    /// Render the climate alert for climate measurements.
    ClimateAlert(RenderArgs),
    /// Render the operating alert for a list of events.
    OperatingAlert(RenderArgs),
}

impl RenderCommand {
    /// Execute the render subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let content = HtmlContentGenerator::new()?;

        let rt = tokio::runtime::Runtime::new()?;
        match rt.block_on(self.render(&content))? {
            Some(html) => output.content(&html),
            None => output.highlight("Nothing to alert about."),
        }
        Ok(())
    }

    async fn render(&self, content: &HtmlContentGenerator) -> Result<Option<String>, CliError> {
        let html = match self {
            Self::Overview(args) => {
                let reading: Reading = read_json(&args.input)?;
                Some(content.generate_overview(&reading).await?)
            }
            Self::ClimateAlert(args) => {
                let (period, data) = read_json::<ClimateInput>(&args.input)?.into_data();
                let context = ClimateAlertContext {
                    period,
                    data: &data,
                };
                content.generate_climate_alert(context).await?
            }
            Self::OperatingAlert(args) => {
                let events: Vec<OperatingEvent> = read_json(&args.input)?;
                Some(content.generate_operating_alert(&events).await?)
            }
        };
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn args(path: &Path) -> RenderArgs {
        RenderArgs {
            input: path.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_render_operating_alert() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[{"kind": "exceedance", "name": "cpu_temp", "value": 71.2, "threshold": 70.0}]"#,
        )
        .unwrap();
        let content = HtmlContentGenerator::new().unwrap();

        let html = RenderCommand::OperatingAlert(args(&path))
            .render(&content)
            .await
            .unwrap()
            .unwrap();

        assert!(html.contains("cpu_temp: 71,2 (Grenzwert 70,0)"));
    }

    #[tokio::test]
    async fn test_render_climate_alert_without_measurements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.json");
        std::fs::write(
            &path,
            r#"{"start": "2024-05-01T00:00:00Z", "end": "2024-05-02T00:00:00Z", "measurements": []}"#,
        )
        .unwrap();
        let content = HtmlContentGenerator::new().unwrap();

        let html = RenderCommand::ClimateAlert(args(&path))
            .render(&content)
            .await
            .unwrap();

        assert_eq!(html, None);
    }
}
