//! `observer publish` subcommand group.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use observer_blog::{PublishOrchestrator, PublishOutcome, PublishTargets, WordPressClient};
use observer_config::{CliSettings, Config};
use observer_content::HtmlContentGenerator;
use observer_data::{ClimateInput, HistoryInput, Reading};

use super::charts::ChartDirectory;
use super::input::read_json;
use crate::error::CliError;
use crate::output::Output;

/// Options shared by all publish commands.
#[derive(Args)]
pub(crate) struct ConnectionArgs {
    /// Path to configuration file (default: auto-discover observer.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// WordPress REST root URL (overrides config).
    #[arg(long, env = "OBSERVER_BASE_URL")]
    base_url: Option<String>,
}

impl ConnectionArgs {
    fn load(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Arguments for the overview publish command.
#[derive(Args)]
pub(crate) struct OverviewArgs {
    /// Reading JSON file.
    #[arg(short, long)]
    reading: PathBuf,

    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Arguments for publish commands that embed charts.
#[derive(Args)]
pub(crate) struct ChartedArgs {
    /// Input JSON file.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory with the pre-rendered chart images.
    #[arg(long)]
    charts: PathBuf,

    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Arguments for the climate alert publish command.
#[derive(Args)]
pub(crate) struct ClimateAlertArgs {
    /// Climate measurements JSON file.
    #[arg(short, long)]
    input: PathBuf,

    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Publish commands.
#[derive(Subcommand)]
pub(crate) enum PublishCommand {
    /// Publish the latest reading to the overview content block.
    Overview(OverviewArgs),
    /// Publish the 24 hour details page.
    Details(ChartedArgs),
    /// Publish the 365 day history page.
    History(ChartedArgs),
    /// Publish the climate alert content block.
    ClimateAlert(ClimateAlertArgs),
}

impl PublishCommand {
    /// Execute the publish subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    fn connection(&self) -> &ConnectionArgs {
        match self {
            Self::Overview(args) => &args.connection,
            Self::Details(args) | Self::History(args) => &args.connection,
            Self::ClimateAlert(args) => &args.connection,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Overview(_) => "overview",
            Self::Details(_) => "details",
            Self::History(_) => "history",
            Self::ClimateAlert(_) => "climate alert",
        }
    }

    async fn run(self) -> Result<(), CliError> {
        let output = Output::new();
        let name = self.name();

        let config = self.connection().load()?;
        let client = WordPressClient::from_config(&config.wordpress)?;
        let content = HtmlContentGenerator::new()?;
        let charts = match &self {
            Self::Details(args) | Self::History(args) => ChartDirectory::new(args.charts.clone()),
            Self::Overview(_) | Self::ClimateAlert(_) => ChartDirectory::none(),
        };
        let targets = PublishTargets::from_config(&config.documents);
        let orchestrator = PublishOrchestrator::new(&client, &content, &charts, targets);

        output.info(&format!("Publishing {name} to {}...", client.base_url()));

        let outcome = match self {
            Self::Overview(args) => {
                let reading: Reading = read_json(&args.reading)?;
                orchestrator.publish_overview(&reading).await?
            }
            Self::Details(args) => {
                let (period, data) = read_json::<ClimateInput>(&args.input)?.into_data();
                orchestrator.publish_details(period, &data).await?
            }
            Self::History(args) => {
                let (period, data) = read_json::<HistoryInput>(&args.input)?.into_data();
                orchestrator.publish_history(period, &data).await?
            }
            Self::ClimateAlert(args) => {
                let (period, data) = read_json::<ClimateInput>(&args.input)?.into_data();
                orchestrator.publish_climate_alert(period, &data).await?
            }
        };

        print_outcome(&output, name, &outcome);
        Ok(())
    }
}

fn print_outcome(output: &Output, name: &str, outcome: &PublishOutcome) {
    let report = match outcome {
        PublishOutcome::NoData => {
            output.warning(&format!("Nothing to publish, {name} left unchanged."));
            return;
        }
        PublishOutcome::Published(report) => report,
    };

    output.success(&format!("\nPublished {name} to {}", report.document));

    if !report.uploaded.is_empty() {
        output.info(&format!("\nMedia uploaded ({}):", report.uploaded.len()));
        for image in &report.uploaded {
            output.info(&format!("  -> {} {}", image.id, image.full));
        }
    }

    if !report.retired.is_empty() {
        output.info(&format!("Media deleted: {}", report.retired.join(", ")));
    }

    if !report.is_clean() {
        output.warning(&format!(
            "\nWarning: {} superseded media item(s) could not be deleted:",
            report.cleanup_failures.len()
        ));
        for failure in &report.cleanup_failures {
            output.info(&format!("  - [{}] {}", failure.media_id, failure.message));
        }
    }
}
