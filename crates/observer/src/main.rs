//! Climate observer CLI.
//!
//! Provides commands for:
//! - `publish`: Publish overview, details, history or climate alert to the blog
//! - `render`: Print generated content without contacting the blog

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PublishCommand, RenderCommand};
use output::Output;

/// Climate observer - publishes sensor data to a WordPress blog.
#[derive(Parser)]
#[command(name = "observer", version, about)]
struct Cli {
    /// Enable verbose output (log every remote step).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish content to the blog.
    #[command(subcommand)]
    Publish(PublishCommand),
    /// Render content to stdout.
    #[command(subcommand)]
    Render(RenderCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Publish(cmd) => cmd.execute(),
        Commands::Render(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
