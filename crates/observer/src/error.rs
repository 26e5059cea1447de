//! CLI error types.

use std::path::PathBuf;

use observer_blog::{BlogError, GenerateError, PublishError};
use observer_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Blog(#[from] BlogError),

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("Invalid input file {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
