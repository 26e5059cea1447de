//! Configuration management for the climate observer.
//!
//! Parses `observer.toml` with serde and discovers the file in the current
//! directory or any of its parents.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! The WordPress credentials support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `wordpress.base_url`
//! - `wordpress.username`
//! - `wordpress.password`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "observer.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the WordPress REST base URL.
    pub base_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// WordPress connection settings.
    pub wordpress: WordPressConfig,
    /// Well-known remote document ids per publish use case.
    pub documents: DocumentsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// WordPress REST API configuration.
#[derive(Debug, Deserialize)]
pub struct WordPressConfig {
    /// REST root, e.g. `https://blog.example.com/wp-json/wp/v2`.
    pub base_url: String,
    /// Account the application password belongs to.
    pub username: String,
    /// Application password.
    pub password: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl WordPressConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "wordpress.base_url")?;
        require_http_url(&self.base_url, "wordpress.base_url")?;
        require_non_empty(&self.username, "wordpress.username")?;
        require_non_empty(&self.password, "wordpress.password")?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "wordpress.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Remote document ids, fixed per use case.
///
/// The overview and climate alert live in content blocks, details and
/// history in pages.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    /// Content block showing the latest reading.
    pub overview: u64,
    /// Page with the 24 hour details.
    pub details: u64,
    /// Page with the 365 day history.
    pub history: u64,
    /// Content block carrying the climate alert.
    pub climate_alert: u64,
}

impl DocumentsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (id, field) in [
            (self.overview, "documents.overview"),
            (self.details, "documents.details"),
            (self.history, "documents.history"),
            (self.climate_alert, "documents.climate_alert"),
        ] {
            if id == 0 {
                return Err(ConfigError::Validation(format!("{field} cannot be 0")));
            }
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// No file given and none discovered.
    #[error("No observer.toml found in current directory or its parents")]
    NotDiscovered,
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`wordpress.password`").
        field: String,
        /// Error message (e.g., "${`WORDPRESS_PASSWORD`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `observer.toml` in current directory and parents.
    /// Unlike other settings there are no usable defaults for credentials and
    /// document ids, so a missing file is an error.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or(ConfigError::NotDiscovered)?,
        };

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string, expanding and validating it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.wordpress.base_url.clone_from(base_url);
        }
    }

    /// Search for the config file in the current directory and its parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wordpress.validate()?;
        self.documents.validate()?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let wordpress = &mut self.wordpress;
        wordpress.base_url = expand::expand_env(&wordpress.base_url, "wordpress.base_url")?;
        wordpress.username = expand::expand_env(&wordpress.username, "wordpress.username")?;
        wordpress.password = expand::expand_env(&wordpress.password, "wordpress.password")?;
        Ok(())
    }
}
