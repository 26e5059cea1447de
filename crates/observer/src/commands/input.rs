//! JSON input files.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Read and decode a JSON input file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}
