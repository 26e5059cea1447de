//! Environment variable expansion for configuration strings.
//!
//! Only the braced forms are recognised:
//! - `${VAR}` expands to the value of VAR and fails if it is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset

use std::env;

use crate::ConfigError;

/// Variable that could not be resolved during expansion.
struct UnsetVar(String);

/// Expand `${...}` references in `value`.
///
/// `field` names the config key and is only used for error reporting.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, UnsetVar> {
        env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    };

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }),
    }
}
