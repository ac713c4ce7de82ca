//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Listen port override.
pub const ENV_PORT: &str = "PORT";
/// Webhook URL override.
pub const ENV_WEBHOOK_URL: &str = "N8N_WEBHOOK_URL";
/// Webhook timeout override, in seconds.
pub const ENV_WEBHOOK_TIMEOUT: &str = "WEBHOOK_TIMEOUT_SECS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Invalid value '{value}' for environment variable {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load `KEY=value` pairs from a `.env` file into the process environment.
///
/// With no explicit path the file is searched from the working directory
/// upward, and its absence is not an error. Variables already set in the
/// environment are never overwritten. Returns the file that was loaded.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e.into()),
        },
    }
}

/// Parse a TOML configuration file. Missing sections take their defaults.
pub fn load_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the effective configuration: defaults, then the optional file,
/// then environment overrides. The result is not validated.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => GatewayConfig::default(),
    };
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored so an exported-but-blank variable does not
/// clobber the file.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(value) = read(ENV_PORT) {
        config.listener.port = value.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_PORT,
            value,
        })?;
    }

    if let Some(value) = read(ENV_WEBHOOK_URL) {
        config.webhook.url = Some(value);
    }

    if let Some(value) = read(ENV_WEBHOOK_TIMEOUT) {
        config.webhook.timeout_secs = value.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_WEBHOOK_TIMEOUT,
            value,
        })?;
    }

    Ok(())
}

/// Run semantic validation, converting failures into a [`ConfigError`].
pub fn validated(config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
