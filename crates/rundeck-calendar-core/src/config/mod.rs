use std::path::{Path, PathBuf};

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CREDENTIALS_SECTION, CREDENTIALS_TOKEN_KEY, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};
use crate::types::Scheme;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rundeck: RundeckConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RundeckConfig {
    pub host: String,
    pub port: u16,
    pub ssl_enabled: bool,
    pub accept_invalid_certs: bool,
    pub api_token: Option<String>,
    pub credentials_file: Option<PathBuf>,
}

impl RundeckConfig {
    /// ## Summary
    /// Returns the server origin in the format "scheme://host:port".
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}",
            Scheme::from_ssl(self.ssl_enabled),
            self.host,
            self.port
        )
    }

    /// ## Summary
    /// Returns the API token, either given directly or read from the
    /// credentials file. The two sources are mutually exclusive.
    ///
    /// ## Errors
    /// Returns an error if both or neither source is configured, if the
    /// credentials file cannot be read, or if the token is empty.
    pub fn resolve_api_token(&self) -> CoreResult<String> {
        let token = match (&self.api_token, &self.credentials_file) {
            (Some(_), Some(_)) => {
                return Err(CoreError::ConfigError(
                    "api_token is not compatible with credentials_file".to_string(),
                ));
            }
            (Some(token), None) => token.clone(),
            (None, Some(path)) => read_credentials_file(path)?,
            (None, None) => {
                return Err(CoreError::ConfigError(
                    "missing value for api_token or credentials_file".to_string(),
                ));
            }
        };

        if token.trim().is_empty() {
            return Err(CoreError::ValidationError("API token is empty".to_string()));
        }

        Ok(token)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarConfig {
    pub path: Option<PathBuf>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, a TOML file and environment variables.
    ///
    /// When `config_file` is given it must exist; otherwise `config.toml` in the
    /// working directory is read if present. Environment variables such as
    /// `RUNDECK_CALENDAR__RUNDECK__HOST` take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config.toml").required(false),
        };

        let settings = Config::builder()
            .set_default("rundeck.host", "localhost")?
            .set_default("rundeck.port", 4440)?
            .set_default("rundeck.ssl_enabled", true)?
            .set_default("rundeck.accept_invalid_certs", true)?
            .set_default("logging.level", "info")?
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// ## Errors
    /// Returns a validation error for an empty host or a zero port.
    pub fn validate(&self) -> CoreResult<()> {
        if self.rundeck.host.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "rundeck.host must not be empty".to_string(),
            ));
        }
        if self.rundeck.port == 0 {
            return Err(CoreError::ValidationError(
                "rundeck.port must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Reads the API token from an ini file with a `[credentials]` section:
///
/// ```ini
/// [credentials]
/// apitoken=<API token string>
/// ```
///
/// ## Errors
/// Returns an error if the file is missing, unreadable or lacks the key.
#[tracing::instrument]
pub fn read_credentials_file(path: &Path) -> CoreResult<String> {
    let credentials = Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Ini)
                .required(true),
        )
        .build()?;

    let token = credentials.get_string(&format!("{CREDENTIALS_SECTION}.{CREDENTIALS_TOKEN_KEY}"))?;
    tracing::debug!("Read API token from credentials file");
    Ok(token)
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file and the
/// optional configuration file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(config_file: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load(config_file)
}
