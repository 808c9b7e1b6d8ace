use anyhow::Result;
pub use rundeck_calendar_core::config::*;

use crate::cli::Cli;

/// ## Summary
/// Applies command line options on top of loaded settings. A token or
/// credentials file given on the command line replaces both configured
/// token sources.
pub fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(server) = &cli.server {
        settings.rundeck.host.clone_from(server);
    }
    if let Some(port) = cli.port {
        settings.rundeck.port = port;
    }
    if let Some(token) = &cli.apitoken {
        settings.rundeck.api_token = Some(token.clone());
        settings.rundeck.credentials_file = None;
    }
    if let Some(credentials) = &cli.credentials {
        settings.rundeck.credentials_file = Some(credentials.clone());
        settings.rundeck.api_token = None;
    }
    if cli.no_ssl {
        settings.rundeck.ssl_enabled = false;
    }
    if let Some(path) = &cli.logfilepath {
        settings.logging.file = Some(path.clone());
    }
}

/// ## Summary
/// Loads settings from `.env`, the configuration file and the environment,
/// then applies command line options.
///
/// ## Errors
/// Returns an error if loading fails or the combined settings are invalid.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = load_config(cli.config.as_deref())?;
    apply_cli_overrides(&mut settings, cli);
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn settings() -> Settings {
        Settings {
            rundeck: RundeckConfig {
                host: "localhost".to_string(),
                port: 4440,
                ssl_enabled: true,
                accept_invalid_certs: true,
                api_token: None,
                credentials_file: Some(PathBuf::from("/etc/rundeck/credentials.ini")),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
            calendar: CalendarConfig::default(),
        }
    }

    #[test]
    fn test_overrides_replace_configured_values() {
        let cli = Cli::try_parse_from([
            "rundeck-calendar",
            "-s",
            "rundeck.internal",
            "-p",
            "8080",
            "-a",
            "cli-token",
            "--no-ssl",
            "-L",
            "run.log",
            "summary",
        ])
        .unwrap();

        let mut settings = settings();
        apply_cli_overrides(&mut settings, &cli);

        assert_eq!(settings.rundeck.base_url(), "http://rundeck.internal:8080");
        assert_eq!(settings.rundeck.api_token.as_deref(), Some("cli-token"));
        assert!(settings.rundeck.credentials_file.is_none());
        assert_eq!(settings.logging.file, Some(PathBuf::from("run.log")));
        assert_eq!(settings.rundeck.resolve_api_token().unwrap(), "cli-token");
    }

    #[test]
    fn test_no_overrides_keep_settings() {
        let cli = Cli::try_parse_from(["rundeck-calendar", "summary"]).unwrap();

        let mut settings = settings();
        apply_cli_overrides(&mut settings, &cli);

        assert_eq!(settings.rundeck.base_url(), "https://localhost:4440");
        assert!(settings.rundeck.api_token.is_none());
        assert_eq!(
            settings.rundeck.credentials_file,
            Some(PathBuf::from("/etc/rundeck/credentials.ini"))
        );
    }

    #[test]
    fn test_load_settings_from_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rundeck-calendar.toml");
        std::fs::write(
            &path,
            "[rundeck]\nhost = \"rundeck.example.com\"\napi_token = \"file-token\"\n",
        )
        .unwrap();

        let config_arg = path.to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["rundeck-calendar", "--config", &config_arg, "-p", "4443", "summary"])
            .unwrap();

        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.rundeck.base_url(), "https://rundeck.example.com:4443");
        assert_eq!(settings.rundeck.api_token.as_deref(), Some("file-token"));
    }
}
