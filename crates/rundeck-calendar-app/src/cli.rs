use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Reports Rundeck job schedules and checks instants against execution
/// window calendars.
#[derive(Parser, Debug)]
#[command(
    name = "rundeck-calendar",
    version,
    about = "Rundeck job schedules and execution windows"
)]
pub struct Cli {
    /// Path to a configuration file (default: ./config.toml if present)
    #[arg(long, global = true, env = "RUNDECK_CALENDAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fully qualified domain name or IP address of the Rundeck server
    #[arg(short = 's', long, global = true)]
    pub server: Option<String>,

    /// Port of the Rundeck REST API
    #[arg(short = 'p', long, global = true)]
    pub port: Option<u16>,

    /// API token used to access the Rundeck REST API
    #[arg(short = 'a', long, global = true, conflicts_with = "credentials")]
    pub apitoken: Option<String>,

    /// Ini file with the API token under `[credentials]` as `apitoken=<token>`
    #[arg(short = 'c', long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Connect over plain HTTP instead of HTTPS
    #[arg(long, global = true)]
    pub no_ssl: bool,

    /// Also write log output to this file, replacing any existing file
    #[arg(short = 'L', long, global = true)]
    pub logfilepath: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the cron schedules of all scheduled jobs
    Summary,
    /// Check whether an instant is inside an execution window calendar
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckArgs {
    /// Calendar definition file (.toml, .json, .yaml); defaults to calendar.path
    #[arg(long)]
    pub calendar: Option<PathBuf>,

    /// Instant to check, RFC 3339 or local `YYYY-MM-DDTHH:MM[:SS]` (default: now)
    #[arg(long)]
    pub at: Option<String>,

    /// Time zone of a local `--at` value (default: UTC)
    #[arg(long)]
    pub timezone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_with_server_options() {
        let cli = Cli::try_parse_from([
            "rundeck-calendar",
            "-s",
            "rundeck.example.com",
            "-p",
            "4443",
            "-a",
            "token",
            "summary",
        ])
        .unwrap();

        assert_eq!(cli.server.as_deref(), Some("rundeck.example.com"));
        assert_eq!(cli.port, Some(4443));
        assert_eq!(cli.apitoken.as_deref(), Some("token"));
        assert!(!cli.no_ssl);
        assert_eq!(cli.command, Command::Summary);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rundeck-calendar",
            "summary",
            "--no-ssl",
            "-L",
            "/tmp/rundeck-calendar.log",
        ])
        .unwrap();

        assert!(cli.no_ssl);
        assert_eq!(
            cli.logfilepath,
            Some(PathBuf::from("/tmp/rundeck-calendar.log"))
        );
    }

    #[test]
    fn test_apitoken_conflicts_with_credentials() {
        let result = Cli::try_parse_from([
            "rundeck-calendar",
            "-a",
            "token",
            "-c",
            "credentials.ini",
            "summary",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "rundeck-calendar",
            "check",
            "--calendar",
            "windows.toml",
            "--at",
            "2026-03-11T10:00:00Z",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Check(CheckArgs {
                calendar: Some(PathBuf::from("windows.toml")),
                at: Some("2026-03-11T10:00:00Z".to_string()),
                timezone: None,
            })
        );
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["rundeck-calendar"]).is_err());
    }

    #[test]
    fn test_invalid_port() {
        assert!(Cli::try_parse_from(["rundeck-calendar", "-p", "http", "summary"]).is_err());
    }
}
