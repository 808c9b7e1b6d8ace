//! Tests for command exit statuses.

use std::path::{Path, PathBuf};

use rundeck_calendar_core::config::{CalendarConfig, LoggingConfig, RundeckConfig};

use super::*;
use crate::cli::CheckArgs;

const CALENDAR: &str = r#"
timezone = "UTC"

[[include]]
name = "weekdays"
start = "09:00"
end = "17:00"
days = ["mon-fri"]
"#;

const ZERO_LENGTH_CALENDAR: &str = r#"
[[include]]
start = "09:00"
end = "09:00"
"#;

fn settings() -> Settings {
    Settings {
        rundeck: RundeckConfig {
            host: "localhost".to_string(),
            port: 4440,
            ssl_enabled: true,
            accept_invalid_certs: true,
            api_token: None,
            credentials_file: None,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            file: None,
        },
        calendar: CalendarConfig::default(),
    }
}

fn write_calendar(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("calendar.toml");
    std::fs::write(&path, contents).expect("write calendar");
    path
}

fn check(calendar: PathBuf, at: &str) -> Command {
    Command::Check(CheckArgs {
        calendar: Some(calendar),
        at: Some(at.to_string()),
        timezone: None,
    })
}

#[test_log::test(tokio::test)]
async fn check_inside_exits_success() {
    let dir = tempfile::tempdir().expect("temp dir");
    let calendar = write_calendar(dir.path(), CALENDAR);

    let status = execute(&check(calendar, "2026-10-14T10:00:00Z"), &settings()).await;
    assert_eq!(status, EXIT_SUCCESS);
}

#[test_log::test(tokio::test)]
async fn check_outside_exits_one() {
    let dir = tempfile::tempdir().expect("temp dir");
    let calendar = write_calendar(dir.path(), CALENDAR);

    // Saturday
    let status = execute(&check(calendar, "2026-10-17T10:00:00Z"), &settings()).await;
    assert_eq!(status, EXIT_OUTSIDE);
}

#[test_log::test(tokio::test)]
async fn invalid_calendar_exits_with_error_status() {
    let dir = tempfile::tempdir().expect("temp dir");
    let calendar = write_calendar(dir.path(), ZERO_LENGTH_CALENDAR);

    let status = execute(&check(calendar, "2026-10-14T09:00:00Z"), &settings()).await;
    assert_eq!(status, EXIT_ERROR);
    assert_ne!(status, EXIT_OUTSIDE);
}

#[test_log::test(tokio::test)]
async fn missing_calendar_file_exits_with_error_status() {
    let dir = tempfile::tempdir().expect("temp dir");
    let calendar = dir.path().join("missing.toml");

    let status = execute(&check(calendar, "2026-10-14T10:00:00Z"), &settings()).await;
    assert_eq!(status, EXIT_ERROR);
}

#[test_log::test(tokio::test)]
async fn summary_without_token_exits_with_error_status() {
    let status = execute(&Command::Summary, &settings()).await;
    assert_eq!(status, EXIT_ERROR);
}
