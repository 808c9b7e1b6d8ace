//! Subcommand implementations.

pub mod check;
pub mod summary;

use rundeck_calendar_core::config::Settings;

use crate::cli::Command;
use crate::error::AppResult;

/// Exit status of a successful command, and of `check` for an inside instant.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status of `check` for an instant outside the calendar.
pub const EXIT_OUTSIDE: u8 = 1;
/// Exit status of any failed command.
pub const EXIT_ERROR: u8 = 2;

/// ## Summary
/// Runs `command` and returns its exit status.
///
/// ## Errors
/// Returns an error if the command fails.
pub async fn run(command: &Command, settings: &Settings) -> AppResult<u8> {
    match command {
        Command::Summary => {
            let summary = summary::run_summary(settings).await?;
            summary::report_summary(&summary);
            Ok(EXIT_SUCCESS)
        }
        Command::Check(args) => {
            let outcome = check::run_check(args, settings)?;
            println!("{outcome}");
            if outcome.is_inside() {
                Ok(EXIT_SUCCESS)
            } else {
                Ok(EXIT_OUTSIDE)
            }
        }
    }
}

/// ## Summary
/// Runs `command`, logging any failure, and returns the process exit status.
/// Failures map to [`EXIT_ERROR`] so they are never mistaken for an
/// outside instant.
pub async fn execute(command: &Command, settings: &Settings) -> u8 {
    match run(command, settings).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            EXIT_ERROR
        }
    }
}

#[cfg(test)]
mod tests;
