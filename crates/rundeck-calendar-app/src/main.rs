use std::process::ExitCode;

use clap::Parser;
use rundeck_calendar_app::cli::Cli;
use rundeck_calendar_app::commands::{self, EXIT_ERROR};
use rundeck_calendar_app::config::load_settings;
use rundeck_calendar_app::logging::{apply_log_level, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let filter_handle = match init_tracing(settings.logging.file.as_deref()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };
    tracing::info!(
        rundeck = %settings.rundeck.base_url(),
        level = %settings.logging.level,
        "Configuration loaded"
    );
    apply_log_level(&filter_handle, settings.logging.level.as_str());

    tokio::select! {
        status = commands::execute(&cli.command, &settings) => {
            tracing::info!(status, "Completed");
            ExitCode::from(status)
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                return ExitCode::from(EXIT_ERROR);
            }
            tracing::info!("Interrupted by Ctrl+C, exiting");
            ExitCode::SUCCESS
        }
    }
}
