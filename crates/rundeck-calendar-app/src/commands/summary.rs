use rundeck_calendar_core::config::Settings;
use rundeck_calendar_service::RundeckCalendar;
use rundeck_calendar_service::rundeck::RundeckClient;

use crate::error::AppResult;

/// ## Summary
/// Collects every scheduled job from the configured Rundeck server and
/// renders the schedule summary.
///
/// ## Errors
/// Returns an error if no API token is configured or an API request fails.
#[tracing::instrument(skip(settings), fields(host = %settings.rundeck.host, port = settings.rundeck.port))]
pub async fn run_summary(settings: &Settings) -> AppResult<String> {
    let client = RundeckClient::new(&settings.rundeck)?;
    let calendar = RundeckCalendar::fetch(&client).await?;
    Ok(calendar.schedule_summary())
}

/// Logs the schedule summary, so it reaches the console and any log file.
pub fn report_summary(summary: &str) {
    tracing::info!("Rundeck Schedule Summary:\n{summary}");
}
