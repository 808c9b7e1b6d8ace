use super::job::JobSchedule;

/// First line of every schedule summary.
pub const SUMMARY_HEADER: &str =
    "project:job: second minute hour day_of_month month day_of_week year";

/// ## Summary
/// Renders the schedules of all jobs, one `project:[group/]name: <fields>`
/// line each, below [`SUMMARY_HEADER`]. Every line ends with a newline.
#[must_use]
pub fn schedule_summary(schedules: &[JobSchedule]) -> String {
    let mut summary = String::with_capacity(SUMMARY_HEADER.len() + 1 + schedules.len() * 64);
    summary.push_str(SUMMARY_HEADER);
    summary.push('\n');
    for schedule in schedules {
        summary.push_str(&schedule.to_string());
        summary.push('\n');
    }
    summary
}
