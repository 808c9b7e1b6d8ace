//! Scheduled Rundeck jobs and their summary report.

mod job;
mod summary;

pub use job::JobSchedule;
pub use summary::{SUMMARY_HEADER, schedule_summary};
