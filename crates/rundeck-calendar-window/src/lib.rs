//! Execution window evaluation for scheduled jobs.
//!
//! A [`window::CalendarDefinition`] is an ordered set of include and exclude
//! [`window::TimeWindowRule`]s. It is validated once, then evaluated as a pure
//! function of an instant with [`window::matches`]. The [`cron`] module holds
//! the Quartz cron expression type used by Rundeck job schedules.

pub mod cron;
pub mod error;
pub mod window;

pub use error::{WindowError, WindowResult};
