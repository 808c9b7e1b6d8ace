//! Quartz cron expressions as used by Rundeck job schedules.
//!
//! Rundeck stores schedules as seven Quartz fields:
//! `second minute hour day-of-month month day-of-week year`.

mod error;
mod expression;

pub use error::{CronError, CronErrorKind, CronResult};
pub use expression::{CronExpression, CronField, UNSPECIFIED};
