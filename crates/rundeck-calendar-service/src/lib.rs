//! Rundeck REST API access and job schedule reporting.

pub mod calendar;
pub mod error;
pub mod rundeck;
pub mod schedule;

pub use calendar::RundeckCalendar;
pub use error::{ServiceError, ServiceResult};
