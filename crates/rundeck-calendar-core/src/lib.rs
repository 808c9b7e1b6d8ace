//! Shared configuration, constants and error types for the Rundeck calendar
//! workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
