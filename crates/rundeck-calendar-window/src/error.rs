use thiserror::Error;

use crate::window::core::{RuleError, RuleLocation};

/// Window definition and evaluation errors
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Validation error in {rule}: {source}")]
    ValidationError {
        rule: RuleLocation,
        #[source]
        source: RuleError,
    },

    #[error("Unknown timezone in {rule}: {tzid}")]
    TimezoneError { rule: RuleLocation, tzid: String },

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<config::ConfigError> for WindowError {
    fn from(err: config::ConfigError) -> Self {
        Self::ParseError(err.to_string())
    }
}

pub type WindowResult<T> = std::result::Result<T, WindowError>;
