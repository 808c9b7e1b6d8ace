use thiserror::Error;

use crate::rundeck::parse::ParseError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Rundeck API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    CoreError(#[from] rundeck_calendar_core::error::CoreError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
