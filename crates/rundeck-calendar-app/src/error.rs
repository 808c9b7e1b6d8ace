use thiserror::Error;

/// Application-level errors (command line layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] rundeck_calendar_service::ServiceError),

    #[error(transparent)]
    WindowError(#[from] rundeck_calendar_window::WindowError),

    #[error(transparent)]
    ConversionError(#[from] rundeck_calendar_window::window::timezone::ConversionError),

    #[error("Invalid instant '{0}': expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]")]
    InvalidInstant(String),

    #[error("No calendar definition given: use --calendar or set calendar.path")]
    MissingCalendar,

    #[error("Log file error: {0}")]
    LogFileError(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
