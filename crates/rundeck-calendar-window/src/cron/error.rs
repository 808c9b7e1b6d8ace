//! Cron expression error types.

use std::fmt;

/// Result type for cron expression parsing.
pub type CronResult<T> = Result<T, CronError>;

/// An error that occurred while parsing a cron expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronError {
    /// The kind of error.
    pub kind: CronErrorKind,
    /// The expression or field that failed.
    pub message: String,
}

impl CronError {
    /// Creates a new cron error.
    #[must_use]
    pub fn new(kind: CronErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for CronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CronError {}

/// The kind of cron error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronErrorKind {
    /// Wrong number of whitespace separated fields.
    FieldCount,
    /// A field is empty or contains characters Quartz does not accept.
    InvalidField,
}

impl fmt::Display for CronErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount => write!(f, "wrong number of cron fields"),
            Self::InvalidField => write!(f, "invalid cron field"),
        }
    }
}
