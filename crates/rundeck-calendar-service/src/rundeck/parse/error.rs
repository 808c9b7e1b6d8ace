//! Rundeck response parse error types.

use std::fmt;

use rundeck_calendar_window::cron::CronError;

/// Result type for Rundeck response parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing a Rundeck API response.
#[derive(Debug)]
pub struct ParseError {
    /// Error kind.
    pub kind: ParseErrorKind,
    /// Error message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an XML error.
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::XmlError, message)
    }

    /// Creates a missing element error.
    #[must_use]
    pub fn missing_element(name: &str) -> Self {
        Self::new(
            ParseErrorKind::MissingElement,
            format!("missing required element: {name}"),
        )
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidValue, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        Self::xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::xml(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for ParseError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Self::xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::new(ParseErrorKind::EncodingError, err.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for ParseError {
    fn from(err: quick_xml::encoding::EncodingError) -> Self {
        Self::new(ParseErrorKind::EncodingError, err.to_string())
    }
}

impl From<CronError> for ParseError {
    fn from(err: CronError) -> Self {
        Self::new(ParseErrorKind::InvalidSchedule, err.to_string())
    }
}

/// Parse error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// XML parsing error.
    XmlError,
    /// Missing required element.
    MissingElement,
    /// Invalid value.
    InvalidValue,
    /// Schedule that is not a valid cron expression.
    InvalidSchedule,
    /// Encoding error.
    EncodingError,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XmlError => write!(f, "XML error"),
            Self::MissingElement => write!(f, "missing element"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::InvalidSchedule => write!(f, "invalid schedule"),
            Self::EncodingError => write!(f, "encoding error"),
        }
    }
}
