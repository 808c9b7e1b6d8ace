//! Rule validation error types.

use std::fmt;

/// Result type for rule construction.
pub type RuleResult<T> = Result<T, RuleError>;

/// A malformed window rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    /// The kind of error.
    pub kind: RuleErrorKind,
    /// The offending token or a description of the problem.
    pub message: String,
}

impl RuleError {
    /// Creates a new rule error.
    #[must_use]
    pub fn new(kind: RuleErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an invalid time-of-day error.
    #[must_use]
    pub fn invalid_time(token: &str) -> Self {
        Self::new(RuleErrorKind::InvalidTime, format!("'{token}'"))
    }

    /// Creates an invalid day-of-week error.
    #[must_use]
    pub fn invalid_day(token: &str) -> Self {
        Self::new(RuleErrorKind::InvalidDay, format!("'{token}'"))
    }

    /// Creates an invalid day-of-month error.
    #[must_use]
    pub fn invalid_month_day(token: &str) -> Self {
        Self::new(RuleErrorKind::InvalidMonthDay, format!("'{token}'"))
    }

    /// Creates an invalid month error.
    #[must_use]
    pub fn invalid_month(token: &str) -> Self {
        Self::new(RuleErrorKind::InvalidMonth, format!("'{token}'"))
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(token: &str) -> Self {
        Self::new(RuleErrorKind::InvalidDate, format!("'{token}'"))
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for RuleError {}

/// The kind of rule error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleErrorKind {
    /// Time of day is not `HH:MM` or `HH:MM:SS`.
    InvalidTime,
    /// Unknown day-of-week token.
    InvalidDay,
    /// Day of month outside 1-31 or unknown token.
    InvalidMonthDay,
    /// Unknown month token.
    InvalidMonth,
    /// Date is not `YYYY-MM-DD`.
    InvalidDate,
    /// A day list was given but selects nothing.
    EmptySelection,
    /// Date range starts after it ends.
    InvalidDateRange,
    /// Start and end time are equal.
    ZeroLengthWindow,
    /// Time zone identifier could not be resolved.
    UnknownTimezone,
}

impl fmt::Display for RuleErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime => write!(f, "invalid time of day"),
            Self::InvalidDay => write!(f, "invalid day of week"),
            Self::InvalidMonthDay => write!(f, "invalid day of month"),
            Self::InvalidMonth => write!(f, "invalid month"),
            Self::InvalidDate => write!(f, "invalid date"),
            Self::EmptySelection => write!(f, "empty selection"),
            Self::InvalidDateRange => write!(f, "invalid date range"),
            Self::ZeroLengthWindow => write!(f, "zero-length window"),
            Self::UnknownTimezone => write!(f, "unknown timezone"),
        }
    }
}

/// Which rule list a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleList {
    Include,
    Exclude,
}

impl RuleList {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
        }
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a rule inside a calendar definition, e.g. `include[1] "lunch"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLocation {
    pub list: RuleList,
    pub index: usize,
    pub name: Option<String>,
}

impl RuleLocation {
    #[must_use]
    pub fn new(list: RuleList, index: usize, name: Option<&str>) -> Self {
        Self {
            list,
            index,
            name: name.map(str::to_string),
        }
    }
}

impl fmt::Display for RuleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.list, self.index)?;
        if let Some(name) = &self.name {
            write!(f, " \"{name}\"")?;
        }
        Ok(())
    }
}
