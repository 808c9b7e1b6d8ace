//! Inclusive calendar date range limiting when a rule applies.

use std::fmt;

use chrono::NaiveDate;

use super::error::{RuleError, RuleErrorKind, RuleResult};

/// Inclusive range of local dates; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a date range.
    ///
    /// ## Errors
    /// Returns an error if `from` is after `until`.
    pub fn new(from: Option<NaiveDate>, until: Option<NaiveDate>) -> RuleResult<Self> {
        match (from, until) {
            (Some(start), Some(end)) if start > end => Err(RuleError::new(
                RuleErrorKind::InvalidDateRange,
                format!("{start} is after {end}"),
            )),
            _ => Ok(Self { from, until }),
        }
    }

    /// Parses optional `YYYY-MM-DD` bounds.
    ///
    /// ## Errors
    /// Returns an error for malformed dates or a reversed range.
    pub fn parse(from: Option<&str>, until: Option<&str>) -> RuleResult<Self> {
        Self::new(from.map(parse_date).transpose()?, until.map(parse_date).transpose()?)
    }

    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.from
    }

    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.until
    }

    /// Returns true if `date` is within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|start| date >= start) && self.until.is_none_or(|end| date <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.until) {
            (Some(start), Some(end)) => write!(f, "{start}..={end}"),
            (Some(start), None) => write!(f, "{start}.."),
            (None, Some(end)) => write!(f, "..={end}"),
            (None, None) => f.write_str(".."),
        }
    }
}

fn parse_date(token: &str) -> RuleResult<NaiveDate> {
    NaiveDate::parse_from_str(token.trim(), "%Y-%m-%d").map_err(|_e| RuleError::invalid_date(token))
}
