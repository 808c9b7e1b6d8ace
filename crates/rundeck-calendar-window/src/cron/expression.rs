//! Seven-field Quartz cron expression.

use std::fmt;
use std::str::FromStr;

use super::error::{CronError, CronErrorKind, CronResult};

/// Value of a field the schedule leaves unspecified.
pub const UNSPECIFIED: &str = "?";

/// A field of a Quartz cron expression, in expression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CronField {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
    Year,
}

impl CronField {
    /// Returns the field name as used in schedule summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day_of_month",
            Self::Month => "month",
            Self::DayOfWeek => "day_of_week",
            Self::Year => "year",
        }
    }

    /// Returns all fields in expression order.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Second,
            Self::Minute,
            Self::Hour,
            Self::DayOfMonth,
            Self::Month,
            Self::DayOfWeek,
            Self::Year,
        ]
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Quartz cron expression, kept as its seven textual fields.
///
/// Fields are checked against the Quartz character set but not interpreted;
/// the expression is carried for reporting, not for computing fire times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronExpression {
    fields: [String; 7],
}

impl CronExpression {
    /// An expression with every field set to `?`.
    #[must_use]
    pub fn unspecified() -> Self {
        Self {
            fields: std::array::from_fn(|_| UNSPECIFIED.to_string()),
        }
    }

    /// ## Summary
    /// Parses a whitespace separated expression of six or seven fields. A
    /// missing year field defaults to `*`.
    ///
    /// ## Errors
    /// Returns an error for a wrong field count or an invalid field.
    pub fn parse(expression: &str) -> CronResult<Self> {
        let parts: Vec<&str> = expression.split_whitespace().collect();
        if !(6..=7).contains(&parts.len()) {
            return Err(CronError::new(
                CronErrorKind::FieldCount,
                format!("expected 6 or 7 fields, found {}: '{expression}'", parts.len()),
            ));
        }

        let mut cron = Self::unspecified();
        for (field, value) in CronField::all().into_iter().zip(parts.iter()) {
            cron = cron.with_field(field, value)?;
        }
        if parts.len() == 6 {
            cron = cron.with_field(CronField::Year, "*")?;
        }
        Ok(cron)
    }

    /// Returns a copy with `field` replaced by `value`.
    ///
    /// ## Errors
    /// Returns an error if `value` is empty or has characters outside the
    /// Quartz set (`0-9 A-Z a-z * ? / , - #`).
    pub fn with_field(mut self, field: CronField, value: &str) -> CronResult<Self> {
        let value = value.trim();
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '?' | '/' | ',' | '-' | '#'));
        if !valid {
            return Err(CronError::new(
                CronErrorKind::InvalidField,
                format!("{field} = '{value}'"),
            ));
        }

        self.fields[field.index()] = value.to_string();
        Ok(self)
    }

    /// Returns the text of `field`.
    #[must_use]
    pub fn field(&self, field: CronField) -> &str {
        &self.fields[field.index()]
    }
}

impl Default for CronExpression {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields.join(" "))
    }
}
