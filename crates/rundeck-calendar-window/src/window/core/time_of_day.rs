//! Time of day with second precision, including the `24:00` end-of-day mark.

use std::fmt;

use chrono::{NaiveTime, Timelike};

use super::error::{RuleError, RuleResult};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Seconds since local midnight, in `0..=86400`.
///
/// `86400` is only produced by [`TimeOfDay::parse_end`] and stands for the
/// end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    seconds: u32,
}

impl TimeOfDay {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Self = Self { seconds: 0 };

    /// Midnight at the end of the day (`24:00`).
    pub const END_OF_DAY: Self = Self {
        seconds: SECONDS_PER_DAY,
    };

    /// Creates a time of day from hour, minute and second.
    ///
    /// ## Errors
    /// Returns an error if any component is out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> RuleResult<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(RuleError::invalid_time(&format!(
                "{hour:02}:{minute:02}:{second:02}"
            )));
        }
        Ok(Self {
            seconds: hour * 3600 + minute * 60 + second,
        })
    }

    /// Parses `HH:MM` or `HH:MM:SS`.
    ///
    /// ## Errors
    /// Returns an error if the token is malformed or out of range. `24:00` is
    /// rejected; use [`TimeOfDay::parse_end`] for window ends.
    pub fn parse(token: &str) -> RuleResult<Self> {
        let mut parts = token.trim().split(':');
        let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
            return Err(RuleError::invalid_time(token));
        };
        let second = parts.next().unwrap_or("00");
        if parts.next().is_some() {
            return Err(RuleError::invalid_time(token));
        }

        let component = |s: &str| -> RuleResult<u32> {
            if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RuleError::invalid_time(token));
            }
            s.parse::<u32>()
                .map_err(|_e| RuleError::invalid_time(token))
        };

        Self::from_hms(component(hour)?, component(minute)?, component(second)?)
            .map_err(|_e| RuleError::invalid_time(token))
    }

    /// Parses a window end, which additionally accepts `24:00` / `24:00:00`.
    ///
    /// ## Errors
    /// Returns an error if the token is malformed or out of range.
    pub fn parse_end(token: &str) -> RuleResult<Self> {
        match token.trim() {
            "24:00" | "24:00:00" => Ok(Self::END_OF_DAY),
            other => Self::parse(other),
        }
    }

    /// Returns the time of day of a chrono time, dropping sub-second precision.
    #[must_use]
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            seconds: time.num_seconds_from_midnight(),
        }
    }

    /// Seconds since midnight.
    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.seconds
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.seconds / 3600;
        let minute = (self.seconds % 3600) / 60;
        let second = self.seconds % 60;
        if second == 0 {
            write!(f, "{hour:02}:{minute:02}")
        } else {
            write!(f, "{hour:02}:{minute:02}:{second:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours_minutes() {
        let time = TimeOfDay::parse("09:30").expect("valid time");
        assert_eq!(time.seconds(), 9 * 3600 + 30 * 60);
        assert_eq!(time.to_string(), "09:30");
    }

    #[test]
    fn test_parse_with_seconds() {
        let time = TimeOfDay::parse("23:59:59").expect("valid time");
        assert_eq!(time.seconds(), SECONDS_PER_DAY - 1);
        assert_eq!(time.to_string(), "23:59:59");
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("12:60").is_err());
        assert!(TimeOfDay::parse("12:00:60").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for token in ["", "9:00", "0900", "09:00:00:00", "ab:cd", "+9:00"] {
            assert!(TimeOfDay::parse(token).is_err(), "{token} should fail");
        }
    }

    #[test]
    fn test_parse_end_accepts_end_of_day() {
        assert_eq!(
            TimeOfDay::parse_end("24:00").expect("end of day"),
            TimeOfDay::END_OF_DAY
        );
        assert_eq!(TimeOfDay::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn test_from_naive_time() {
        let time = NaiveTime::from_hms_milli_opt(17, 0, 1, 500).expect("valid");
        assert_eq!(TimeOfDay::from_naive_time(time).seconds(), 17 * 3600 + 1);
    }
}
