//! A single recurring time window.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;

use super::date_range::DateRange;
use super::days::{MonthDaySet, MonthSet, WeekdaySet};
use super::error::{RuleError, RuleErrorKind, RuleResult};
use super::time_of_day::TimeOfDay;
use crate::window::timezone::TimeZoneResolver;

/// A recurring daily window `[start, end)` in a fixed time zone, limited to
/// selected days.
///
/// When `end` is earlier than `start` the window spans midnight. The part
/// after midnight belongs to the window that opened on the previous day, so
/// day constraints are checked against that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindowRule {
    name: Option<String>,
    start: TimeOfDay,
    end: TimeOfDay,
    weekdays: WeekdaySet,
    month_days: MonthDaySet,
    months: MonthSet,
    date_range: Option<DateRange>,
    timezone: Tz,
}

impl TimeWindowRule {
    /// Starts building a rule from `HH:MM[:SS]` start and end times.
    #[must_use]
    pub fn builder(start: impl Into<String>, end: impl Into<String>) -> TimeWindowRuleBuilder {
        TimeWindowRuleBuilder::new(start, end)
    }

    /// Creates a rule from already validated parts.
    ///
    /// ## Errors
    /// Returns an error if `start == end` or `start` is the end-of-day mark.
    pub fn new(
        start: TimeOfDay,
        end: TimeOfDay,
        weekdays: WeekdaySet,
        timezone: Tz,
    ) -> RuleResult<Self> {
        if start == TimeOfDay::END_OF_DAY {
            return Err(RuleError::invalid_time(&start.to_string()));
        }
        if start == end {
            return Err(zero_length(start, end));
        }
        Ok(Self {
            name: None,
            start,
            end,
            weekdays,
            month_days: MonthDaySet::ALL,
            months: MonthSet::ALL,
            date_range: None,
            timezone,
        })
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    #[must_use]
    pub const fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    #[must_use]
    pub const fn month_days(&self) -> MonthDaySet {
        self.month_days
    }

    #[must_use]
    pub const fn months(&self) -> MonthSet {
        self.months
    }

    #[must_use]
    pub const fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns true if the window crosses local midnight.
    #[must_use]
    pub fn spans_midnight(&self) -> bool {
        self.end < self.start
    }

    /// ## Summary
    /// Returns true if `instant`, converted to this rule's time zone, falls
    /// inside the window.
    #[must_use]
    pub fn matches<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        let local = instant.with_timezone(&self.timezone);
        let date = local.date_naive();
        let time = TimeOfDay::from_naive_time(local.time());

        if !self.spans_midnight() {
            return time >= self.start && time < self.end && self.applies_on(date);
        }

        if time >= self.start {
            self.applies_on(date)
        } else if time < self.end {
            date.pred_opt().is_some_and(|opened| self.applies_on(opened))
        } else {
            false
        }
    }

    /// Returns true if a window opening on `date` is allowed by the day
    /// constraints.
    #[must_use]
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(date.weekday())
            && self.month_days.contains(date)
            && self.months.contains(date)
            && self.date_range.is_none_or(|range| range.contains(date))
    }
}

impl fmt::Display for TimeWindowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        write!(
            f,
            "{}-{} {} days={}",
            self.start, self.end, self.timezone, self.weekdays
        )?;
        if !self.month_days.is_all() {
            write!(f, " days_of_month={}", self.month_days)?;
        }
        if !self.months.is_all() {
            write!(f, " months={}", self.months)?;
        }
        if let Some(range) = &self.date_range {
            write!(f, " dates={range}")?;
        }
        Ok(())
    }
}

fn zero_length(start: TimeOfDay, end: TimeOfDay) -> RuleError {
    RuleError::new(
        RuleErrorKind::ZeroLengthWindow,
        format!("start {start} equals end {end}"),
    )
}

/// Collects raw rule tokens and validates them all at once in
/// [`TimeWindowRuleBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct TimeWindowRuleBuilder {
    name: Option<String>,
    start: String,
    end: String,
    days: Option<Vec<String>>,
    days_of_month: Option<Vec<String>>,
    months: Option<Vec<String>>,
    from: Option<String>,
    until: Option<String>,
    timezone: Option<String>,
}

impl TimeWindowRuleBuilder {
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Day-of-week tokens; see [`WeekdaySet::parse`].
    #[must_use]
    pub fn days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = Some(days.into_iter().map(Into::into).collect());
        self
    }

    /// Day-of-month tokens; see [`MonthDaySet::parse`].
    #[must_use]
    pub fn days_of_month<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days_of_month = Some(days.into_iter().map(Into::into).collect());
        self
    }

    /// Month tokens; see [`MonthSet::parse`].
    #[must_use]
    pub fn months<I, S>(mut self, months: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.months = Some(months.into_iter().map(Into::into).collect());
        self
    }

    /// First date (inclusive, `YYYY-MM-DD`) on which the rule applies.
    #[must_use]
    pub fn from(mut self, date: impl Into<String>) -> Self {
        self.from = Some(date.into());
        self
    }

    /// Last date (inclusive, `YYYY-MM-DD`) on which the rule applies.
    #[must_use]
    pub fn until(mut self, date: impl Into<String>) -> Self {
        self.until = Some(date.into());
        self
    }

    #[must_use]
    pub fn timezone(mut self, tzid: impl Into<String>) -> Self {
        self.timezone = Some(tzid.into());
        self
    }

    /// Sets the time zone only if none was given explicitly.
    #[must_use]
    pub fn default_timezone(mut self, tzid: Option<&str>) -> Self {
        if self.timezone.is_none() {
            self.timezone = tzid.map(str::to_string);
        }
        self
    }

    #[must_use]
    pub fn rule_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the time zone identifier that [`build`](Self::build) will resolve.
    #[must_use]
    pub fn timezone_id(&self) -> &str {
        self.timezone
            .as_deref()
            .unwrap_or(rundeck_calendar_core::constants::DEFAULT_TIMEZONE)
    }

    /// Validates the rule with a fresh time zone resolver.
    ///
    /// ## Errors
    /// Returns the first problem found; see [`RuleErrorKind`].
    pub fn build(self) -> RuleResult<TimeWindowRule> {
        self.build_with_resolver(&mut TimeZoneResolver::new())
    }

    /// ## Summary
    /// Validates every token and produces an immutable rule.
    ///
    /// ## Errors
    /// Returns the first problem found; see [`RuleErrorKind`].
    pub fn build_with_resolver(self, resolver: &mut TimeZoneResolver) -> RuleResult<TimeWindowRule> {
        let start = TimeOfDay::parse(&self.start)?;
        let end = TimeOfDay::parse_end(&self.end)?;
        if start == end {
            return Err(zero_length(start, end));
        }

        let weekdays = self
            .days
            .as_deref()
            .map_or(Ok(WeekdaySet::ALL), WeekdaySet::parse)?;
        let month_days = self
            .days_of_month
            .as_deref()
            .map_or(Ok(MonthDaySet::ALL), MonthDaySet::parse)?;
        let months = self
            .months
            .as_deref()
            .map_or(Ok(MonthSet::ALL), MonthSet::parse)?;

        let date_range = if self.from.is_some() || self.until.is_some() {
            Some(DateRange::parse(self.from.as_deref(), self.until.as_deref())?)
        } else {
            None
        };

        let tzid = self.timezone_id();
        let timezone = resolver
            .resolve(tzid)
            .map_err(|e| RuleError::new(RuleErrorKind::UnknownTimezone, e.to_string()))?;

        Ok(TimeWindowRule {
            name: self.name,
            start,
            end,
            weekdays,
            month_days,
            months,
            date_range,
            timezone,
        })
    }
}
