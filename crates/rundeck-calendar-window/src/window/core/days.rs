//! Day-of-week, day-of-month and month selections.
//!
//! Each selection is a small bit set parsed from a list of tokens. A token is
//! a single value, an inclusive range (`mon-fri`, `1-15`, `nov-feb`) or an
//! alias. Tokens may also be comma separated inside one string.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, Weekday};

use super::error::{RuleError, RuleErrorKind, RuleResult};

/// Splits a token list into individual trimmed, non-empty tokens.
fn split_tokens<S: AsRef<str>>(tokens: &[S]) -> impl Iterator<Item = &str> {
    tokens
        .iter()
        .flat_map(|t| t.as_ref().split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Splits `a-b` into its two ends. A leading `-` is not treated as a range.
fn split_range(token: &str) -> Option<(&str, &str)> {
    let (start, end) = token.split_once('-')?;
    if start.is_empty() || end.is_empty() {
        return None;
    }
    Some((start.trim(), end.trim()))
}

fn empty_selection(what: &str) -> RuleError {
    RuleError::new(
        RuleErrorKind::EmptySelection,
        format!("{what} list selects nothing"),
    )
}

/// Set of days of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Every day of the week.
    pub const ALL: Self = Self(0b0111_1111);
    /// Monday through Friday.
    pub const WEEKDAYS: Self = Self(0b0001_1111);
    /// Saturday and Sunday.
    pub const WEEKENDS: Self = Self(0b0110_0000);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    const fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Parses day-of-week tokens.
    ///
    /// Accepted: `mon`, `monday`, `MO` (case-insensitive), ranges such as
    /// `mon-fri` or wrapping `fri-mon`, and the aliases `weekdays`,
    /// `weekends`, `daily`, `all`, `*`.
    ///
    /// ## Errors
    /// Returns an error for unknown tokens or a list that selects nothing.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> RuleResult<Self> {
        let mut set = Self::empty();
        for token in split_tokens(tokens) {
            match token.to_ascii_lowercase().as_str() {
                "*" | "all" | "daily" => set.0 |= Self::ALL.0,
                "weekdays" => set.0 |= Self::WEEKDAYS.0,
                "weekends" => set.0 |= Self::WEEKENDS.0,
                _ => {
                    if let Some((start, end)) = split_range(token) {
                        let mut day = parse_weekday(start)?;
                        let end = parse_weekday(end)?;
                        set.insert(day);
                        while day != end {
                            day = day.succ();
                            set.insert(day);
                        }
                    } else {
                        set.insert(parse_weekday(token)?);
                    }
                }
            }
        }

        if set.is_empty() {
            return Err(empty_selection("day-of-week"));
        }
        Ok(set)
    }

    /// Iterates the selected days starting with Monday.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(move |day| self.contains(*day))
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("*");
        }
        let days: Vec<String> = self
            .iter()
            .map(|day| day.to_string().to_ascii_lowercase())
            .collect();
        f.write_str(&days.join(","))
    }
}

fn parse_weekday(token: &str) -> RuleResult<Weekday> {
    let day = match token.to_ascii_lowercase().as_str() {
        "mo" => Weekday::Mon,
        "tu" => Weekday::Tue,
        "we" => Weekday::Wed,
        "th" => Weekday::Thu,
        "fr" => Weekday::Fri,
        "sa" => Weekday::Sat,
        "su" => Weekday::Sun,
        other => Weekday::from_str(other).map_err(|_e| RuleError::invalid_day(token))?,
    };
    Ok(day)
}

/// Set of days of the month (1-31), optionally including the last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDaySet(u32);

impl MonthDaySet {
    const LAST_BIT: u32 = 1;

    /// Every day of the month.
    pub const ALL: Self = Self(!Self::LAST_BIT);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 & Self::ALL.0 == Self::ALL.0
    }

    /// Returns true if `date` falls on one of the selected days.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        if self.0 & (1 << date.day()) != 0 {
            return true;
        }
        self.0 & Self::LAST_BIT != 0 && is_last_day_of_month(date)
    }

    /// Parses day-of-month tokens: `1`..`31`, ranges such as `1-15`, `last`
    /// (or `L`), and `*`.
    ///
    /// ## Errors
    /// Returns an error for out-of-range or unknown tokens, descending
    /// ranges, or a list that selects nothing.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> RuleResult<Self> {
        let mut set = Self::empty();
        for token in split_tokens(tokens) {
            match token.to_ascii_lowercase().as_str() {
                "*" | "all" => set.0 |= Self::ALL.0,
                "last" | "l" => set.0 |= Self::LAST_BIT,
                _ => {
                    if let Some((start, end)) = split_range(token) {
                        let start = parse_month_day(start)?;
                        let end = parse_month_day(end)?;
                        if start > end {
                            return Err(RuleError::invalid_month_day(token));
                        }
                        for day in start..=end {
                            set.0 |= 1 << day;
                        }
                    } else {
                        set.0 |= 1 << parse_month_day(token)?;
                    }
                }
            }
        }

        if set.0 == 0 {
            return Err(empty_selection("day-of-month"));
        }
        Ok(set)
    }
}

impl Default for MonthDaySet {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for MonthDaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("*");
        }
        let mut days: Vec<String> = (1..=31u32)
            .filter(|day| self.0 & (1 << day) != 0)
            .map(|day| day.to_string())
            .collect();
        if self.0 & Self::LAST_BIT != 0 {
            days.push("last".to_string());
        }
        f.write_str(&days.join(","))
    }
}

fn parse_month_day(token: &str) -> RuleResult<u32> {
    match token.parse::<u32>() {
        Ok(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err(RuleError::invalid_month_day(token)),
    }
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

/// Set of months of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthSet(u16);

impl MonthSet {
    /// Every month.
    pub const ALL: Self = Self(0b1_1111_1111_1110);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Returns true if `date` falls in one of the selected months.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.0 & (1 << date.month()) != 0
    }

    /// Parses month tokens: `jan`, `january`, `1`..`12`, ranges such as
    /// `jun-aug` or wrapping `nov-feb`, and `*`.
    ///
    /// ## Errors
    /// Returns an error for unknown tokens or a list that selects nothing.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> RuleResult<Self> {
        let mut set = Self::empty();
        for token in split_tokens(tokens) {
            if token == "*" || token.eq_ignore_ascii_case("all") {
                set.0 |= Self::ALL.0;
            } else if let Some((start, end)) = split_range(token) {
                let mut month = parse_month(start)?;
                let end = parse_month(end)?;
                set.0 |= 1 << month.number_from_month();
                while month != end {
                    month = month.succ();
                    set.0 |= 1 << month.number_from_month();
                }
            } else {
                set.0 |= 1 << parse_month(token)?.number_from_month();
            }
        }

        if set.0 == 0 {
            return Err(empty_selection("month"));
        }
        Ok(set)
    }
}

impl Default for MonthSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for MonthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("*");
        }
        let months: Vec<String> = (1..=12u8)
            .filter(|number| self.0 & (1 << number) != 0)
            .filter_map(|number| Month::try_from(number).ok())
            .map(|month| month.name()[..3].to_ascii_lowercase())
            .collect();
        f.write_str(&months.join(","))
    }
}

fn parse_month(token: &str) -> RuleResult<Month> {
    if let Ok(number) = token.parse::<u8>() {
        return Month::try_from(number).map_err(|_e| RuleError::invalid_month(token));
    }
    Month::from_str(token).map_err(|_e| RuleError::invalid_month(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_month_day_and_month_display() {
        let days = MonthDaySet::parse(&["1-3", "15", "last"]).expect("valid");
        assert_eq!(days.to_string(), "1,2,3,15,last");
        assert_eq!(MonthDaySet::ALL.to_string(), "*");

        let months = MonthSet::parse(&["nov-feb"]).expect("valid");
        assert_eq!(months.to_string(), "jan,feb,nov,dec");
        assert_eq!(MonthSet::ALL.to_string(), "*");
    }

    #[test]
    fn test_weekday_range() {
        let set = WeekdaySet::parse(&["mon-fri"]).expect("valid");
        assert_eq!(set, WeekdaySet::WEEKDAYS);
        assert!(!set.contains(Weekday::Sat));
    }

    #[test]
    fn test_weekday_wrapping_range() {
        let set = WeekdaySet::parse(&["fri-mon"]).expect("valid");
        let days: Vec<Weekday> = set.iter().collect();
        assert_eq!(
            days,
            vec![Weekday::Mon, Weekday::Fri, Weekday::Sat, Weekday::Sun]
        );
    }

    #[test]
    fn test_weekday_token_forms() {
        let set = WeekdaySet::parse(&["Monday", "TU", "wed,thu"]).expect("valid");
        assert_eq!(set.to_string(), "mon,tue,wed,thu");
    }

    #[test]
    fn test_weekday_aliases() {
        assert_eq!(
            WeekdaySet::parse(&["weekends"]).expect("valid"),
            WeekdaySet::WEEKENDS
        );
        assert!(WeekdaySet::parse(&["*"]).expect("valid").is_all());
        assert_eq!(WeekdaySet::ALL.to_string(), "*");
    }

    #[test]
    fn test_weekday_invalid_token() {
        let err = WeekdaySet::parse(&["mon", "funday"]).unwrap_err();
        assert_eq!(err.kind, RuleErrorKind::InvalidDay);
        assert!(err.message.contains("funday"));
    }

    #[test]
    fn test_weekday_empty_list() {
        let empty: [&str; 0] = [];
        let err = WeekdaySet::parse(&empty).unwrap_err();
        assert_eq!(err.kind, RuleErrorKind::EmptySelection);
        let err = WeekdaySet::parse(&[" , "]).unwrap_err();
        assert_eq!(err.kind, RuleErrorKind::EmptySelection);
    }

    #[test]
    fn test_month_days() {
        let set = MonthDaySet::parse(&["1-3", "15"]).expect("valid");
        assert!(set.contains(date(2026, 3, 2)));
        assert!(set.contains(date(2026, 3, 15)));
        assert!(!set.contains(date(2026, 3, 4)));
    }

    #[test]
    fn test_month_days_last() {
        let set = MonthDaySet::parse(&["last"]).expect("valid");
        assert!(set.contains(date(2026, 2, 28)));
        assert!(set.contains(date(2028, 2, 29)));
        assert!(!set.contains(date(2028, 2, 28)));
        assert!(set.contains(date(2026, 12, 31)));
    }

    #[test]
    fn test_month_days_invalid() {
        assert!(MonthDaySet::parse(&["0"]).is_err());
        assert!(MonthDaySet::parse(&["32"]).is_err());
        assert!(MonthDaySet::parse(&["15-1"]).is_err());
        assert!(MonthDaySet::default().is_all());
    }

    #[test]
    fn test_months() {
        let set = MonthSet::parse(&["nov-feb"]).expect("valid");
        assert!(set.contains(date(2026, 12, 1)));
        assert!(set.contains(date(2026, 1, 1)));
        assert!(!set.contains(date(2026, 3, 1)));

        let set = MonthSet::parse(&["6", "July"]).expect("valid");
        assert!(set.contains(date(2026, 6, 1)));
        assert!(set.contains(date(2026, 7, 1)));
        assert!(!set.contains(date(2026, 8, 1)));
    }

    #[test]
    fn test_months_invalid() {
        assert!(MonthSet::parse(&["13"]).is_err());
        assert!(MonthSet::parse(&["smarch"]).is_err());
        assert!(MonthSet::default().is_all());
    }
}
