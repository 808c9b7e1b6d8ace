//! Window rule and calendar models.
//!
//! These types are immutable once built. All validation happens during
//! construction so that evaluation cannot fail.

mod calendar;
mod date_range;
mod days;
mod error;
mod rule;
mod time_of_day;

pub use calendar::CalendarDefinition;
pub use date_range::DateRange;
pub use days::{MonthDaySet, MonthSet, WeekdaySet};
pub use error::{RuleError, RuleErrorKind, RuleList, RuleLocation, RuleResult};
pub use rule::{TimeWindowRule, TimeWindowRuleBuilder};
pub use time_of_day::TimeOfDay;
