//! Window evaluation.
//!
//! Evaluation is a pure function of a validated [`CalendarDefinition`] and an
//! instant. It performs no I/O, holds no state and never fails.

use chrono::{DateTime, TimeZone};

use super::core::{CalendarDefinition, RuleList};

/// Outcome of evaluating a calendar, naming the deciding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Index of the first include rule that matched.
    pub included_by: Option<usize>,
    /// Index of the first exclude rule that matched.
    pub excluded_by: Option<usize>,
}

impl Evaluation {
    /// Returns true if an include rule matched and no exclude rule did.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        self.included_by.is_some() && self.excluded_by.is_none()
    }
}

/// ## Summary
/// Returns true if `instant` is inside the calendar: any include rule
/// matches and no exclude rule matches.
///
/// The instant may be in any time zone; each rule converts it to its own
/// zone before comparing.
#[must_use]
pub fn matches<Z: TimeZone>(calendar: &CalendarDefinition, instant: &DateTime<Z>) -> bool {
    calendar
        .include_rules()
        .iter()
        .any(|rule| rule.matches(instant))
        && !calendar
            .exclude_rules()
            .iter()
            .any(|rule| rule.matches(instant))
}

/// ## Summary
/// Evaluates every rule list and reports which rules decided the result.
#[must_use]
pub fn evaluate<Z: TimeZone>(calendar: &CalendarDefinition, instant: &DateTime<Z>) -> Evaluation {
    let first_match = |list: RuleList| {
        let rules = match list {
            RuleList::Include => calendar.include_rules(),
            RuleList::Exclude => calendar.exclude_rules(),
        };
        rules.iter().position(|rule| rule.matches(instant))
    };

    let evaluation = Evaluation {
        included_by: first_match(RuleList::Include),
        excluded_by: first_match(RuleList::Exclude),
    };

    tracing::trace!(
        included_by = ?evaluation.included_by,
        excluded_by = ?evaluation.excluded_by,
        "Evaluated calendar"
    );

    evaluation
}

impl CalendarDefinition {
    /// Returns true if `instant` is inside the calendar; see [`matches`].
    #[must_use]
    pub fn matches<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        matches(self, instant)
    }
}
