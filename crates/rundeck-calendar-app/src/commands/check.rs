use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use rundeck_calendar_core::config::Settings;
use rundeck_calendar_core::constants::DEFAULT_TIMEZONE;
use rundeck_calendar_window::window::timezone::convert_to_utc_lenient;
use rundeck_calendar_window::window::{
    CalendarDefinition, Evaluation, RuleList, RuleLocation, TimeWindowRule, TimeZoneResolver,
    evaluate, load_calendar,
};

use crate::cli::CheckArgs;
use crate::error::{AppError, AppResult};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Result of checking one instant against a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub instant: DateTime<Utc>,
    pub evaluation: Evaluation,
    pub included_by: Option<RuleLocation>,
    pub excluded_by: Option<RuleLocation>,
}

impl CheckOutcome {
    fn new(calendar: &CalendarDefinition, instant: DateTime<Utc>, evaluation: Evaluation) -> Self {
        let locate = |list: RuleList, index: Option<usize>| {
            index.map(|index| {
                let name = calendar.rule(list, index).and_then(TimeWindowRule::name);
                RuleLocation::new(list, index, name)
            })
        };

        Self {
            instant,
            evaluation,
            included_by: locate(RuleList::Include, evaluation.included_by),
            excluded_by: locate(RuleList::Exclude, evaluation.excluded_by),
        }
    }

    #[must_use]
    pub const fn is_inside(&self) -> bool {
        self.evaluation.is_inside()
    }
}

/// Formats as `inside 2026-03-11T10:00:00+00:00: matched include[0] "weekdays"`.
impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instant = self.instant.to_rfc3339();
        match (&self.included_by, &self.excluded_by) {
            (_, Some(exclude)) => write!(f, "outside {instant}: excluded by {exclude}"),
            (Some(include), None) => write!(f, "inside {instant}: matched {include}"),
            (None, None) => write!(f, "outside {instant}: no include rule matched"),
        }
    }
}

/// ## Summary
/// Parses the `--at` value. RFC 3339 instants carry their own offset; local
/// date-times are read in `timezone`, with times skipped by a DST change
/// moved forward by an hour. `None` means now.
///
/// ## Errors
/// Returns an error for an unreadable value or an unknown time zone.
pub fn parse_instant(at: Option<&str>, timezone: Option<&str>) -> AppResult<DateTime<Utc>> {
    let Some(at) = at.map(str::trim) else {
        return Ok(Utc::now());
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(at) {
        return Ok(instant.with_timezone(&Utc));
    }

    let local = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(at, format).ok())
        .ok_or_else(|| AppError::InvalidInstant(at.to_string()))?;

    let tzid = timezone.unwrap_or(DEFAULT_TIMEZONE);
    let mut resolver = TimeZoneResolver::new();
    Ok(convert_to_utc_lenient(local, tzid, &mut resolver)?)
}

/// ## Summary
/// Loads the calendar definition and evaluates it at the requested instant.
///
/// ## Errors
/// Returns an error if no calendar is configured, the definition is invalid,
/// or the instant cannot be parsed.
#[tracing::instrument(skip(settings))]
pub fn run_check(args: &CheckArgs, settings: &Settings) -> AppResult<CheckOutcome> {
    let path = args
        .calendar
        .as_deref()
        .or(settings.calendar.path.as_deref())
        .ok_or(AppError::MissingCalendar)?;

    let calendar = load_calendar(path)?;
    let instant = parse_instant(args.at.as_deref(), args.timezone.as_deref())?;
    let evaluation = evaluate(&calendar, &instant);

    tracing::debug!(
        calendar = calendar.name().unwrap_or_default(),
        %instant,
        inside = evaluation.is_inside(),
        "Checked instant against calendar"
    );

    Ok(CheckOutcome::new(&calendar, instant, evaluation))
}
