//! Execution window calendars.
//!
//! ## Submodules
//!
//! - [`core`] - Rule and calendar types
//! - [`parse`] - Reading calendar definitions from TOML, JSON or YAML
//! - [`evaluate`] - Deciding whether an instant is inside a calendar
//! - [`timezone`] - Time zone identifier resolution

pub mod core;
pub mod evaluate;
pub mod parse;
pub mod timezone;

pub use core::{
    CalendarDefinition, RuleError, RuleErrorKind, RuleList, RuleLocation, TimeOfDay,
    TimeWindowRule, TimeWindowRuleBuilder,
};
pub use evaluate::{Evaluation, evaluate, matches};
pub use parse::{DefinitionFormat, load_calendar, parse_calendar};
pub use timezone::TimeZoneResolver;
