//! Calendar definitions: ordered include and exclude rules.

use super::error::{RuleErrorKind, RuleList, RuleLocation};
use super::rule::{TimeWindowRule, TimeWindowRuleBuilder};
use crate::error::{WindowError, WindowResult};
use crate::window::timezone::TimeZoneResolver;

/// An immutable set of include and exclude window rules.
///
/// An instant is inside the calendar when at least one include rule matches
/// and no exclude rule does. A calendar without include rules matches
/// nothing. The value is `Send + Sync` and can be shared across threads
/// behind an `Arc` without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDefinition {
    name: Option<String>,
    include: Vec<TimeWindowRule>,
    exclude: Vec<TimeWindowRule>,
}

impl CalendarDefinition {
    /// Creates a calendar from already validated rules.
    #[must_use]
    pub fn new(include: Vec<TimeWindowRule>, exclude: Vec<TimeWindowRule>) -> Self {
        Self {
            name: None,
            include,
            exclude,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// ## Summary
    /// Validates rule builders and assembles a calendar. Rules without a time
    /// zone use `default_timezone`, or UTC when that is `None`.
    ///
    /// All rules are validated before the calendar is returned; nothing is
    /// built from a partially valid definition.
    ///
    /// ## Errors
    /// Returns `WindowError::TimezoneError` for an unknown zone and
    /// `WindowError::ValidationError` for any other malformed rule, naming
    /// the offending rule.
    #[tracing::instrument(skip(include, exclude), fields(include = include.len(), exclude = exclude.len()))]
    pub fn from_builders(
        name: Option<String>,
        default_timezone: Option<&str>,
        include: Vec<TimeWindowRuleBuilder>,
        exclude: Vec<TimeWindowRuleBuilder>,
    ) -> WindowResult<Self> {
        let mut resolver = TimeZoneResolver::new();

        let include = build_rules(RuleList::Include, include, default_timezone, &mut resolver)?;
        let exclude = build_rules(RuleList::Exclude, exclude, default_timezone, &mut resolver)?;

        if include.is_empty() {
            tracing::warn!("Calendar has no include rules and will match nothing");
        }
        tracing::debug!("Calendar definition validated");

        Ok(Self {
            name,
            include,
            exclude,
        })
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn include_rules(&self) -> &[TimeWindowRule] {
        &self.include
    }

    #[must_use]
    pub fn exclude_rules(&self) -> &[TimeWindowRule] {
        &self.exclude
    }

    /// Returns the rule at `index` of `list`, if it exists.
    #[must_use]
    pub fn rule(&self, list: RuleList, index: usize) -> Option<&TimeWindowRule> {
        match list {
            RuleList::Include => self.include.get(index),
            RuleList::Exclude => self.exclude.get(index),
        }
    }
}

fn build_rules(
    list: RuleList,
    builders: Vec<TimeWindowRuleBuilder>,
    default_timezone: Option<&str>,
    resolver: &mut TimeZoneResolver,
) -> WindowResult<Vec<TimeWindowRule>> {
    builders
        .into_iter()
        .enumerate()
        .map(|(index, builder)| {
            let builder = builder.default_timezone(default_timezone);
            let tzid = builder.timezone_id().to_string();
            let name = builder.rule_name().map(str::to_string);

            builder.build_with_resolver(resolver).map_err(|source| {
                let rule = RuleLocation::new(list, index, name.as_deref());
                if source.kind == RuleErrorKind::UnknownTimezone {
                    WindowError::TimezoneError { rule, tzid }
                } else {
                    WindowError::ValidationError { rule, source }
                }
            })
        })
        .collect()
}
