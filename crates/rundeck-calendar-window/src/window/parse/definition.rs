//! Serialized form of calendar definitions.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::WindowResult;
use crate::window::core::{CalendarDefinition, TimeWindowRule, TimeWindowRuleBuilder};

/// Document format of a calendar definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionFormat {
    Toml,
    Json,
    Yaml,
}

impl DefinitionFormat {
    /// Picks the format from a file extension (`toml`, `json`, `yaml`, `yml`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Some(match extension.as_str() {
            "toml" => Self::Toml,
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            _ => return None,
        })
    }

    pub(crate) const fn file_format(self) -> config::FileFormat {
        match self {
            Self::Toml => config::FileFormat::Toml,
            Self::Json => config::FileFormat::Json,
            Self::Yaml => config::FileFormat::Yaml,
        }
    }
}

/// A single token; numbers are accepted so that `days_of_month = [1, 15]`
/// works as well as `["1", "15"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Text(String),
    Number(i64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// A token list, written either as a list or as one comma separated value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Tokens {
    Many(Vec<Token>),
    One(Token),
}

impl Tokens {
    fn into_strings(self) -> Vec<String> {
        match self {
            Self::Many(tokens) => tokens.iter().map(ToString::to_string).collect(),
            Self::One(token) => vec![token.to_string()],
        }
    }
}

/// One include or exclude rule as written in a definition document.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub days: Option<Tokens>,
    #[serde(default)]
    pub days_of_month: Option<Tokens>,
    #[serde(default)]
    pub months: Option<Tokens>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub until: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl RuleEntry {
    /// Converts the serialized rule into an unvalidated builder.
    #[must_use]
    pub fn into_builder(self) -> TimeWindowRuleBuilder {
        let mut builder = TimeWindowRule::builder(self.start, self.end);
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(days) = self.days {
            builder = builder.days(days.into_strings());
        }
        if let Some(days) = self.days_of_month {
            builder = builder.days_of_month(days.into_strings());
        }
        if let Some(months) = self.months {
            builder = builder.months(months.into_strings());
        }
        if let Some(from) = self.from {
            builder = builder.from(from);
        }
        if let Some(until) = self.until {
            builder = builder.until(until);
        }
        if let Some(timezone) = self.timezone {
            builder = builder.timezone(timezone);
        }
        builder
    }
}

/// A calendar as written in a definition document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarDocument {
    #[serde(default)]
    pub name: Option<String>,
    /// Time zone for rules that do not declare one.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub include: Vec<RuleEntry>,
    #[serde(default)]
    pub exclude: Vec<RuleEntry>,
}

impl CalendarDocument {
    /// ## Summary
    /// Validates the definition and produces an immutable calendar.
    ///
    /// ## Errors
    /// Returns a validation or timezone error naming the offending rule.
    pub fn into_calendar(self) -> WindowResult<CalendarDefinition> {
        CalendarDefinition::from_builders(
            self.name,
            self.timezone.as_deref(),
            self.include.into_iter().map(RuleEntry::into_builder).collect(),
            self.exclude.into_iter().map(RuleEntry::into_builder).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DefinitionFormat::from_path(Path::new("calendar.toml")),
            Some(DefinitionFormat::Toml)
        );
        assert_eq!(
            DefinitionFormat::from_path(Path::new("/etc/windows.YML")),
            Some(DefinitionFormat::Yaml)
        );
        assert_eq!(
            DefinitionFormat::from_path(Path::new("calendar.json")),
            Some(DefinitionFormat::Json)
        );
        assert_eq!(DefinitionFormat::from_path(Path::new("calendar.ini")), None);
        assert_eq!(DefinitionFormat::from_path(Path::new("calendar")), None);
    }

    #[test]
    fn test_tokens_from_json() {
        let tokens: Tokens = serde_json::from_str(r#"["mon-fri", "sun"]"#).expect("valid");
        assert_eq!(tokens.into_strings(), vec!["mon-fri", "sun"]);

        let tokens: Tokens = serde_json::from_str(r#""mon,wed""#).expect("valid");
        assert_eq!(tokens.into_strings(), vec!["mon,wed"]);

        let tokens: Tokens = serde_json::from_str("[1, 15, \"last\"]").expect("valid");
        assert_eq!(tokens.into_strings(), vec!["1", "15", "last"]);
    }

    #[test]
    fn test_rule_spec_into_builder() {
        let entry: RuleEntry = serde_json::from_str(
            r#"{"name": "night", "start": "22:00", "end": "02:00", "days": "mon-thu", "timezone": "Europe/Paris"}"#,
        )
        .expect("valid");

        let rule = entry.into_builder().build().expect("valid rule");
        assert_eq!(rule.name(), Some("night"));
        assert!(rule.spans_midnight());
        assert_eq!(rule.timezone(), chrono_tz::Tz::Europe__Paris);
    }
}
