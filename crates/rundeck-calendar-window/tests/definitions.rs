//! Reading calendar definitions from documents and files.

use std::io::Write;

use chrono::{TimeZone, Utc};
use rundeck_calendar_window::WindowError;
use rundeck_calendar_window::window::{
    DefinitionFormat, RuleErrorKind, RuleList, load_calendar, matches, parse_calendar,
};

const BUSINESS_HOURS_TOML: &str = r#"
name = "business-hours"
timezone = "America/New_York"

[[include]]
name = "weekdays"
start = "09:00"
end = "17:00"
days = ["mon-fri"]

[[exclude]]
name = "year-end freeze"
start = "00:00"
end = "24:00"
from = "2026-12-24"
until = "2026-12-31"
"#;

#[test_log::test]
fn toml_definition() {
    let calendar =
        parse_calendar(BUSINESS_HOURS_TOML, DefinitionFormat::Toml).expect("valid definition");

    assert_eq!(calendar.name(), Some("business-hours"));
    assert_eq!(calendar.include_rules().len(), 1);
    assert_eq!(calendar.exclude_rules().len(), 1);

    // Wednesday 10:00 EDT
    assert!(matches(&calendar, &Utc.with_ymd_and_hms(2026, 10, 14, 14, 0, 0).unwrap()));
    // Wednesday 10:00 UTC is 06:00 EDT
    assert!(!matches(&calendar, &Utc.with_ymd_and_hms(2026, 10, 14, 10, 0, 0).unwrap()));
    // Monday 2026-12-28 10:00 EST falls in the freeze
    assert!(!matches(&calendar, &Utc.with_ymd_and_hms(2026, 12, 28, 15, 0, 0).unwrap()));
}

#[test]
fn json_definition() {
    let input = r#"{
        "include": [
            {"start": "22:00", "end": "02:00", "days": "fri,sat", "timezone": "UTC"}
        ],
        "exclude": [
            {"start": "00:00", "end": "01:00", "days_of_month": [1, "last"]}
        ]
    }"#;

    let calendar = parse_calendar(input, DefinitionFormat::Json).expect("valid definition");
    // Friday 2026-10-16 23:00
    assert!(matches(&calendar, &Utc.with_ymd_and_hms(2026, 10, 16, 23, 0, 0).unwrap()));
    // Saturday 2026-10-31 00:30 is in Friday's window but on the last day
    assert!(!matches(&calendar, &Utc.with_ymd_and_hms(2026, 10, 31, 0, 30, 0).unwrap()));
}

#[test]
fn yaml_definition() {
    let input = "
include:
  - start: \"08:00\"
    end: \"12:00\"
    months: [jun-aug]
";

    let calendar = parse_calendar(input, DefinitionFormat::Yaml).expect("valid definition");
    assert!(matches(&calendar, &Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap()));
    assert!(!matches(&calendar, &Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()));
}

#[test]
fn empty_definition_matches_nothing() {
    let calendar = parse_calendar("", DefinitionFormat::Toml).expect("valid definition");
    assert!(calendar.include_rules().is_empty());
    assert!(!matches(&calendar, &Utc::now()));
}

#[test]
fn missing_required_field_is_a_parse_error() {
    let input = "[[include]]\nstart = \"09:00\"\n";
    let err = parse_calendar(input, DefinitionFormat::Toml).unwrap_err();
    assert!(matches!(err, WindowError::ParseError(_)));
}

#[test]
fn invalid_rule_rejects_whole_definition() {
    let input = r#"
[[include]]
start = "09:00"
end = "17:00"

[[include]]
name = "broken"
start = "09:00"
end = "17:00"
days = ["mon", "blursday"]
"#;

    match parse_calendar(input, DefinitionFormat::Toml).unwrap_err() {
        WindowError::ValidationError { rule, source } => {
            assert_eq!(rule.list, RuleList::Include);
            assert_eq!(rule.index, 1);
            assert_eq!(rule.name.as_deref(), Some("broken"));
            assert_eq!(source.kind, RuleErrorKind::InvalidDay);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_timezone_is_a_timezone_error() {
    let input = r#"
timezone = "Moon/Tranquility"

[[include]]
start = "09:00"
end = "17:00"
"#;

    match parse_calendar(input, DefinitionFormat::Toml).unwrap_err() {
        WindowError::TimezoneError { rule, tzid } => {
            assert_eq!(rule.to_string(), "include[0]");
            assert_eq!(tzid, "Moon/Tranquility");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test_log::test]
fn load_calendar_from_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(BUSINESS_HOURS_TOML.as_bytes())
        .expect("write definition");

    let calendar = load_calendar(file.path()).expect("valid definition");
    assert_eq!(calendar.name(), Some("business-hours"));
}

#[test]
fn load_calendar_unknown_extension() {
    let file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("temp file");

    let err = load_calendar(file.path()).unwrap_err();
    assert!(matches!(err, WindowError::ParseError(_)));
}
