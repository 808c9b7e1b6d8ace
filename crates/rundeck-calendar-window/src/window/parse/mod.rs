//! Reading calendar definitions from configuration documents.
//!
//! Definitions are deserialized through the `config` crate, so TOML, JSON
//! and YAML documents share one schema:
//!
//! ```toml
//! name = "business-hours"
//! timezone = "America/New_York"
//!
//! [[include]]
//! start = "09:00"
//! end = "17:00"
//! days = ["mon-fri"]
//!
//! [[exclude]]
//! name = "year-end freeze"
//! start = "00:00"
//! end = "24:00"
//! from = "2026-12-24"
//! until = "2026-12-31"
//! ```

mod definition;

pub use definition::{CalendarDocument, DefinitionFormat, RuleEntry, Token, Tokens};

use std::path::Path;

use config::Config;

use super::core::CalendarDefinition;
use crate::error::{WindowError, WindowResult};

/// ## Summary
/// Parses and validates a calendar definition document.
///
/// ## Errors
/// Returns `WindowError::ParseError` if the document cannot be deserialized,
/// or a validation/timezone error naming the offending rule.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_calendar(input: &str, format: DefinitionFormat) -> WindowResult<CalendarDefinition> {
    let document = Config::builder()
        .add_source(config::File::from_str(input, format.file_format()))
        .build()?
        .try_deserialize::<CalendarDocument>()?;

    document.into_calendar()
}

/// ## Summary
/// Reads, parses and validates a calendar definition file. The format is
/// chosen from the file extension.
///
/// ## Errors
/// Returns `WindowError::ParseError` if the extension is not recognized or
/// the file cannot be read or deserialized, or a validation/timezone error
/// naming the offending rule.
#[tracing::instrument]
pub fn load_calendar(path: &Path) -> WindowResult<CalendarDefinition> {
    let format = DefinitionFormat::from_path(path).ok_or_else(|| {
        WindowError::ParseError(format!(
            "unrecognized calendar definition extension: {}",
            path.display()
        ))
    })?;

    let document = Config::builder()
        .add_source(
            config::File::from(path)
                .format(format.file_format())
                .required(true),
        )
        .build()?
        .try_deserialize::<CalendarDocument>()?;

    tracing::debug!(?format, "Loaded calendar definition");
    document.into_calendar()
}
