//! Time zone resolution for window rules.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::collections::HashMap;
use std::str::FromStr;

/// Error during timezone resolution or conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}

/// Resolver for timezone identifiers.
///
/// Maintains a cache of resolved timezones so that calendars with many rules
/// in the same zone only normalize each identifier once.
#[derive(Debug)]
pub struct TimeZoneResolver {
    /// Cache of resolved IANA timezones by identifier as written.
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    /// Creates a new timezone resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// Identifiers not found in the tz database as written (Windows zone
    /// names, prefixed TZIDs, newer aliases) are normalized with ICU first.
    ///
    /// ## Errors
    ///
    /// Returns `ConversionError::UnknownTimezone` if the identifier cannot be resolved.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions to avoid repeated parsing.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ConversionError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let trimmed = tzid.trim();

        // Names known to the tz database are used as written; anything else
        // goes through normalization.
        let tz = Tz::from_str(trimmed)
            .or_else(|_e| Tz::from_str(&normalize_tzid(trimmed)))
            .map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))?;

        tracing::trace!(tzid, resolved = %tz, "Resolved timezone");
        self.cache.insert(tzid.to_string(), tz);

        Ok(tz)
    }
}

impl Default for TimeZoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes common timezone identifiers to IANA names.
///
/// Uses ICU4X for Windows timezone ID mapping and IANA canonicalization.
fn normalize_tzid(tzid: &str) -> String {
    let stripped = tzid.strip_prefix("/mozilla.org/").unwrap_or(tzid);

    // Try Windows timezone mapping first using ICU
    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        // Get the canonical IANA name from the BCP-47 timezone ID
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Try IANA parser for canonicalization (handles aliases like Europe/Kiev -> Europe/Kyiv)
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Converts a local datetime to UTC using the specified timezone.
///
/// Ambiguous local times (DST fold) resolve to the earlier instant.
///
/// ## Errors
///
/// Returns an error if the timezone cannot be resolved or the local time
/// does not exist (DST gap).
pub fn convert_to_utc(
    local_time: NaiveDateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime<Utc>, ConversionError> {
    let tz = resolver.resolve(tzid)?;

    match tz.from_local_datetime(&local_time) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{local_time} in timezone {tzid}"
        ))),
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(dt1, _dt2) => Ok(dt1.with_timezone(&Utc)),
    }
}

/// ## Summary
/// Converts a local datetime to UTC, with fallback handling for DST gaps.
///
/// This is a lenient version of `convert_to_utc` that shifts non-existent
/// times forward by one hour instead of returning an error.
///
/// ## Errors
///
/// Returns an error if the timezone cannot be resolved.
pub fn convert_to_utc_lenient(
    local_time: NaiveDateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime<Utc>, ConversionError> {
    match convert_to_utc(local_time, tzid, resolver) {
        Ok(dt) => Ok(dt),
        Err(ConversionError::NonExistentTime(_)) => {
            let shifted = local_time + chrono::Duration::hours(1);
            convert_to_utc(shifted, tzid, resolver)
        }
        Err(e) => Err(e),
    }
}
