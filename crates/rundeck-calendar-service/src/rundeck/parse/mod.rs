//! Rundeck XML response parsing.
//!
//! Responses are read with `quick-xml` while tracking the path of open
//! elements, so only direct children of the expected parents are picked up.
//! Job exports nest workflow steps and options that reuse element names such
//! as `name`, which a flat search would confuse with the job's own.

mod error;
mod jobs;
mod projects;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use jobs::parse_job_export;
pub use projects::parse_project_names;

use quick_xml::encoding::Decoder;
use quick_xml::events::BytesRef;

/// Returns whether `path` ends with the element names in `suffix`.
pub(crate) fn path_ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(open, expected)| open == expected)
}

/// Appends the text an entity or character reference stands for.
pub(crate) fn push_reference(
    text: &mut String,
    reference: &BytesRef<'_>,
    decoder: Decoder,
) -> ParseResult<()> {
    if let Some(ch) = reference.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }

    let name = decoder.decode(reference.as_ref())?;
    match quick_xml::escape::resolve_predefined_entity(&name) {
        Some(value) => {
            text.push_str(value);
            Ok(())
        }
        None => Err(ParseError::invalid_value(format!(
            "unknown entity reference: &{name};"
        ))),
    }
}
