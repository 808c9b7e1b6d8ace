//! Project list (`GET /api/1/projects`) parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::ParseResult;
use super::{path_ends_with, push_reference};

const PROJECT_NAME_PATH: [&str; 3] = ["projects", "project", "name"];

/// ## Summary
/// Extracts project names, in document order, from a project list response:
///
/// ```xml
/// <result success="true" apiversion="14">
///   <projects count="1">
///     <project><name>ops</name><description/></project>
///   </projects>
/// </result>
/// ```
///
/// An empty body yields no projects.
///
/// ## Errors
/// Returns an error if the XML is malformed.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_project_names(xml: &[u8]) -> ParseResult<Vec<String>> {
    if xml.is_empty() {
        tracing::debug!("Empty project list body");
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_reader(xml);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut names = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local_name_bytes = e.local_name();
                path.push(std::str::from_utf8(local_name_bytes.as_ref())?.to_owned());
                text.clear();
            }
            Ok(Event::Text(ref e)) => {
                if path_ends_with(&path, &PROJECT_NAME_PATH) {
                    let decoded = reader.decoder().decode(e.as_ref())?;
                    text.push_str(&decoded);
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if path_ends_with(&path, &PROJECT_NAME_PATH) {
                    push_reference(&mut text, e, reader.decoder())?;
                }
            }
            Ok(Event::End(_)) => {
                if path_ends_with(&path, &PROJECT_NAME_PATH) {
                    let name = text.trim();
                    if !name.is_empty() {
                        tracing::trace!(project = name, "Found project");
                        names.push(name.to_owned());
                    }
                    text.clear();
                }
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(count = names.len(), "Parsed project list");
    Ok(names)
}
