//! Job export (`GET /api/14/project/{project}/jobs/export`) parsing.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rundeck_calendar_window::cron::{CronExpression, CronField};

use super::error::{ParseError, ParseResult};
use super::push_reference;
use crate::schedule::JobSchedule;

/// Maps a structured schedule element and attribute to its cron field.
fn schedule_field(element: &str, attribute: &str) -> Option<CronField> {
    match (element, attribute) {
        ("time", "seconds") => Some(CronField::Second),
        ("time", "minute") => Some(CronField::Minute),
        ("time", "hour") => Some(CronField::Hour),
        ("month", "month") => Some(CronField::Month),
        ("month", "day") => Some(CronField::DayOfMonth),
        ("weekday", "day") => Some(CronField::DayOfWeek),
        ("year", "year") => Some(CronField::Year),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct ScheduleDraft {
    crontab: Option<String>,
    fields: Vec<(CronField, String)>,
}

impl ScheduleDraft {
    fn into_expression(self) -> ParseResult<CronExpression> {
        if let Some(crontab) = self.crontab {
            return Ok(CronExpression::parse(&crontab)?);
        }

        let mut cron = CronExpression::unspecified();
        for (field, value) in self.fields {
            cron = cron.with_field(field, &value)?;
        }
        Ok(cron)
    }
}

#[derive(Debug, Default)]
struct JobDraft {
    id: Option<String>,
    uuid: Option<String>,
    name: Option<String>,
    group: Option<String>,
    schedule_enabled: Option<String>,
    schedule: Option<ScheduleDraft>,
}

impl JobDraft {
    fn set_text(&mut self, element: &str, value: String) {
        match element {
            "id" => self.id = Some(value),
            "uuid" => self.uuid = Some(value),
            "name" => self.name = Some(value),
            "group" => self.group = Some(value),
            "scheduleEnabled" => self.schedule_enabled = Some(value),
            _ => {}
        }
    }

    /// Returns the job's schedule, or `None` for unscheduled or disabled jobs.
    fn finish(self, project: &str) -> ParseResult<Option<JobSchedule>> {
        let label = self.name.as_deref().unwrap_or_default();
        if self.schedule_enabled.as_deref() == Some("false") {
            tracing::debug!(job = label, "Skipping job with disabled schedule");
            return Ok(None);
        }
        let Some(schedule) = self.schedule else {
            tracing::trace!(job = label, "Skipping unscheduled job");
            return Ok(None);
        };

        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ParseError::missing_element("job/name"))?;
        let uuid = self
            .id
            .or(self.uuid)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ParseError::missing_element("job/id"))?;
        let cron = schedule.into_expression()?;
        tracing::debug!(project, job = %name, cron = %cron, "Found scheduled job");

        Ok(Some(JobSchedule::new(
            uuid,
            name,
            project,
            self.group.filter(|group| !group.is_empty()),
            cron,
        )))
    }
}

/// Parser state for one job export document.
struct JobExportParser<'a> {
    project: &'a str,
    path: Vec<String>,
    text: String,
    job: Option<JobDraft>,
    schedules: Vec<JobSchedule>,
}

impl<'a> JobExportParser<'a> {
    fn new(project: &'a str) -> Self {
        Self {
            project,
            path: Vec::new(),
            text: String::new(),
            job: None,
            schedules: Vec::new(),
        }
    }

    /// Element name of a direct child of the current job, if that is open.
    fn job_child(&self) -> Option<&str> {
        match self.path.as_slice() {
            [root, job, child] if root == "joblist" && job == "job" => Some(child.as_str()),
            _ => None,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> ParseResult<()> {
        let local_name_bytes = e.local_name();
        let local_name = std::str::from_utf8(local_name_bytes.as_ref())?.to_owned();
        self.path.push(local_name);
        self.text.clear();

        let depth_names: Vec<&str> = self.path.iter().map(String::as_str).collect();
        match depth_names.as_slice() {
            ["joblist", "job"] => {
                self.job = Some(JobDraft::default());
            }
            ["joblist", "job", "schedule"] => {
                let mut schedule = ScheduleDraft::default();
                for (key, value) in attributes(e)? {
                    if key == "crontab" {
                        schedule.crontab = Some(value);
                    }
                }
                if let Some(job) = self.job.as_mut() {
                    job.schedule = Some(schedule);
                }
            }
            ["joblist", "job", "schedule", element] => {
                let element = (*element).to_owned();
                let schedule = self.job.as_mut().and_then(|job| job.schedule.as_mut());
                if let Some(schedule) = schedule {
                    for (key, value) in attributes(e)? {
                        if let Some(field) = schedule_field(&element, &key) {
                            schedule.fields.push((field, value));
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self) -> ParseResult<()> {
        if let Some(child) = self.job_child().map(ToOwned::to_owned) {
            let value = self.text.trim().to_owned();
            if let Some(job) = self.job.as_mut() {
                job.set_text(&child, value);
            }
        } else if self.path.len() == 2 && self.path[1] == "job" {
            let project = self.project;
            let finished = self.job.take().map(|job| job.finish(project)).transpose()?;
            self.schedules.extend(finished.flatten());
        } else {
            // Nested workflow and option elements are not part of the schedule
        }
        self.text.clear();
        self.path.pop();
        Ok(())
    }
}

/// Collects an element's attributes as unescaped `(name, value)` pairs.
fn attributes(e: &BytesStart<'_>) -> ParseResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_owned();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)?.into_owned();
        pairs.push((key, value));
    }
    Ok(pairs)
}

/// ## Summary
/// Extracts the schedules of a project's jobs from a job export document:
///
/// ```xml
/// <joblist>
///   <job>
///     <id>c8a7...</id>
///     <name>nightly-backup</name>
///     <group>ops/backup</group>
///     <scheduleEnabled>true</scheduleEnabled>
///     <schedule>
///       <month month="*" />
///       <time hour="02" minute="30" seconds="0" />
///       <weekday day="*" />
///       <year year="*" />
///     </schedule>
///   </job>
/// </joblist>
/// ```
///
/// Jobs without a `schedule` element, or with `scheduleEnabled` set to
/// `false`, are skipped. A `crontab` attribute on `schedule` takes precedence
/// over the structured form; missing structured fields are `?`.
///
/// ## Errors
/// Returns an error if the XML is malformed, a scheduled job lacks its id or
/// name, or its schedule is not a valid cron expression.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_job_export(project: &str, xml: &[u8]) -> ParseResult<Vec<JobSchedule>> {
    if xml.is_empty() {
        tracing::debug!("Empty job export body");
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_reader(xml);
    let mut parser = JobExportParser::new(project);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => parser.open(e)?,
            Ok(Event::Empty(ref e)) => {
                parser.open(e)?;
                parser.close()?;
            }
            Ok(Event::Text(ref e)) => {
                if parser.job_child().is_some() {
                    let decoded = reader.decoder().decode(e.as_ref())?;
                    parser.text.push_str(&decoded);
                }
            }
            Ok(Event::CData(ref e)) => {
                if parser.job_child().is_some() {
                    let decoded = reader.decoder().decode(e.as_ref())?;
                    parser.text.push_str(&decoded);
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if parser.job_child().is_some() {
                    push_reference(&mut parser.text, e, reader.decoder())?;
                }
            }
            Ok(Event::End(_)) => parser.close()?,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(count = parser.schedules.len(), "Parsed job export");
    Ok(parser.schedules)
}
