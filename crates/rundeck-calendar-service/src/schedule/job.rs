use std::fmt;

use rundeck_calendar_window::cron::CronExpression;

/// A Rundeck job together with its Quartz schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSchedule {
    uuid: String,
    name: String,
    project: String,
    group: Option<String>,
    schedule: CronExpression,
}

impl JobSchedule {
    #[must_use]
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        project: impl Into<String>,
        group: Option<String>,
        schedule: CronExpression,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            project: project.into(),
            group,
            schedule,
        }
    }

    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[must_use]
    pub fn schedule(&self) -> &CronExpression {
        &self.schedule
    }

    /// Returns `group/name`, or just `name` for ungrouped jobs.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.group {
            Some(group) => format!("{group}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Formats as `project:group/name: <cron fields>`.
impl fmt::Display for JobSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.project, self.full_name(), self.schedule)
    }
}
