//! Schedules of all jobs on a Rundeck server.

use crate::error::ServiceResult;
use crate::rundeck::RundeckClient;
use crate::schedule::{JobSchedule, schedule_summary};

/// Snapshot of a Rundeck server's projects and scheduled jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RundeckCalendar {
    project_names: Vec<String>,
    job_schedules: Vec<JobSchedule>,
}

impl RundeckCalendar {
    #[must_use]
    pub fn new(project_names: Vec<String>, job_schedules: Vec<JobSchedule>) -> Self {
        Self {
            project_names,
            job_schedules,
        }
    }

    /// ## Summary
    /// Lists every project and collects the schedules of their jobs.
    ///
    /// ## Errors
    /// Returns an error if any API request fails or returns an unreadable
    /// document.
    #[tracing::instrument(skip(client), fields(base_url = %client.base_url()))]
    pub async fn fetch(client: &RundeckClient) -> ServiceResult<Self> {
        let project_names = client.list_projects().await?;
        let job_schedules = client.fetch_job_schedules(&project_names).await?;
        tracing::info!(
            projects = project_names.len(),
            jobs = job_schedules.len(),
            "Collected Rundeck job schedules"
        );

        Ok(Self::new(project_names, job_schedules))
    }

    #[must_use]
    pub fn project_names(&self) -> &[String] {
        &self.project_names
    }

    #[must_use]
    pub fn job_schedules(&self) -> &[JobSchedule] {
        &self.job_schedules
    }

    /// Renders the schedule summary of all collected jobs.
    #[must_use]
    pub fn schedule_summary(&self) -> String {
        schedule_summary(&self.job_schedules)
    }
}
