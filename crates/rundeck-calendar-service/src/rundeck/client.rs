//! Rundeck REST API client.

use std::time::Duration;

use futures::future::try_join_all;
use reqwest::StatusCode;
use rundeck_calendar_core::config::RundeckConfig;
use rundeck_calendar_core::constants::{
    AUTH_TOKEN_HEADER, JOBS_EXPORT_ROUTE_SUFFIX, PROJECT_ROUTE_PREFIX, PROJECTS_ROUTE,
};

use super::parse::{parse_job_export, parse_project_names};
use crate::error::{ServiceError, ServiceResult};
use crate::schedule::JobSchedule;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Rundeck REST API, authenticated with an API token.
#[derive(Debug, Clone)]
pub struct RundeckClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl RundeckClient {
    /// ## Summary
    /// Builds a client for the server described by `config`, resolving the API
    /// token from the configured token or credentials file.
    ///
    /// ## Errors
    /// Returns an error if no usable API token is configured or the HTTP
    /// client cannot be built.
    pub fn new(config: &RundeckConfig) -> ServiceResult<Self> {
        let api_token = config.resolve_api_token()?;
        Self::with_token(config, api_token)
    }

    /// ## Summary
    /// Builds a client for the server described by `config` using `api_token`.
    ///
    /// ## Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_token(config: &RundeckConfig, api_token: String) -> ServiceResult<Self> {
        if config.accept_invalid_certs && config.ssl_enabled {
            tracing::warn!("TLS certificate verification is disabled for the Rundeck server");
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ServiceError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            api_token,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// ## Summary
    /// Fetches `route` and returns the response body.
    ///
    /// ## Errors
    /// Returns `ServiceError::Api` for any status other than 200 or 204, or an
    /// HTTP error if the request fails.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_xml(&self, route: &str) -> ServiceResult<String> {
        let url = format!("{}{route}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(AUTH_TOKEN_HEADER, &self.api_token)
            .header(reqwest::header::ACCEPT, "application/xml")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            tracing::error!(status = status.as_u16(), "Rundeck API request failed");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::trace!(body_len = body.len(), "Rundeck API response received");
        Ok(body)
    }

    /// ## Summary
    /// Lists the names of all projects on the server.
    ///
    /// ## Errors
    /// Returns an error if the request fails or the response is not a valid
    /// project list.
    #[tracing::instrument(skip(self))]
    pub async fn list_projects(&self) -> ServiceResult<Vec<String>> {
        let body = self.get_xml(PROJECTS_ROUTE).await?;
        let names = parse_project_names(body.as_bytes())?;
        tracing::info!(count = names.len(), "Listed Rundeck projects");
        Ok(names)
    }

    /// ## Summary
    /// Exports the jobs of `project` and returns those with an enabled schedule.
    ///
    /// ## Errors
    /// Returns an error if the request fails or the export cannot be parsed.
    #[tracing::instrument(skip(self))]
    pub async fn export_jobs(&self, project: &str) -> ServiceResult<Vec<JobSchedule>> {
        let route = format!("{PROJECT_ROUTE_PREFIX}/{project}{JOBS_EXPORT_ROUTE_SUFFIX}");
        let body = self.get_xml(&route).await?;
        let schedules = parse_job_export(project, body.as_bytes())?;
        tracing::debug!(count = schedules.len(), "Exported scheduled jobs");
        Ok(schedules)
    }

    /// ## Summary
    /// Exports the scheduled jobs of every project in `projects` concurrently.
    /// Results keep the order of `projects`.
    ///
    /// ## Errors
    /// Returns the first error of any project export.
    #[tracing::instrument(skip(self, projects), fields(project_count = projects.len()))]
    pub async fn fetch_job_schedules(&self, projects: &[String]) -> ServiceResult<Vec<JobSchedule>> {
        let exports = try_join_all(projects.iter().map(|project| self.export_jobs(project))).await?;
        Ok(exports.into_iter().flatten().collect())
    }
}
