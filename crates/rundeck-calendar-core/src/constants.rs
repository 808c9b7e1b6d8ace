/// Rundeck REST API path components
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

/// API version used to list projects.
pub const PROJECTS_API_VERSION: &str = "1";
pub const PROJECTS_ROUTE: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", PROJECTS_API_VERSION, "/projects");

/// API version used to export a project's job definitions.
pub const JOBS_EXPORT_API_VERSION: &str = "14";
pub const PROJECT_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", JOBS_EXPORT_API_VERSION, "/project");
pub const JOBS_EXPORT_ROUTE_SUFFIX: &str = "/jobs/export";

/// Header carrying the Rundeck API token.
pub const AUTH_TOKEN_HEADER: &str = "X-RunDeck-Auth-Token";

/// Section and key of the credentials ini file.
pub const CREDENTIALS_SECTION: &str = "credentials";
pub const CREDENTIALS_TOKEN_KEY: &str = "apitoken";

/// Prefix for environment variable overrides, e.g. `RUNDECK_CALENDAR__RUNDECK__HOST`.
pub const ENV_PREFIX: &str = "RUNDECK_CALENDAR";

/// Default time zone for window rules that do not declare one.
pub const DEFAULT_TIMEZONE: &str = "UTC";
