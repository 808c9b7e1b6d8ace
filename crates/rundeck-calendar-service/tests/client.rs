//! Tests for the Rundeck API client against a mock server.

use rundeck_calendar_core::config::RundeckConfig;
use rundeck_calendar_service::rundeck::RundeckClient;
use rundeck_calendar_service::{RundeckCalendar, ServiceError};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

const TOKEN: &str = "test-token";

const PROJECTS: &str = r#"<result success="true" apiversion="14">
  <projects count="2">
    <project><name>ops</name><description>Operations</description></project>
    <project><name>billing</name><description/></project>
  </projects>
</result>"#;

const OPS_JOBS: &str = r#"<joblist>
  <job>
    <id>ops-1</id>
    <name>backup</name>
    <group>nightly</group>
    <scheduleEnabled>true</scheduleEnabled>
    <schedule>
      <month month="*" />
      <time hour="02" minute="30" seconds="0" />
      <weekday day="*" />
      <year year="*" />
    </schedule>
  </job>
  <job>
    <id>ops-2</id>
    <name>adhoc</name>
  </job>
</joblist>"#;

const BILLING_JOBS: &str = r#"<joblist>
  <job>
    <id>billing-1</id>
    <name>invoice</name>
    <schedule crontab="0 0 6 ? * MON-FRI *" />
  </job>
</joblist>"#;

fn config_for(server: &MockServer) -> RundeckConfig {
    RundeckConfig {
        host: server.address().ip().to_string(),
        port: server.address().port(),
        ssl_enabled: false,
        accept_invalid_certs: false,
        api_token: Some(TOKEN.to_string()),
        credentials_file: None,
    }
}

async fn mount_xml(server: &MockServer, route: &str, body: &str) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path(route))
        .and(matchers::header("X-RunDeck-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[test_log::test(tokio::test)]
async fn list_projects_sends_token_and_parses_names() {
    let server = MockServer::start().await;
    mount_xml(&server, "/api/1/projects", PROJECTS).await;

    let client = RundeckClient::new(&config_for(&server)).expect("client");
    let projects = client.list_projects().await.expect("projects");

    assert_eq!(projects, vec!["ops".to_string(), "billing".to_string()]);
}

#[test_log::test(tokio::test)]
async fn export_jobs_keeps_only_scheduled_jobs() {
    let server = MockServer::start().await;
    mount_xml(&server, "/api/14/project/ops/jobs/export", OPS_JOBS).await;

    let client = RundeckClient::new(&config_for(&server)).expect("client");
    let schedules = client.export_jobs("ops").await.expect("jobs");

    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].uuid(), "ops-1");
    assert_eq!(schedules[0].to_string(), "ops:nightly/backup: 0 30 02 ? * * *");
}

#[test_log::test(tokio::test)]
async fn fetch_collects_all_projects_in_order() {
    let server = MockServer::start().await;
    mount_xml(&server, "/api/1/projects", PROJECTS).await;
    mount_xml(&server, "/api/14/project/ops/jobs/export", OPS_JOBS).await;
    mount_xml(&server, "/api/14/project/billing/jobs/export", BILLING_JOBS).await;

    let client = RundeckClient::new(&config_for(&server)).expect("client");
    let calendar = RundeckCalendar::fetch(&client).await.expect("calendar");

    assert_eq!(calendar.project_names(), ["ops".to_string(), "billing".to_string()]);
    assert_eq!(
        calendar.schedule_summary(),
        "project:job: second minute hour day_of_month month day_of_week year\n\
         ops:nightly/backup: 0 30 02 ? * * *\n\
         billing:invoice: 0 0 6 ? * MON-FRI *\n"
    );
}

#[test_log::test(tokio::test)]
async fn fetch_with_no_projects_is_empty() {
    let server = MockServer::start().await;
    mount_xml(
        &server,
        "/api/1/projects",
        r#"<result success="true"><projects count="0"/></result>"#,
    )
    .await;

    let client = RundeckClient::new(&config_for(&server)).expect("client");
    let calendar = RundeckCalendar::fetch(&client).await.expect("calendar");

    assert!(calendar.project_names().is_empty());
    assert!(calendar.job_schedules().is_empty());
}

#[test_log::test(tokio::test)]
async fn no_content_response_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/1/projects"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = RundeckClient::new(&config_for(&server)).expect("client");
    assert!(client.list_projects().await.expect("projects").is_empty());
}

#[test_log::test(tokio::test)]
async fn error_status_returns_api_error() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/1/projects"))
        .respond_with(ResponseTemplate::new(403).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = RundeckClient::new(&config_for(&server)).expect("client");
    let err = client.list_projects().await.unwrap_err();

    match err {
        ServiceError::Api { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn failing_project_export_fails_fetch() {
    let server = MockServer::start().await;
    mount_xml(&server, "/api/1/projects", PROJECTS).await;
    mount_xml(&server, "/api/14/project/ops/jobs/export", OPS_JOBS).await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/api/14/project/billing/jobs/export"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = RundeckClient::new(&config_for(&server)).expect("client");
    let err = RundeckCalendar::fetch(&client).await.unwrap_err();
    assert!(matches!(err, ServiceError::Api { status: 500, .. }));
}

#[test]
fn client_requires_token() {
    let config = RundeckConfig {
        host: "localhost".to_string(),
        port: 4440,
        ssl_enabled: true,
        accept_invalid_certs: true,
        api_token: None,
        credentials_file: None,
    };

    let err = RundeckClient::new(&config).unwrap_err();
    assert!(matches!(err, ServiceError::CoreError(_)));
}
