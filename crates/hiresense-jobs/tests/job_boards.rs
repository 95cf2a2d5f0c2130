//! Integration tests for `JobBoardClient` and `fetch_all_jobs`.
//!
//! Each test mounts the three board endpoints on a local `wiremock` server,
//! so no real network traffic is made. Coverage: per-board normalization,
//! failure isolation between boards, and deduplication across boards and
//! across successive calls.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hiresense_core::{JobSource, JobType};
use hiresense_jobs::{fetch_all_jobs, JobBoardClient, RawListing, SeenKeys, SourceBaseUrls};

/// Builds a `JobBoardClient` with every board pointed at `server`.
fn test_client(server: &MockServer) -> JobBoardClient {
    JobBoardClient::with_base_urls(
        5,
        "hiresense-test/0.1",
        200,
        SourceBaseUrls {
            remoteok: server.uri(),
            remotive: server.uri(),
            arbeitnow: server.uri(),
        },
    )
    .expect("failed to build test JobBoardClient")
}

fn remoteok_body() -> serde_json::Value {
    json!([
        { "legal": "API Terms of Service" },
        {
            "id": "9001",
            "epoch": 1_700_000_000,
            "slug": "senior-rust-engineer-ferrous-9001",
            "company": "Ferrous",
            "company_logo": "https://remoteok.com/logo.png",
            "position": "Senior Rust Engineer",
            "tags": ["rust", "backend"],
            "description": "<p>Build <b>fast</b> services &amp; tools</p>",
            "location": "",
            "salary_min": 120_000,
            "salary_max": "160000",
            "url": "https://remoteok.com/remote-jobs/9001",
            "date": "2024-03-01T12:00:00+00:00"
        },
        {
            "id": 9002,
            "company": "NoTitle Inc"
        }
    ])
}

fn remotive_body() -> serde_json::Value {
    json!({
        "job-count": 2,
        "jobs": [
            {
                "id": 555,
                "url": "https://remotive.com/remote-jobs/555",
                "title": "Frontend Developer",
                "company_name": "Pixel Co",
                "company_logo_url": null,
                "category": "Software Development",
                "tags": ["react", "typescript"],
                "job_type": "contract",
                "publication_date": "2024-02-10T08:00:00",
                "candidate_required_location": "Europe",
                "salary": "$90,000 - $110,000",
                "description": "<div>React dashboards</div>"
            },
            {
                "id": 556,
                "title": "Senior Rust Engineer",
                "company_name": "ferrous",
                "job_type": "full_time"
            }
        ]
    })
}

fn arbeitnow_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "slug": "qa-analyst-testwerk-berlin",
                "company_name": "Testwerk",
                "title": "QA Analyst",
                "description": "<p>Manual and automated testing</p>",
                "remote": false,
                "url": "https://www.arbeitnow.com/view/qa-analyst-testwerk-berlin",
                "tags": ["testing"],
                "job_types": ["Part Time"],
                "location": "Berlin",
                "created_at": 1_706_000_000
            },
            {
                "slug": "devops-engineer-cloudy",
                "company_name": "Cloudy",
                "title": "DevOps Engineer",
                "description": "Kubernetes and Terraform",
                "remote": true,
                "tags": [],
                "job_types": [],
                "location": "Munich",
                "created_at": 1_706_100_000
            }
        ]
    })
}

async fn mount_all(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remoteok_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/remote-jobs"))
        .and(query_param("limit", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remotive_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/job-board-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(arbeitnow_body()))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Per-board normalization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remoteok_skips_legal_notice_and_incomplete_items() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let listings = test_client(&server)
        .fetch_source(JobSource::RemoteOk, None)
        .await;

    assert_eq!(listings.len(), 1, "got: {listings:?}");
    let job = &listings[0];
    assert_eq!(job.id, "rok-9001");
    assert_eq!(job.title, "Senior Rust Engineer");
    assert_eq!(job.location, "Remote");
    assert_eq!(job.description, "Build fast services & tools");
    assert_eq!(job.salary_min, Some(120_000));
    assert_eq!(job.salary_max, Some(160_000));
    assert_eq!(job.category, "Backend");
    assert_eq!(job.job_type, JobType::FullTime);
    assert_eq!(job.posted_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
}

#[tokio::test]
async fn remoteok_sends_query_as_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("tag", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remoteok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let listings = test_client(&server)
        .fetch_source(JobSource::RemoteOk, Some("rust"))
        .await;
    assert_eq!(listings.len(), 1);
}

#[tokio::test]
async fn remotive_maps_salary_job_type_and_category() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let listings = test_client(&server)
        .fetch_source(JobSource::Remotive, None)
        .await;

    assert_eq!(listings.len(), 2);
    let job = &listings[0];
    assert_eq!(job.id, "rmv-555");
    assert_eq!(job.job_type, JobType::Contract);
    assert_eq!(job.salary_min, Some(90_000));
    assert_eq!(job.salary_max, Some(110_000));
    assert_eq!(job.category, "Software Development");
    assert_eq!(job.location, "Europe");
    assert_eq!(job.description, "React dashboards");

    // No category supplied: tags fall back to nothing and the title decides.
    let second = &listings[1];
    assert_eq!(second.location, "Remote");
    assert!(second.tags.is_empty());
    assert_eq!(second.category, "Backend");
}

#[tokio::test]
async fn remotive_passes_search_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/remote-jobs"))
        .and(query_param("limit", "200"))
        .and(query_param("search", "react dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remotive_body()))
        .expect(1)
        .mount(&server)
        .await;

    let listings = test_client(&server)
        .fetch_source(JobSource::Remotive, Some("react dev"))
        .await;
    assert_eq!(listings.len(), 2);
}

#[tokio::test]
async fn arbeitnow_maps_remote_flag_and_job_types() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let listings = test_client(&server)
        .fetch_source(JobSource::Arbeitnow, None)
        .await;

    assert_eq!(listings.len(), 2);
    let qa = &listings[0];
    assert_eq!(qa.id, "abn-qa-analyst-testwerk-berlin");
    assert_eq!(qa.location, "Berlin");
    assert_eq!(qa.job_type, JobType::PartTime);
    assert_eq!(qa.category, "QA");
    assert_eq!(qa.salary_min, None);

    let devops = &listings[1];
    assert_eq!(devops.location, "Remote");
    assert_eq!(devops.job_type, JobType::FullTime);
    assert_eq!(devops.category, "DevOps");
    assert_eq!(
        devops.url,
        "https://www.arbeitnow.com/view/devops-engineer-cloudy"
    );
}

#[tokio::test]
async fn arbeitnow_filters_query_client_side() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let listings = test_client(&server)
        .fetch_source(JobSource::Arbeitnow, Some("KUBERNETES"))
        .await;

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "DevOps Engineer");
}

#[tokio::test]
async fn fetch_raw_returns_board_payloads() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let raw = test_client(&server)
        .fetch_raw(JobSource::Remotive, None)
        .await
        .expect("remotive fetch should succeed");

    assert_eq!(raw.len(), 2);
    assert!(matches!(
        &raw[0],
        RawListing::Remotive(job) if job.title.as_deref() == Some("Frontend Developer")
    ));
}

// ---------------------------------------------------------------------------
// Failure isolation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_yields_empty_and_fetch_raw_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/remote-jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.fetch_source(JobSource::Remotive, None).await.is_empty());

    let err = client
        .fetch_raw(JobSource::Remotive, None)
        .await
        .expect_err("500 must fail fetch_raw");
    assert!(
        matches!(err, hiresense_jobs::JobsError::UnexpectedStatus { status: 500, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_source_does_not_block_the_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/remote-jobs"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/job-board-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(arbeitnow_body()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut seen = SeenKeys::new();
    let listings = fetch_all_jobs(&client, &JobSource::ALL, None, &mut seen).await;

    assert_eq!(listings.len(), 2);
    assert!(listings.iter().all(|l| l.source == JobSource::Arbeitnow));
}

#[tokio::test]
async fn malformed_fetch_raw_reports_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job-board-api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": ["))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_raw(JobSource::Arbeitnow, None)
        .await
        .expect_err("truncated JSON must fail fetch_raw");
    assert!(
        matches!(err, hiresense_jobs::JobsError::Deserialize { .. }),
        "got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Aggregation and deduplication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_jobs_merges_in_source_order_and_dedups() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let client = test_client(&server);
    let mut seen = SeenKeys::new();
    // Reverse order and a duplicate entry: output order is still canonical.
    let sources = [
        JobSource::Arbeitnow,
        JobSource::RemoteOk,
        JobSource::Remotive,
        JobSource::RemoteOk,
    ];
    let listings = fetch_all_jobs(&client, &sources, None, &mut seen).await;

    let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    // rmv-556 repeats "Senior Rust Engineer" at "ferrous", already seen from RemoteOK.
    assert_eq!(
        ids,
        vec![
            "rok-9001",
            "rmv-555",
            "abn-qa-analyst-testwerk-berlin",
            "abn-devops-engineer-cloudy"
        ]
    );
    assert_eq!(seen.len(), 4);
}

#[tokio::test]
async fn seen_keys_suppress_repeats_until_reset() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let client = test_client(&server);
    let mut seen = SeenKeys::new();

    let first = fetch_all_jobs(&client, &JobSource::ALL, None, &mut seen).await;
    assert_eq!(first.len(), 4);

    let second = fetch_all_jobs(&client, &JobSource::ALL, None, &mut seen).await;
    assert!(second.is_empty(), "got: {second:?}");

    seen.reset();
    let third = fetch_all_jobs(&client, &JobSource::ALL, None, &mut seen).await;
    assert_eq!(
        third.iter().map(|l| &l.id).collect::<Vec<_>>(),
        first.iter().map(|l| &l.id).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn fetch_all_jobs_with_no_sources_is_empty() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let mut seen = SeenKeys::new();
    let listings = fetch_all_jobs(&test_client(&server), &[], Some("rust"), &mut seen).await;
    assert!(listings.is_empty());
    assert!(seen.is_empty());
}
