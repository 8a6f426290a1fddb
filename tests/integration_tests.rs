//! Integration tests using mock HTTP server
//!
//! Tests the full flow: EventsClient → HttpClient → mock Events API

use chrono::{TimeZone, Utc};
use mailgun_events::config::ClientConfig;
use mailgun_events::http::{HttpClient, HttpClientConfig};
use mailgun_events::retry::RetryPolicy;
use mailgun_events::types::BackoffType;
use mailgun_events::{Credentials, Endpoints, Error, EventsClient, QueryParameters, Region};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOMAIN: &str = "mg.example.com";
const AUTH: &str = "Basic YXBpOnNlY3JldA==";

fn page(start: usize, count: usize, next: &str) -> Value {
    let items: Vec<Value> = (start..start + count)
        .map(|n| json!({ "id": format!("evt-{n}"), "recipient": format!("user{n}@example.com") }))
        .collect();
    json!({ "items": items, "paging": { "next": next } })
}

fn params() -> QueryParameters {
    QueryParameters::between(
        Utc.with_ymd_and_hms(2021, 6, 12, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2021, 6, 12, 23, 59, 0).unwrap(),
    )
    .filter("event", "delivered")
}

fn client_for(server: &MockServer) -> EventsClient {
    let config = HttpClientConfig::builder().no_rate_limit().build();
    let transport = HttpClient::with_config(config).unwrap();
    EventsClient::new(Arc::new(transport), Credentials::new("secret"))
        .with_endpoints(Endpoints::single(server.uri()))
}

fn ids(events: &[mailgun_events::Record]) -> Vec<String> {
    events
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Pagination over HTTP
// ============================================================================

#[tokio::test]
async fn test_single_page() {
    let server = MockServer::start().await;
    let next = format!("{}/v3/{DOMAIN}/events/cursor-2", server.uri());

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events")))
        .and(header("Authorization", AUTH))
        .and(query_param("begin", "1623456000"))
        .and(query_param("end", "1623542340"))
        .and(query_param("limit", "300"))
        .and(query_param("event", "delivered"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 12, &next)))
        .expect(1)
        .mount(&server)
        .await;

    let events = client_for(&server)
        .get(Region::Eu, DOMAIN, params())
        .await
        .unwrap();

    assert_eq!(events.len(), 12);
    assert_eq!(events[0]["recipient"], "user0@example.com");
}

#[tokio::test]
async fn test_follows_next_urls_until_empty_page() {
    let server = MockServer::start().await;
    let p2 = format!("{}/v3/{DOMAIN}/events/cursor-2", server.uri());
    let p3 = format!("{}/v3/{DOMAIN}/events/cursor-3", server.uri());
    let p4 = format!("{}/v3/{DOMAIN}/events/cursor-4", server.uri());

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 300, &p2)))
        .expect(1)
        .mount(&server)
        .await;

    // Continuation requests carry the first request's query again
    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events/cursor-2")))
        .and(header("Authorization", AUTH))
        .and(query_param("begin", "1623456000"))
        .and(query_param("limit", "300"))
        .and(query_param("event", "delivered"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(300, 150, &p3)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events/cursor-3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 0, &p4)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events/cursor-4")))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let events = client_for(&server)
        .get(Region::Us, DOMAIN, params())
        .await
        .unwrap();

    let expected: Vec<String> = (0..450).map(|n| format!("evt-{n}")).collect();
    assert_eq!(ids(&events), expected);
}

#[tokio::test]
async fn test_missing_begin_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 0, "x")))
        .expect(0)
        .mount(&server)
        .await;

    let parameters = QueryParameters::new().end(Utc::now());
    let err = client_for(&server)
        .get(Region::Eu, DOMAIN, parameters)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_unauthorized_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events")))
        .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get(Region::Eu, DOMAIN, params())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get(Region::Eu, DOMAIN, params())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
}

// ============================================================================
// Caller-side retry
// ============================================================================

#[tokio::test]
async fn test_retry_policy_restarts_whole_fetch() {
    let server = MockServer::start().await;
    let p2 = format!("{}/v3/{DOMAIN}/events/cursor-2", server.uri());
    let p3 = format!("{}/v3/{DOMAIN}/events/cursor-3", server.uri());

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 300, &p2)))
        .expect(2)
        .mount(&server)
        .await;

    // First continuation attempt fails, the second run succeeds
    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events/cursor-2")))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events/cursor-2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 0, &p3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let policy = RetryPolicy::none().max_retries(2).backoff(
        BackoffType::Constant,
        Duration::from_millis(5),
        Duration::from_millis(5),
    );

    let events = policy
        .run(|| client.get(Region::Eu, DOMAIN, params()))
        .await
        .unwrap();

    assert_eq!(events.len(), 300);
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_client_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/{DOMAIN}/events")))
        .and(header("Authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 3, "x")))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        "api_key: secret\nregion: us\nendpoints:\n  us: {}\ntimeout_secs: 5\n",
        server.uri()
    );
    let config = ClientConfig::from_yaml_str(&yaml).unwrap();

    let transport = HttpClient::with_config(config.http_config()).unwrap();
    let client = EventsClient::new(
        Arc::new(transport),
        Credentials::new(config.api_key().unwrap()),
    )
    .with_endpoints(config.endpoints());

    let events = client.get(config.region, DOMAIN, params()).await.unwrap();
    assert_eq!(events.len(), 3);
}
