#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use scolara_api::types::{StudentFilter, SubjectCreate};
use scolara_api::{ApiClient, Error, MemoryTokenStore, TokenStore};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient, Arc<MemoryTokenStore>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let tokens = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, tokens.clone());
    (server, client, tokens)
}

/// Matches requests that carry no Authorization header at all.
struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn uuid(n: u8) -> uuid::Uuid {
    uuid::Uuid::from_u128(u128::from(n))
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_is_form_encoded() {
    let (server, client, tokens) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=admin%40school.test"))
        .and(body_string_contains("password=pw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t1",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let secret: SecretString = "pw".to_string().into();
    let token = client.login("admin@school.test", &secret).await.unwrap();

    assert_eq!(token.expose_secret(), "t1");
    // The client returns the token; persisting it is the coordinator's job.
    assert!(tokens.get().is_none());
}

#[tokio::test]
async fn test_login_failure_is_authentication_error() {
    let (server, client, tokens) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Incorrect username or password"))
        .mount(&server)
        .await;

    let secret: SecretString = "wrong".to_string().into();
    let result = client.login("admin@school.test", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(
                message.contains("Incorrect username or password"),
                "expected server text in message, got: {message}"
            );
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
    assert!(tokens.get().is_none());
}

#[tokio::test]
async fn test_login_without_token_in_response_fails() {
    let (server, client, _tokens) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "bearer" })))
        .mount(&server)
        .await;

    let secret: SecretString = "pw".to_string().into();
    let result = client.login("admin@school.test", &secret).await;

    assert!(matches!(result, Err(Error::Authentication { .. })));
}

// ── Bearer token tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached_when_present() {
    let (server, client, tokens) = setup().await;
    tokens.set(SecretString::from("t1"));

    Mock::given(method("GET"))
        .and(path("/subjects"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let subjects = client.list_subjects().await.unwrap();
    assert!(subjects.is_empty());
}

#[tokio::test]
async fn test_401_clears_token_and_next_request_is_unauthenticated() {
    let (server, client, tokens) = setup().await;
    tokens.set(SecretString::from("stale"));

    Mock::given(method("GET"))
        .and(path("/subjects"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subjects"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let first = client.list_subjects().await;
    assert!(matches!(first, Err(Error::SessionExpired)));
    assert!(tokens.get().is_none(), "401 must clear the token slot");

    // The very next call goes out with no Authorization header.
    client.list_subjects().await.unwrap();
}

// ── Body encoding tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_json_mutation_is_json_content_typed() {
    let (server, client, _tokens) = setup().await;

    Mock::given(method("POST"))
        .and(path("/subjects"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "Mathematics", "code": "MATH" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": uuid(1),
            "name": "Mathematics",
            "code": "MATH"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_subject(&SubjectCreate {
            name: "Mathematics".into(),
            code: Some("MATH".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Mathematics");
}

#[tokio::test]
async fn test_list_filters_become_query_params() {
    let (server, client, _tokens) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .and(query_param("school_id", uuid(9).to_string()))
        .and(query_param("grade_level", "3"))
        .and(query_param("is_active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = StudentFilter {
        school_id: Some(uuid(9)),
        grade_level: Some("3".into()),
        is_active: Some(true),
    };
    client.list_students(&filter).await.unwrap();
}

// ── Response normalization tests ────────────────────────────────────

#[tokio::test]
async fn test_api_error_carries_status_and_raw_body() {
    let (server, client, _tokens) = setup().await;

    Mock::given(method("GET"))
        .and(path("/classrooms"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let result = client.list_classrooms().await;

    match result {
        Err(Error::Api { status, ref body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_schema_mismatch_is_surfaced() {
    let (server, client, _tokens) = setup().await;

    Mock::given(method("GET"))
        .and(path("/classrooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "an array" })))
        .mount(&server)
        .await;

    let result = client.list_classrooms().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert!(body.contains("not"), "raw body should be kept: {body}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_ignores_response_body() {
    let (server, client, _tokens) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/subjects/{}", uuid(4))))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_subject(&uuid(4)).await.unwrap();
}

#[tokio::test]
async fn test_room_usage_shape() {
    let (server, client, _tokens) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/rooms/{}/usage", uuid(7))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "room": {
                "id": uuid(7),
                "name": "Art Room",
                "code": "ART-1",
                "type": "ART",
                "capacity": 20
            },
            "is_available": false,
            "assigned_classrooms": [
                { "id": uuid(8), "name": "3B", "grade_level": "3", "subject": "Art" }
            ],
            "usage_count": 1
        })))
        .mount(&server)
        .await;

    let usage = client.room_usage(&uuid(7)).await.unwrap();
    assert!(!usage.is_available);
    assert_eq!(usage.usage_count, 1);
    assert_eq!(usage.assigned_classrooms.len(), 1);
    assert_eq!(usage.room.room_type, "ART");
}
