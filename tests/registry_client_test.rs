//! Integration tests for the registry client against a mocked registry.

mod common;

use std::time::Duration;

use serde_json::json;
use tfe_release::{RegistryApi, RegistryError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{CREATE_PATH, VERSIONS_PATH, coordinate, mock_client};

const TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// VERSION LISTING
// =============================================================================

#[tokio::test]
async fn test_list_versions_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VERSIONS_PATH))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "acme/vpc/aws",
            "versions": ["1.0.0", "1.1.0"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let versions = client
        .list_versions(&coordinate(&server.uri()))
        .await
        .expect("listing should succeed");

    assert_eq!(versions, Some(vec!["1.0.0".to_string(), "1.1.0".to_string()]));
}

#[tokio::test]
async fn test_list_versions_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VERSIONS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": ["Not Found"]
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let versions = client.list_versions(&coordinate(&server.uri())).await.unwrap();

    assert_eq!(versions, None);
}

#[tokio::test]
async fn test_list_versions_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VERSIONS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let err = client.list_versions(&coordinate(&server.uri())).await.unwrap_err();

    match err {
        RegistryError::Http { status, detail } => {
            assert_eq!(status, 503);
            assert_eq!(detail, "Service Unavailable");
        }
        other => panic!("Expected HTTP error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_list_versions_unexpected_shape_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VERSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "versions": "1.0.0" })))
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let err = client.list_versions(&coordinate(&server.uri())).await.unwrap_err();

    assert!(matches!(err, RegistryError::Parse(_)), "got: {:?}", err);
}

#[tokio::test]
async fn test_list_versions_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VERSIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "versions": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = mock_client(&server, Duration::from_secs(1));
    let err = client.list_versions(&coordinate(&server.uri())).await.unwrap_err();

    assert!(matches!(err, RegistryError::Timeout(1)), "got: {:?}", err);
    assert_eq!(err.to_string(), "Registry request timed out after 1 seconds");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Grab a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = tfe_release::RegistryClient::with_base_url(uri.clone(), "t", TIMEOUT).unwrap();
    let err = client.list_versions(&coordinate(&uri)).await.unwrap_err();

    assert!(matches!(err, RegistryError::Transport(_)), "got: {:?}", err);
    // The reqwest error is reachable as the source, not repeated in the message.
    assert_eq!(err.to_string(), "Failed to reach registry");
    assert!(std::error::Error::source(&err).is_some());
}

// =============================================================================
// VERSION CREATION
// =============================================================================

#[tokio::test]
async fn test_create_version_sends_json_api_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/vnd.api+json"))
        .and(body_json(json!({
            "data": {
                "type": "registry-module-versions",
                "attributes": { "version": "2.0.0", "commit-sha": "abcdef0" }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": "modver-abc123",
                "type": "registry-module-versions",
                "attributes": { "version": "2.0.0", "status": "pending" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let published = client
        .create_version(&coordinate(&server.uri()), "2.0.0", "abcdef0")
        .await
        .expect("creation should succeed");

    assert_eq!(published.id, "modver-abc123");
    assert_eq!(published.version, "2.0.0");
}

#[tokio::test]
async fn test_create_version_structured_error_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{
                "status": "422",
                "title": "invalid attribute",
                "detail": "Version has already been taken"
            }]
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let err = client
        .create_version(&coordinate(&server.uri()), "1.0.0", "abcdef0")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Registry returned HTTP 422: invalid attribute: Version has already been taken"
    );
}

#[tokio::test]
async fn test_create_version_raw_error_body_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let err = client
        .create_version(&coordinate(&server.uri()), "1.0.0", "abcdef0")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RegistryError::Http { status: 401, ref detail } if detail == "unauthorized"
    ));
}

#[tokio::test]
async fn test_create_version_not_found_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string(""))
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let err = client
        .create_version(&coordinate(&server.uri()), "1.0.0", "abcdef0")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Http { status: 404, .. }));
}

#[tokio::test]
async fn test_create_version_missing_id_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let client = mock_client(&server, TIMEOUT);
    let err = client
        .create_version(&coordinate(&server.uri()), "1.0.0", "abcdef0")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Parse(_)), "got: {:?}", err);
}
