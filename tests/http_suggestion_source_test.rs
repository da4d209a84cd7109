//! HttpSuggestionSource against a real HTTP server using wiremock.

use std::time::Duration;

use formula_tui::adapters::{HttpSuggestionSource, ReqwestHttpClient};
use formula_tui::error::NetworkError;
use formula_tui::traits::SuggestionSource;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn source_for(server: &MockServer) -> HttpSuggestionSource<ReqwestHttpClient> {
    HttpSuggestionSource::new(
        ReqwestHttpClient::new(),
        format!("{}/autocomplete", server.uri()),
    )
}

#[tokio::test]
async fn test_fetch_parses_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/autocomplete"))
        .and(query_param("query", "rev"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "1", "name": "Revenue", "category": "Finance", "value": "rev"},
            {"id": 2, "name": "Revenue growth", "category": "Finance", "value": "rev_growth"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let suggestions = source_for(&server).await.fetch("rev").await.unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].name, "Revenue");
    assert_eq!(suggestions[1].id, "2");
    assert_eq!(suggestions[1].value, "rev_growth");
}

#[tokio::test]
async fn test_query_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("query", "a b&c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let suggestions = source_for(&server).await.fetch("a b&c").await.unwrap();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_empty_query_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let suggestions = source_for(&server).await.fetch("").await.unwrap();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_not_found_is_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let err = source_for(&server).await.fetch("foo").await.unwrap_err();
    assert_eq!(
        err,
        NetworkError::HttpStatus {
            status: 404,
            message: "Not found".to_string()
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = source_for(&server).await.fetch("foo").await.unwrap_err();
    assert!(matches!(err, NetworkError::HttpStatus { status: 500, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let err = source_for(&server).await.fetch("foo").await.unwrap_err();
    assert!(matches!(err, NetworkError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = ReqwestHttpClient::with_timeout(Duration::from_millis(50)).unwrap();
    let source = HttpSuggestionSource::new(client, format!("{}/autocomplete", server.uri()));
    let err = source.fetch("foo").await.unwrap_err();
    assert!(matches!(err, NetworkError::Timeout { .. }));
    assert!(err.is_retryable());
}
