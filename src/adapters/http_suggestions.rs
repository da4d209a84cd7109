//! Suggestion source backed by the autocomplete HTTP endpoint.
//!
//! `GET <base_url>?query=<percent-encoded query>` returning a JSON array of
//! `{id, name, category, value}` records.

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::models::Suggestion;
use crate::traits::{Headers, HttpClient, SuggestionSource};

pub struct HttpSuggestionSource<C: HttpClient> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> HttpSuggestionSource<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `query`.
    pub fn request_url(&self, query: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}query={}",
            self.base_url,
            separator,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl<C: HttpClient> SuggestionSource for HttpSuggestionSource<C> {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, NetworkError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.request_url(query);
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!(query, url = %url, "fetching suggestions");
        let response = self
            .client
            .get(&url, &headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;

        if !response.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "<non-utf8 body>".to_string());
            tracing::warn!(status = response.status, query, "suggestion request failed");
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message,
            });
        }

        let suggestions: Vec<Suggestion> =
            response.json().map_err(|e| NetworkError::InvalidResponse {
                message: e.to_string(),
            })?;
        tracing::debug!(query, count = suggestions.len(), "suggestions received");
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::{HttpError, Response};
    use bytes::Bytes;

    const BASE: &str = "http://test/autocomplete";

    fn source() -> (MockHttpClient, HttpSuggestionSource<MockHttpClient>) {
        let client = MockHttpClient::new();
        (client.clone(), HttpSuggestionSource::new(client, BASE))
    }

    #[test]
    fn test_request_url_encodes_query() {
        let (_, source) = source();
        assert_eq!(source.request_url("a b"), format!("{}?query=a%20b", BASE));
        assert_eq!(source.request_url("x&y"), format!("{}?query=x%26y", BASE));
    }

    #[test]
    fn test_request_url_appends_to_existing_params() {
        let source = HttpSuggestionSource::new(MockHttpClient::new(), "http://test/s?limit=5");
        assert_eq!(source.request_url("r"), "http://test/s?limit=5&query=r");
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        let (client, source) = source();
        assert_eq!(source.fetch("").await, Ok(vec![]));
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_parses_suggestions() {
        let (client, source) = source();
        client.set_response(
            &format!("{}?query=rev", BASE),
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"[{"id":"1","name":"Revenue","category":"Finance","value":"rev"}]"#),
            )),
        );

        let suggestions = source.fetch("rev").await.unwrap();
        assert_eq!(
            suggestions,
            vec![Suggestion::new("1", "Revenue", "Finance", "rev")]
        );
        assert_eq!(
            client.get_requests()[0].headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let (client, source) = source();
        client.set_default_response(MockResponse::Success(Response::new(
            404,
            Bytes::from("Not found"),
        )));

        assert_eq!(
            source.fetch("foo").await,
            Err(NetworkError::HttpStatus {
                status: 404,
                message: "Not found".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let (client, source) = source();
        client.set_default_response(MockResponse::Success(Response::new(
            200,
            Bytes::from(r#"{"not":"an array"}"#),
        )));

        assert!(matches!(
            source.fetch("foo").await,
            Err(NetworkError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let (client, source) = source();
        client.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        assert!(matches!(
            source.fetch("foo").await,
            Err(NetworkError::ConnectionFailed { .. })
        ));
    }
}
