// src/http.rs
// =============================================================================
// The one HTTP GET both fetchers share.
//
// Turns every way a GET can go wrong into a FetchError, so the fetchers
// only have to deal with parsing.
// =============================================================================

use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::error::FetchError;

// Fetches the raw body of a URL
//
// Parameters:
//   client: shared reqwest client (carries timeout and User-Agent)
//   url: URL to fetch
//   accept: value for the Accept header
//
// Returns: body bytes, or a FetchError for transport failures and non-2xx codes
pub async fn fetch_body(client: &Client, url: &str, accept: &str) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url)
        .header(ACCEPT, accept)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_body_sends_accept_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/thing"))
            .and(header("accept", "text/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let client = Client::new();
        let url = format!("{}/thing", mock_server.uri());
        let body = fetch_body(&client, &url, "text/plain").await.unwrap();
        assert_eq!(body, b"hello");
    }

    #[tokio::test]
    async fn test_fetch_body_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = Client::new();
        let result = fetch_body(&client, &mock_server.uri(), "*/*").await;
        assert!(matches!(result, Err(FetchError::Status { status: 403, .. })));
    }

    #[tokio::test]
    async fn test_fetch_body_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let result = fetch_body(&client, &mock_server.uri(), "*/*").await;
        assert!(matches!(result, Err(FetchError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_fetch_body_connection_refused() {
        let client = Client::new();
        let result = fetch_body(&client, "http://127.0.0.1:1/", "*/*").await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
