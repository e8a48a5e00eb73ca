//! AcoustID HTTP client
//!
//! Handles communication with the AcoustID web service.
//! See: https://acoustid.org/webservice
//!
//! ## URL Encoding of the Meta Parameter
//! The API uses `+` as a separator in `meta` (e.g. `recordings+compress`).
//! Encoded as `%2B` it is not recognized and results come back without
//! metadata, so the URL is built by hand instead of via `.query()`.
//!
//! Every request goes through the configured [`RetryPolicy`].

use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use super::{adapter, dto};
use crate::recognition::domain::{AudioFingerprint, Recognition, RecognitionError};
use crate::recognition::retry::RetryPolicy;

const DEFAULT_BASE_URL: &str = "https://api.acoustid.org/v2/lookup";

/// AcoustID API client
pub struct AcoustIdClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl AcoustIdClient {
    /// Create a new client with the given API key.
    ///
    /// The client accepts gzip-compressed responses and identifies itself
    /// with a `music-renamer/<version>` User-Agent.
    pub fn new(
        api_key: impl Into<String>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self, RecognitionError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| RecognitionError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry,
        })
    }

    /// Point the client at a different lookup endpoint (mock servers in tests).
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up a fingerprint and return the recognition
    pub async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Recognition, RecognitionError> {
        let response = self.send_lookup_request(fingerprint).await?;
        adapter::to_recognition(response)
    }

    async fn send_lookup_request(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<dto::LookupResponse, RecognitionError> {
        // The + in meta must stay literal, see module docs.
        let url = format!(
            "{}?client={}&duration={}&fingerprint={}&meta=recordings+compress",
            self.base_url,
            urlencoding::encode(&self.api_key),
            fingerprint.duration_secs,
            urlencoding::encode(&fingerprint.fingerprint)
        );

        let response = self.retry.send(self.http_client.get(&url)).await?;
        let status = response.status();
        debug!(%status, "Lookup response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RecognitionError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognitionError::Http {
                status: status.as_u16(),
                message: format!(
                    "{} - {}",
                    status.canonical_reason().unwrap_or("Unknown"),
                    body.chars().take(200).collect::<String>()
                ),
            });
        }

        response
            .json::<dto::LookupResponse>()
            .await
            .map_err(|e| RecognitionError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::domain::RecognizedTrack;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fingerprint() -> AudioFingerprint {
        AudioFingerprint {
            fingerprint: "AQADtNIyRUkkZUqS".to_string(),
            duration_secs: 180,
        }
    }

    fn client_for(server: &MockServer, retry: RetryPolicy) -> AcoustIdClient {
        AcoustIdClient::new("test-key", retry, Duration::from_secs(5))
            .unwrap()
            .with_base_url(format!("{}/v2/lookup", server.uri()))
    }

    fn fast_retry(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client =
            AcoustIdClient::new("test-key", RetryPolicy::default(), Duration::from_secs(30))
                .unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_lookup_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/lookup"))
            .and(query_param("client", "test-key"))
            .and(query_param("duration", "180"))
            .and(query_param("fingerprint", "AQADtNIyRUkkZUqS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "results": [{
                    "id": "acoustid-1",
                    "score": 0.97,
                    "recordings": [{
                        "id": "rec-1",
                        "title": "Song: Title!",
                        "artists": [{"id": "art-1", "name": "Artist/Name"}]
                    }]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let recognition = client_for(&server, RetryPolicy::none())
            .lookup(&fingerprint())
            .await
            .unwrap();

        assert_eq!(
            recognition.track,
            Some(RecognizedTrack::new("Song: Title!", "Artist/Name"))
        );
    }

    #[tokio::test]
    async fn test_lookup_no_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "results": []})),
            )
            .mount(&server)
            .await;

        let recognition = client_for(&server, RetryPolicy::none())
            .lookup(&fingerprint())
            .await
            .unwrap();

        assert!(!recognition.is_match());
    }

    #[tokio::test]
    async fn test_lookup_retries_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, fast_retry(3))
            .lookup(&fingerprint())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_lookup_rate_limited_after_retries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;

        let result = client_for(&server, fast_retry(2))
            .lookup(&fingerprint())
            .await;

        assert!(matches!(result, Err(RecognitionError::RateLimited)));
    }

    #[tokio::test]
    async fn test_lookup_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad fingerprint"))
            .mount(&server)
            .await;

        let result = client_for(&server, RetryPolicy::none())
            .lookup(&fingerprint())
            .await;

        match result {
            Err(RecognitionError::Http { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("bad fingerprint"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_invalid_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server, RetryPolicy::none())
            .lookup(&fingerprint())
            .await;

        assert!(matches!(result, Err(RecognitionError::Parse(_))));
    }
}
