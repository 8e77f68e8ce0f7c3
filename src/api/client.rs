//! Backend HTTP client with bearer-token handling and safe logging.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use url::Url;

use crate::error::AppError;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// User agent string for all backend requests.
const CLIENT_USER_AGENT: &str = "TalentDesk/0.1.0";

/// Default request timeout in seconds. Bulk uploads carry file payloads, so
/// this is generous.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Query parameter keys (case-insensitive) that should have their values redacted.
const SENSITIVE_QUERY_PARAMS: &[&str] = &[
    "access_token",
    "token",
    "authorization",
    "password",
    "session",
];

// ─────────────────────────────────────────────────────────────────────────────
// LoggingMode
// ─────────────────────────────────────────────────────────────────────────────

/// Controls how URLs are sanitized for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggingMode {
    /// Log only the path component. Strips scheme, host, query, and fragment.
    /// Example: `/bulk-upload/42`
    #[default]
    PathOnly,

    /// Log path and query parameters, but redact sensitive values.
    /// Example: `/interviews?status=scheduled`
    PathAndQueryRedacted,
}

// ─────────────────────────────────────────────────────────────────────────────
// URL Sanitization
// ─────────────────────────────────────────────────────────────────────────────

/// Determines if a query parameter key is sensitive and should be redacted.
fn is_sensitive_param(key: &str) -> bool {
    let key_lower = key.to_ascii_lowercase();
    SENSITIVE_QUERY_PARAMS
        .iter()
        .any(|&sensitive| key_lower == sensitive)
}

/// Sanitizes a URL for safe logging based on the specified mode.
///
/// Uses the `url` crate for proper parsing rather than string manipulation.
/// The returned string never contains the scheme, host, or fragment.
pub fn sanitize_url_for_logs(url: &Url, mode: LoggingMode) -> String {
    let path = url.path();

    match mode {
        LoggingMode::PathOnly => path.to_string(),
        LoggingMode::PathAndQueryRedacted => {
            let query_pairs: Vec<_> = url.query_pairs().collect();
            if query_pairs.is_empty() {
                return path.to_string();
            }

            let redacted_pairs: Vec<String> = query_pairs
                .into_iter()
                .map(|(key, value)| {
                    if is_sensitive_param(&key) {
                        format!("{}=***", key)
                    } else {
                        format!("{}={}", key, value)
                    }
                })
                .collect();

            format!("{}?{}", path, redacted_pairs.join("&"))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query building
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a query string from optional parameters, skipping absent or blank
/// values. Returns an empty string when nothing survives the filter.
pub(crate) fn build_query(params: &[(&str, Option<&str>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (key, value) in params {
        if let Some(value) = value {
            if !value.trim().is_empty() {
                serializer.append_pair(key, value);
                any = true;
            }
        }
    }

    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ApiClient
// ─────────────────────────────────────────────────────────────────────────────

/// Thread-safe HTTP client for the recruitment backend.
///
/// Every request except login carries `Authorization: Bearer <token>`. The
/// client never pre-checks token presence: an unauthenticated request goes
/// out as-is and the backend's rejection is surfaced verbatim.
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying HTTP client.
    http: reqwest::Client,
    /// Backend base URL.
    base_url: Url,
    /// Bearer token captured at login, if any.
    token: Arc<RwLock<Option<SecretString>>>,
    /// Controls URL sanitization for logging.
    logging_mode: LoggingMode,
}

impl ApiClient {
    /// Creates a client for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the base URL does not parse or the
    /// HTTP client fails to initialize.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| AppError::Internal(format!("Invalid base URL: {base_url}")))?;
        let http = build_http_client()?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
            logging_mode: LoggingMode::default(),
        })
    }

    /// Updates the logging mode for URL sanitization.
    pub fn with_logging_mode(mut self, mode: LoggingMode) -> Self {
        self.logging_mode = mode;
        self
    }

    /// Installs the bearer token used for subsequent requests.
    pub async fn set_token(&self, token: &str) {
        let mut guard = self.token.write().await;
        *guard = Some(SecretString::from(token.to_string()));
    }

    /// Drops the stored token (logout).
    pub async fn clear_token(&self) {
        let mut guard = self.token.write().await;
        *guard = None;
    }

    /// Returns true if a token is currently installed.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    // ── Typed request helpers ─────────────────────────────────────────────────

    /// GET returning deserialized JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.dispatch(Method::GET, path, None, None).await?;
        parse_json(response).await
    }

    /// POST with a JSON body, returning deserialized JSON.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let body = serde_json::to_value(body)
            .map_err(|e| AppError::Internal(format!("Failed to serialize request: {e}")))?;
        let response = self.dispatch(Method::POST, path, Some(body), None).await?;
        parse_json(response).await
    }

    /// PUT with a JSON body, discarding the response body.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let body = serde_json::to_value(body)
            .map_err(|e| AppError::Internal(format!("Failed to serialize request: {e}")))?;
        self.dispatch(Method::PUT, path, Some(body), None).await?;
        Ok(())
    }

    /// Bodyless PATCH (state-change requests), discarding the response body.
    pub async fn patch_empty(&self, path: &str) -> Result<(), AppError> {
        self.dispatch(Method::PATCH, path, None, None).await?;
        Ok(())
    }

    /// DELETE, discarding the response body.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.dispatch(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    /// Multipart POST (file uploads), returning deserialized JSON.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, AppError> {
        let response = self.dispatch(Method::POST, path, None, Some(form)).await?;
        parse_json(response).await
    }

    // ── Core dispatch ─────────────────────────────────────────────────────────

    /// Executes one request: joins the URL, attaches the bearer token when
    /// present, logs timing with a sanitized URL, and maps failures.
    ///
    /// # Errors
    ///
    /// - `AppError::ConnectionFailed` - network/transport failure
    /// - `AppError::Api` - non-2xx response, body text as message
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        form: Option<Form>,
    ) -> Result<reqwest::Response, AppError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| AppError::Internal(format!("Invalid path: {path}")))?;

        let sanitized_url = sanitize_url_for_logs(&url, self.logging_mode);
        let start = Instant::now();

        let mut request = self.http.request(method.clone(), url);

        if let Some(token) = self.token.read().await.as_ref() {
            request = request.bearer_auth(token.expose_secret());
        }

        if let Some(body) = body {
            request = request.json(&body);
        }
        if let Some(form) = form {
            request = request.multipart(form);
        }

        let result = request.send().await;
        let duration_ms = start.elapsed().as_millis();

        let response = match result {
            Ok(response) => {
                info!(
                    "[API] {} {} {} {}ms",
                    method,
                    sanitized_url,
                    response.status().as_u16(),
                    duration_ms
                );
                response
            }
            Err(_) => {
                // Never expose the raw reqwest error; it may contain the full URL.
                info!("[API] {} {} FAILED {}ms", method, sanitized_url, duration_ms);
                return Err(AppError::ConnectionFailed(
                    "Connection to the backend failed".to_string(),
                ));
            }
        };

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(into_api_error(response).await)
        }
    }
}

/// Reads a non-2xx response into an `Api` error, using the body text as the
/// message and falling back to the canonical status reason.
async fn into_api_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body
    };

    AppError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Deserializes a 2xx response body.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    response
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to parse response: {e}")))
}

/// Builds the configured HTTP client.
fn build_http_client() -> Result<reqwest::Client, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ─────────────────────────────────────────────────────────────────────────
    // URL Sanitization Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn sanitize_strips_scheme_and_host() {
        let url = Url::parse("http://localhost:8000/bulk-upload/42").unwrap();

        let result = sanitize_url_for_logs(&url, LoggingMode::PathOnly);

        assert_eq!(result, "/bulk-upload/42");
        assert!(!result.contains("http"));
        assert!(!result.contains("localhost"));
    }

    #[test]
    fn path_only_excludes_query_string() {
        let url = Url::parse("http://localhost:8000/interviews?status=scheduled").unwrap();

        let result = sanitize_url_for_logs(&url, LoggingMode::PathOnly);

        assert_eq!(result, "/interviews");
        assert!(!result.contains("status"));
    }

    #[test]
    fn path_and_query_redacted_preserves_safe_keys() {
        let url = Url::parse("http://localhost:8000/candidates?q=jane").unwrap();

        let result = sanitize_url_for_logs(&url, LoggingMode::PathAndQueryRedacted);

        assert_eq!(result, "/candidates?q=jane");
    }

    #[test]
    fn path_and_query_redacted_redacts_sensitive_keys() {
        let test_cases = [
            ("access_token", "abc123"),
            ("Token", "xyz789"),
            ("PASSWORD", "hunter2"),
            ("authorization", "bearer123"),
            ("session", "sess456"),
        ];

        for (key, value) in test_cases {
            let url_str = format!("http://localhost:8000/path?{}={}", key, value);
            let url = Url::parse(&url_str).unwrap();

            let result = sanitize_url_for_logs(&url, LoggingMode::PathAndQueryRedacted);

            assert!(
                result.contains(&format!("{}=***", key)),
                "Expected '{}=***' in result '{}'",
                key,
                result
            );
            assert!(
                !result.contains(value),
                "Value '{}' should be redacted in result '{}'",
                value,
                result
            );
        }
    }

    #[test]
    fn sanitize_handles_empty_query_string() {
        let url = Url::parse("http://localhost:8000/candidates").unwrap();

        let result = sanitize_url_for_logs(&url, LoggingMode::PathAndQueryRedacted);

        assert_eq!(result, "/candidates");
    }

    #[test]
    fn is_sensitive_param_requires_exact_match() {
        assert!(is_sensitive_param("token"));
        assert!(is_sensitive_param("TOKEN"));
        assert!(!is_sensitive_param("tokens"));
        assert!(!is_sensitive_param("q"));
        assert!(!is_sensitive_param("status"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Builder Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn build_query_skips_absent_and_blank_values() {
        assert_eq!(build_query(&[]), "");
        assert_eq!(build_query(&[("q", None)]), "");
        assert_eq!(build_query(&[("q", Some("  "))]), "");
        assert_eq!(build_query(&[("q", Some("jane"))]), "?q=jane");
        assert_eq!(
            build_query(&[("q", Some("jane")), ("status", None), ("skip", Some("10"))]),
            "?q=jane&skip=10"
        );
    }

    #[test]
    fn build_query_percent_encodes_values() {
        let query = build_query(&[("status", Some("Face to Face"))]);
        assert_eq!(query, "?status=Face+to+Face");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Client Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn client_new_rejects_invalid_base_url() {
        let result = ApiClient::new("not a url");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_present() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();
        client.set_token("test_token").await;

        Mock::given(method("GET"))
            .and(path("/candidates"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result: Vec<serde_json::Value> = client.get_json("/candidates").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn sends_no_auth_header_without_token() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();

        Mock::given(method("GET"))
            .and(path("/candidates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let _: Vec<serde_json::Value> = client.get_json("/candidates").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(
            !requests[0].headers.contains_key("authorization"),
            "Unauthenticated request must not carry an Authorization header"
        );
    }

    #[tokio::test]
    async fn non_2xx_surfaces_body_text_verbatim() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();

        Mock::given(method("PATCH"))
            .and(path("/bulk-upload/7/pause"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string("Job is not processing"),
            )
            .mount(&mock_server)
            .await;

        let result = client.patch_empty("/bulk-upload/7/pause").await;

        match result.unwrap_err() {
            AppError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Job is not processing");
            }
            e => panic!("Expected Api error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn empty_error_body_falls_back_to_status_reason() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();

        Mock::given(method("GET"))
            .and(path("/candidates/999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result: Result<serde_json::Value, _> = client.get_json("/candidates/999").await;

        match result.unwrap_err() {
            AppError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            e => panic!("Expected Api error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn clear_token_removes_auth_header() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri()).unwrap();

        client.set_token("tok").await;
        assert!(client.has_token().await);

        client.clear_token().await;
        assert!(!client.has_token().await);

        Mock::given(method("GET"))
            .and(path("/candidates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let _: Vec<serde_json::Value> = client.get_json("/candidates").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }
}
