//! HTTP transport implementation.
//!
//! Sends JSON requests to the rewards API using a pooled reqwest client and folds
//! every outcome into an [`ApiResponse`].

use reqwest::{
    Client, Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::config::HttpConfig;
use crate::{
    config::BridgeConfig,
    error::{BridgeError, Result},
    transport::{ApiResponse, HttpMethod, Transport, sealed},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP transport bound to a single base URL.
///
/// The `Authorization` header is derived once at construction and attached to every
/// request.
///
/// # Examples
///
/// ```
/// use rewards_mcp_bridge::transport::{HttpConfig, HttpTransport};
///
/// let transport =
///     HttpTransport::with_auth_header("https://rewards.example.com", "", &HttpConfig::default())
///         .unwrap();
/// assert_eq!(transport.base_url(), "https://rewards.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    default_headers: HeaderMap,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport from the bridge configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built or the derived authorization
    /// header is not a valid header value.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        Self::with_auth_header(&config.base_url, &config.credentials.auth_header(), &config.http)
    }

    /// Creates a transport with an explicit `Authorization` header value.
    ///
    /// An empty `auth_header` sends requests without an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built or `auth_header` contains
    /// characters not allowed in a header value.
    pub fn with_auth_header(base_url: &str, auth_header: &str, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(http.pool_max_idle_per_host)
            .timeout(http.timeout())
            .connect_timeout(http.connect_timeout())
            .build()
            .map_err(BridgeError::HttpError)?;

        let mut default_headers = HeaderMap::new();
        if !auth_header.is_empty() {
            let mut value = HeaderValue::from_str(auth_header).map_err(|e| {
                BridgeError::ConfigError(format!("invalid authorization header: {e}"))
            })?;
            value.set_sensitive(true);
            default_headers.insert(AUTHORIZATION, value);
        }

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned(), default_headers })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Merges the fixed content type, default headers and per-call headers.
    fn merged_headers(&self, extra: &[(&str, &str)]) -> std::result::Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        for (name, value) in &self.default_headers {
            headers.insert(name.clone(), value.clone());
        }

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| format!("invalid header name '{name}': {e}"))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| format!("invalid value for header '{name}': {e}"))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    #[instrument(skip(self, body, headers), fields(method = %method, path = path))]
    async fn execute<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        headers: &[(&str, &str)],
    ) -> ApiResponse
    where
        B: Serialize + Sync + ?Sized,
    {
        let headers = match self.merged_headers(headers) {
            Ok(headers) => headers,
            Err(message) => return ApiResponse::transport_failure(message),
        };

        let url = format!("{}{path}", self.base_url);
        let reqwest_method = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut request = self.client.request(reqwest_method, &url).headers(headers);

        if let Some(body) = body {
            match serde_json::to_vec(body) {
                Ok(bytes) => request = request.body(bytes),
                Err(e) => {
                    return ApiResponse::transport_failure(format!(
                        "request body serialization failed: {e}"
                    ));
                }
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "request to rewards API failed");
                return ApiResponse::transport_failure(e.to_string());
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "failed to read response body");
                return ApiResponse::transport_failure(e.to_string());
            }
        };

        let parsed = serde_json::from_slice::<Value>(&bytes);
        debug!(status = status.as_u16(), body_len = bytes.len(), "received response");

        if status.is_success() {
            return match parsed {
                Ok(Value::Null) => ApiResponse { body: None, error: None, status: status.as_u16() },
                Ok(body) => ApiResponse { body: Some(body), error: None, status: status.as_u16() },
                Err(e) => ApiResponse::transport_failure(format!("invalid JSON response: {e}")),
            };
        }

        let error = status_text(status);
        warn!(status = status.as_u16(), error = %error, "rewards API returned an error status");

        ApiResponse {
            body: parsed.ok().filter(|body| !body.is_null()),
            error: Some(error),
            status: status.as_u16(),
        }
    }
}

/// Returns the status text reported for a non-2xx status.
fn status_text(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
}

impl Transport for HttpTransport {
    async fn send<'a, B>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        body: Option<&'a B>,
        headers: &'a [(&'a str, &'a str)],
    ) -> ApiResponse
    where
        B: Serialize + Sync + ?Sized + 'a,
    {
        self.execute(method, path, body, headers).await
    }
}
