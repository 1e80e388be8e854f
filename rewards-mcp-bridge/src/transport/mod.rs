//! Transport layer for the rewards API.
//!
//! The transport wraps a single base URL and turns every request into an
//! [`ApiResponse`] envelope. It never returns an error: non-2xx statuses and network
//! failures are folded into the envelope so that every operation client can apply a
//! single error-translation policy.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rewards_mcp_bridge::transport::{HttpConfig, HttpMethod, HttpTransport, Transport};
//!
//! # async fn example() -> rewards_mcp_bridge::error::Result<()> {
//! let transport = HttpTransport::with_auth_header(
//!     "https://rewards.example.com",
//!     "Basic azpz",
//!     &HttpConfig::default(),
//! )?;
//!
//! let response = transport
//!     .send(HttpMethod::Get, "/v1/PGM1/balance", None::<&()>, &[("X-Merchant-Id", "m-1")])
//!     .await;
//! println!("status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{BridgeError, Result};

pub mod config;
pub mod http;
#[cfg(test)]
pub(crate) mod recording;
mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Status code reported for transport-level failures.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// HTTP methods supported by the rewards API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform result envelope returned by every transport call.
///
/// `error` is `None` exactly when the request succeeded with a 2xx status and a JSON
/// body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Parsed JSON body, if the response carried one.
    pub body: Option<Value>,
    /// Status text of a non-2xx response, or the message of a transport failure.
    pub error: Option<String>,
    /// HTTP status code, or [`TRANSPORT_FAILURE_STATUS`] for transport failures.
    pub status: u16,
}

impl ApiResponse {
    /// Builds the envelope for a transport-level failure.
    #[must_use]
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self { body: None, error: Some(message.into()), status: TRANSPORT_FAILURE_STATUS }
    }

    /// Returns `true` when the envelope carries no error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Decodes the body of a successful response.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Upstream`] carrying `error` verbatim if the envelope holds an error
    /// - [`BridgeError::InvalidResponse`] if the body is absent or has the wrong shape
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        if let Some(error) = self.error {
            return Err(BridgeError::Upstream(error));
        }

        let body = self
            .body
            .ok_or_else(|| BridgeError::InvalidResponse("response body is empty".to_owned()))?;

        serde_json::from_value(body).map_err(|e| BridgeError::InvalidResponse(e.to_string()))
    }
}

/// Transport abstraction over the rewards API.
///
/// This trait is sealed: every implementation must honour the envelope contract and
/// never fail, so only implementations within this crate are allowed.
///
/// Headers are merged with increasing precedence: the fixed JSON content type, the
/// transport's default headers (including the derived `Authorization` header), then
/// `headers` passed to [`Transport::send`].
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Sends a request to `path` (relative to the base URL).
    ///
    /// A supplied `body` is serialized as JSON; no body is sent when it is `None`.
    fn send<'a, B>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        body: Option<&'a B>,
        headers: &'a [(&'a str, &'a str)],
    ) -> impl Future<Output = ApiResponse> + Send + 'a
    where
        B: Serialize + Sync + ?Sized + 'a;
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        amount: i64,
    }

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_transport_failure_envelope() {
        let response = ApiResponse::transport_failure("connection refused");
        assert_eq!(response.status, 500);
        assert_eq!(response.error.as_deref(), Some("connection refused"));
        assert!(response.body.is_none());
        assert!(!response.is_success());
    }

    #[test]
    fn test_decode_success() {
        let response =
            ApiResponse { body: Some(json!({"amount": 250})), error: None, status: 200 };
        let sample: Sample = response.decode().unwrap();
        assert_eq!(sample.amount, 250);
    }

    #[test]
    fn test_decode_error_is_verbatim() {
        let response = ApiResponse {
            body: Some(json!({"error": {"description": "nope"}})),
            error: Some("Unauthorized".to_owned()),
            status: 401,
        };
        let err = response.decode::<Sample>().unwrap_err();
        assert!(matches!(err, BridgeError::Upstream(ref msg) if msg == "Unauthorized"));
    }

    #[test]
    fn test_decode_missing_body() {
        let response = ApiResponse { body: None, error: None, status: 200 };
        let err = response.decode::<Sample>().unwrap_err();
        assert!(matches!(err, BridgeError::InvalidResponse(_)));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let response =
            ApiResponse { body: Some(json!({"amount": "lots"})), error: None, status: 200 };
        let err = response.decode::<Sample>().unwrap_err();
        assert!(matches!(err, BridgeError::InvalidResponse(_)));
    }
}
