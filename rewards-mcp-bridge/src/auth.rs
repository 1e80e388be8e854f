//! Static Basic authentication for the rewards API.
//!
//! The upstream API authenticates every call with a single
//! `Authorization: Basic base64(key:secret)` header. The header is derived once at
//! startup from [`Credentials`] and reused for the lifetime of the process.

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::warn;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Merchant key/secret pair.
///
/// Secret material is wiped from memory on drop. The [`Debug`] output never
/// includes the secret.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { key: key.into(), secret: secret.into() }
    }

    /// Returns `true` when both halves of the pair are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.secret.is_empty()
    }

    /// Derives the `Authorization` header value for these credentials.
    ///
    /// See [`derive_auth_header`].
    #[must_use]
    pub fn auth_header(&self) -> String {
        derive_auth_header(&self.key, &self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Derives a Basic authentication header value from a key and secret.
///
/// Returns `"Basic " + base64("key:secret")`. When either value is empty a warning is
/// logged and an empty string is returned: requests then proceed unauthenticated and
/// the caller receives whatever authentication failure the server reports.
///
/// # Examples
///
/// ```
/// use rewards_mcp_bridge::auth::derive_auth_header;
///
/// assert_eq!(derive_auth_header("k", "s"), "Basic azpz");
/// assert_eq!(derive_auth_header("", ""), "");
/// ```
#[must_use]
pub fn derive_auth_header(key: &str, secret: &str) -> String {
    if key.is_empty() || secret.is_empty() {
        warn!("missing merchant credentials, requests will be sent unauthenticated");
        return String::new();
    }

    let encoded = STANDARD.encode(format!("{key}:{secret}"));
    format!("Basic {encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_auth_header_known_value() {
        let expected = format!("Basic {}", STANDARD.encode("k:s"));
        assert_eq!(derive_auth_header("k", "s"), expected);
        assert_eq!(derive_auth_header("k", "s"), "Basic azpz");
    }

    #[test]
    fn test_derive_auth_header_both_empty() {
        assert_eq!(derive_auth_header("", ""), "");
    }

    #[test]
    fn test_derive_auth_header_one_side_missing() {
        assert_eq!(derive_auth_header("key", ""), "");
        assert_eq!(derive_auth_header("", "secret"), "");
    }

    #[test]
    fn test_derive_auth_header_keeps_colons_in_secret() {
        let header = derive_auth_header("rzp_key", "se:cret");
        let decoded = STANDARD.decode(header.trim_start_matches("Basic ")).unwrap();
        assert_eq!(decoded, b"rzp_key:se:cret");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = Credentials::new("rzp_key", "top-secret");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("rzp_key"));
        assert!(!debug.contains("top-secret"));
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(Credentials::new("k", "s").is_complete());
        assert!(!Credentials::new("k", "").is_complete());
        assert!(!Credentials::default().is_complete());
    }
}
