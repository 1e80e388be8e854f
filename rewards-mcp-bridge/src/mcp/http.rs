//! Path and query string helpers for rewards API endpoints.

use url::Url;

use crate::error::{BridgeError, Result};

/// Dummy origin used to borrow the `url` crate's encoders for bare paths.
const PATH_ORIGIN: &str = "https://example.com";

/// Builds an absolute API path from the stub and raw path segments.
///
/// The stub may span several segments (`api/v1`). Every entry of `segments` is
/// percent-encoded as a single path segment, so caller-supplied identifiers can
/// never introduce extra path components.
///
/// # Errors
///
/// Returns error if URL parsing fails.
///
/// # Examples
///
/// ```
/// use rewards_mcp_bridge::mcp::http::build_api_path;
///
/// let path = build_api_path("v1", &["PGM 1", "orders", "a/b"])?;
/// assert_eq!(path, "/v1/PGM%201/orders/a%2Fb");
/// # Ok::<(), rewards_mcp_bridge::error::BridgeError>(())
/// ```
pub fn build_api_path(stub: &str, segments: &[&str]) -> Result<String> {
    let mut url = Url::parse(PATH_ORIGIN).map_err(|e| BridgeError::InvalidInput(e.to_string()))?;

    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| BridgeError::InvalidInput("URL cannot be a base".to_owned()))?;
        path.clear();
        path.extend(stub.split('/').filter(|s| !s.is_empty()));
        path.extend(segments);
    }

    Ok(url.path().to_owned())
}

/// Builds a URL path with properly encoded query parameters.
///
/// # Errors
///
/// Returns error if URL parsing fails.
///
/// # Examples
///
/// ```
/// use rewards_mcp_bridge::mcp::http::build_url_with_query;
///
/// let path = build_url_with_query("/v1/PGM1/rewards", &[
///     ("type", "gift_card"),
///     ("brand_name", "books & media"),
/// ])?;
/// assert_eq!(path, "/v1/PGM1/rewards?type=gift_card&brand_name=books+%26+media");
/// # Ok::<(), rewards_mcp_bridge::error::BridgeError>(())
/// ```
pub fn build_url_with_query(base_path: &str, params: &[(&str, &str)]) -> Result<String> {
    let base_url = format!("{PATH_ORIGIN}{base_path}");
    let mut url = Url::parse(&base_url).map_err(|e| BridgeError::InvalidInput(e.to_string()))?;

    if !params.is_empty() {
        let mut query_pairs = url.query_pairs_mut();
        for (key, value) in params {
            query_pairs.append_pair(key, value);
        }
    }

    let full_path = url.path().to_owned();
    let query_string = url.query().unwrap_or("");

    if query_string.is_empty() {
        Ok(full_path)
    } else {
        Ok(format!("{full_path}?{query_string}"))
    }
}
