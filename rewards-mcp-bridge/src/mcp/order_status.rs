//! Order status lookup.

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    error::{BridgeError, Result},
    mcp::{
        client::{RewardsClient, require, require_program_id},
        http::build_url_with_query,
        models::OrderResponse,
    },
    transport::{ApiResponse, HttpMethod, Transport},
};

/// Status the upstream uses for malformed lookups.
const BAD_REQUEST: u16 = 400;

/// Known 400 phrases and the message each is rewritten to. Checked in order.
const BAD_REQUEST_RULES: [(&str, &str); 3] = [
    ("Program ID", "Invalid Program ID"),
    ("Invalid Order ID", "Invalid Order ID"),
    ("reference no", "Invalid reference number"),
];

/// Retrieves an order by identifier, optionally scoped by reference number.
///
/// A 400 response whose error text contains a known phrase is rewritten to a fixed
/// message; any other error passes through unchanged. The rewrite depends on upstream
/// wording and silently stops firing if that wording changes.
///
/// # Errors
///
/// Returns error if an identifier is empty, the upstream reports an error, or the
/// response body is not an order.
pub async fn get_order_status<T: Transport>(
    client: &RewardsClient<T>,
    program_id: &str,
    order_id: &str,
    reference_no: Option<&str>,
) -> Result<OrderResponse> {
    let (order, _) = get_order_status_with_body(client, program_id, order_id, reference_no).await?;
    Ok(order)
}

/// Same as [`get_order_status`], also returning the body exactly as the upstream sent
/// it, including fields [`OrderResponse`] does not model.
///
/// # Errors
///
/// See [`get_order_status`].
#[instrument(skip(client))]
pub async fn get_order_status_with_body<T: Transport>(
    client: &RewardsClient<T>,
    program_id: &str,
    order_id: &str,
    reference_no: Option<&str>,
) -> Result<(OrderResponse, Value)> {
    require_program_id(program_id)?;
    require(order_id, "Order ID is required")?;
    info!("fetching order status");

    let base = client.program_path(program_id, &["orders", order_id])?;
    let path = match reference_no.filter(|r| !r.is_empty()) {
        Some(reference_no) => build_url_with_query(&base, &[("reference_no", reference_no)])?,
        None => base,
    };

    let response = client.transport().send(HttpMethod::Get, &path, None::<&()>, &[]).await;
    if let Some(message) = classify_bad_request(&response) {
        warn!(status = response.status, message, "order lookup rejected");
        return Err(BridgeError::Upstream(message.to_owned()));
    }

    let body: Value = response.decode()?;
    let order: OrderResponse =
        serde_json::from_value(body.clone()).map_err(|e| BridgeError::InvalidResponse(e.to_string()))?;
    info!(status = %order.status, "order status retrieved");
    Ok((order, body))
}

/// Returns the fixed message for a recognized 400 response.
///
/// Looks at the envelope error text first, then at the message fields the upstream
/// puts in structured error bodies.
fn classify_bad_request(response: &ApiResponse) -> Option<&'static str> {
    if response.status != BAD_REQUEST {
        return None;
    }
    let error = response.error.as_deref()?;

    let body_texts = response.body.as_ref().map(error_texts).unwrap_or_default();
    std::iter::once(error).chain(body_texts).find_map(|text| {
        BAD_REQUEST_RULES
            .iter()
            .find(|(phrase, _)| text.contains(phrase))
            .map(|(_, message)| *message)
    })
}

fn error_texts(body: &Value) -> Vec<&str> {
    ["/error/description", "/error/message", "/error", "/message", "/description"]
        .iter()
        .filter_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::transport::recording::RecordingTransport;

    fn order_body() -> Value {
        json!({
            "order_id": "order-1", "reference_no": "ref-1", "status": "partial_success",
            "order": {"count": 0},
        })
    }

    fn client_with(response: ApiResponse) -> RewardsClient<RecordingTransport> {
        RewardsClient::new(RecordingTransport::new().respond(response), "v1", "")
    }

    fn bad_request(error: &str) -> ApiResponse {
        ApiResponse { body: None, error: Some(error.to_owned()), status: 400 }
    }

    #[tokio::test]
    async fn test_order_status_path_with_reference() {
        let client = RewardsClient::new(RecordingTransport::new().respond_json(200, order_body()), "v1", "");

        let order = get_order_status(&client, "PGM1", "order-1", Some("ref 1")).await.unwrap();
        assert_eq!(order.status.as_str(), "partial_success");
        assert_eq!(client.transport().requests()[0].path, "/v1/PGM1/orders/order-1?reference_no=ref+1");
    }

    #[tokio::test]
    async fn test_order_status_keeps_unmodelled_fields() {
        let mut body = order_body();
        body["tags"] = json!(["gift", "q4"]);
        let client = RewardsClient::new(RecordingTransport::new().respond_json(200, body.clone()), "v1", "");

        let (order, raw) = get_order_status_with_body(&client, "PGM1", "order-1", None).await.unwrap();
        assert_eq!(order.order_id, "order-1");
        assert_eq!(raw, body);
    }

    #[tokio::test]
    async fn test_order_status_wrong_shape_is_invalid_response() {
        let client =
            RewardsClient::new(RecordingTransport::new().respond_json(200, json!({"order_id": 7})), "v1", "");

        let err = get_order_status_with_body(&client, "PGM1", "order-1", None).await.unwrap_err();
        assert!(matches!(err, BridgeError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_order_status_path_without_reference() {
        let client = RewardsClient::new(RecordingTransport::new().respond_json(200, order_body()), "v1", "");

        get_order_status(&client, "PGM1", "order-1", Some("")).await.unwrap();
        assert_eq!(client.transport().requests()[0].path, "/v1/PGM1/orders/order-1");
    }

    #[tokio::test]
    async fn test_order_status_requires_ids() {
        let client = RewardsClient::new(RecordingTransport::new(), "v1", "");

        let err = get_order_status(&client, "", "order-1", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Program ID is required");
        let err = get_order_status(&client, "PGM1", "", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Order ID is required");
        assert_eq!(client.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_order_id_reclassified() {
        let client = client_with(bad_request("Invalid Order ID supplied"));

        let err = get_order_status(&client, "PGM1", "nope", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid Order ID");
    }

    #[tokio::test]
    async fn test_program_and_reference_reclassified() {
        let client = client_with(bad_request("Program ID does not exist"));
        let err = get_order_status(&client, "PGM1", "o1", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid Program ID");

        let client = client_with(bad_request("reference no mismatch"));
        let err = get_order_status(&client, "PGM1", "o1", Some("r")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid reference number");
    }

    #[tokio::test]
    async fn test_unrecognized_bad_request_passes_through() {
        let client = client_with(bad_request("Something else"));

        let err = get_order_status(&client, "PGM1", "o1", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Something else");
    }

    #[tokio::test]
    async fn test_not_found_passes_through_regardless_of_text() {
        let client = client_with(ApiResponse {
            body: None,
            error: Some("Invalid Order ID".to_owned()),
            status: 404,
        });

        let err = get_order_status(&client, "PGM1", "o1", None).await.unwrap_err();
        assert!(matches!(err, BridgeError::Upstream(ref msg) if msg == "Invalid Order ID"));

        let client = client_with(ApiResponse {
            body: None,
            error: Some("Not Found".to_owned()),
            status: 404,
        });
        let err = get_order_status(&client, "PGM1", "o1", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn test_classify_uses_structured_body() {
        let response = ApiResponse {
            body: Some(json!({"error": {"code": "BAD_REQUEST_ERROR", "description": "Invalid Order ID"}})),
            error: Some("Bad Request".to_owned()),
            status: 400,
        };
        assert_eq!(classify_bad_request(&response), Some("Invalid Order ID"));
    }

    #[test]
    fn test_classify_ignores_success() {
        let response = ApiResponse { body: Some(order_body()), error: None, status: 400 };
        assert_eq!(classify_bad_request(&response), None);
    }
}
