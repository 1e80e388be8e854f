//! Integration tests for the rewards API operations over real HTTP.
//!
//! Each test runs the operations against a local mock server, so request shape,
//! headers and error translation are checked end to end through `HttpTransport`.

use httpmock::prelude::*;
use rewards_mcp_bridge::{
    BridgeError,
    auth::derive_auth_header,
    mcp::{
        RewardsClient,
        balance::get_balance,
        models::{CreateOrderRequest, CustomerDetails, OrderReward, OrderStatus, RewardType, RewardsQuery},
        order_status::get_order_status,
        orders::create_order,
        rewards::list_rewards,
        tools::{call_tool, result_text},
    },
    transport::{HttpConfig, HttpTransport},
};
use serde_json::{Value, json};

fn client_for(server: &MockServer, key: &str, secret: &str) -> RewardsClient<HttpTransport> {
    let header = if key.is_empty() || secret.is_empty() { String::new() } else { derive_auth_header(key, secret) };
    let transport = HttpTransport::with_auth_header(&server.base_url(), &header, &HttpConfig::default())
        .expect("transport should build");
    RewardsClient::new(transport, "v1", "m-1")
}

fn order_body(status: &str) -> Value {
    json!({
        "order_id": "order-1",
        "entity": "orders",
        "reference_no": "ref-1",
        "status": status,
        "order_success_amount": 100000,
        "order": {"entity": "collection", "count": 1, "order_items": [{
            "reward_id": "r1", "reward_type": "gift_card", "quantity": 2,
            "status": "success", "denomination": 50000, "currency": "INR",
            "vouchers": [{"code": "CODE-1", "pin": "1111"}],
        }]},
    })
}

fn order_request() -> CreateOrderRequest {
    CreateOrderRequest {
        reference_no: "ref-1".to_owned(),
        rewards: vec![OrderReward { id: "r1".to_owned(), denomination: Some(50000), interval: None, quantity: 2 }],
        customer: CustomerDetails::from_parts(Some("Asha".to_owned()), Some("asha@example.com".to_owned()), None),
    }
}

#[tokio::test]
async fn test_balance_sends_basic_auth_and_merchant_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/PGM1/balance")
                .header("authorization", "Basic azpz")
                .header("x-merchant-id", "m-1");
            then.status(200)
                .json_body(json!({"entity": "balance", "item": {"id": "w1", "amount": 250000, "currency": "INR"}}));
        })
        .await;

    let balance = get_balance(&client_for(&server, "k", "s"), "PGM1").await.expect("balance should load");

    mock.assert_async().await;
    assert_eq!(balance.item.amount, 250000);
    assert_eq!(balance.item.currency, "INR");
}

#[tokio::test]
async fn test_missing_credentials_send_no_authorization_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/PGM1/balance").header_missing("authorization");
            then.status(200).json_body(json!({"item": {"id": "w1", "amount": 0, "currency": "INR"}}));
        })
        .await;

    get_balance(&client_for(&server, "", ""), "PGM1").await.expect("balance should load");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_balance_surfaces_status_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/PGM1/balance");
            then.status(401).body("denied");
        })
        .await;

    let err = get_balance(&client_for(&server, "k", "s"), "PGM1").await.unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn test_list_rewards_sends_filters_as_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/PGM1/rewards")
                .query_param("type", "gift_card")
                .query_param("featured", "true");
            then.status(200).json_body(json!({
                "count": 1,
                "items": [{
                    "id": "g1", "type": "gift_card", "status": "active",
                    "denomination_type": "range", "eligible_range_denomination": [10000, 500000],
                    "display_parameters": {"name": "Travel Card"},
                }],
            }));
        })
        .await;

    let query = RewardsQuery { reward_type: Some(RewardType::GiftCard), featured: Some(true), ..Default::default() };
    let page = list_rewards(&client_for(&server, "k", "s"), "PGM1", &query).await.expect("rewards should load");

    mock.assert_async().await;
    assert_eq!(page.total(), 1);
    assert_eq!(page.items[0].id, "g1");
    assert_eq!(page.next_page(), None);
}

#[tokio::test]
async fn test_non_json_success_body_is_transport_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/PGM1/rewards");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = list_rewards(&client_for(&server, "k", "s"), "PGM1", &RewardsQuery::default()).await.unwrap_err();
    assert!(matches!(err, BridgeError::Upstream(ref message) if message.starts_with("invalid JSON response")));
}

#[tokio::test]
async fn test_create_order_posts_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/PGM1/orders").header("content-type", "application/json").json_body(json!({
                "reference_no": "ref-1",
                "rewards": [{"id": "r1", "denomination": 50000, "quantity": 2}],
                "customer": {"name": "Asha", "email": "asha@example.com"},
            }));
            then.status(200).json_body(order_body("success"));
        })
        .await;

    let order = create_order(&client_for(&server, "k", "s"), "PGM1", &order_request()).await.expect("order placed");

    mock.assert_async().await;
    assert_eq!(order.order_id, "order-1");
    assert_eq!(order.status, OrderStatus::Success);
    assert_eq!(order.order.order_items[0].vouchers[0].code, "CODE-1");
}

#[tokio::test]
async fn test_create_order_accepts_numeric_strings() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/PGM1/orders");
            then.status(200).json_body(json!({
                "order_id": "order-2",
                "reference_no": "ref-1",
                "status": "success",
                "order_success_amount": "100000",
                "order": {"count": "1", "order_items": [{
                    "reward_id": "r1", "status": "success", "quantity": "2", "denomination": "50000",
                    "vouchers": [{"code": "CODE-2", "pin": "2222", "validity": "1767225600"}],
                }]},
            }));
        })
        .await;

    let order = create_order(&client_for(&server, "k", "s"), "PGM1", &order_request()).await.expect("order placed");

    let item = &order.order.order_items[0];
    assert_eq!(order.order_success_amount, Some(100000));
    assert_eq!(item.quantity, 2);
    assert_eq!(item.vouchers[0].validity, Some(1_767_225_600));
}

#[tokio::test]
async fn test_invalid_order_never_reaches_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/PGM1/orders");
            then.status(200).json_body(order_body("success"));
        })
        .await;

    let request = CreateOrderRequest { rewards: Vec::new(), ..order_request() };
    let err = create_order(&client_for(&server, "k", "s"), "PGM1", &request).await.unwrap_err();

    assert_eq!(err.to_string(), "At least one reward is required");
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_create_order_upstream_failure_is_wrapped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/PGM1/orders");
            then.status(500).body("boom");
        })
        .await;

    let err = create_order(&client_for(&server, "k", "s"), "PGM1", &order_request()).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to create order: Internal Server Error");
}

#[tokio::test]
async fn test_order_status_with_reference_number() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/PGM1/orders/order-1").query_param("reference_no", "ref-1");
            then.status(200).json_body(order_body("partial_success"));
        })
        .await;

    let order = get_order_status(&client_for(&server, "k", "s"), "PGM1", "order-1", Some("ref-1"))
        .await
        .expect("order should load");

    mock.assert_async().await;
    assert_eq!(order.status, OrderStatus::PartialSuccess);
}

#[tokio::test]
async fn test_order_status_bad_request_is_reclassified() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/PGM1/orders/nope");
            then.status(400).json_body(json!({"error": {"description": "Invalid Order ID supplied"}}));
        })
        .await;

    let err = get_order_status(&client_for(&server, "k", "s"), "PGM1", "nope", None).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid Order ID");
}

#[tokio::test]
async fn test_order_status_not_found_passes_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/PGM1/orders/gone");
            then.status(404).json_body(json!({"error": {"description": "Invalid Order ID"}}));
        })
        .await;

    let err = get_order_status(&client_for(&server, "k", "s"), "PGM1", "gone", None).await.unwrap_err();
    assert_eq!(err.to_string(), "Not Found");
}

#[tokio::test]
async fn test_place_order_tool_renders_receipt() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/PGM1/orders");
            then.status(200).json_body(order_body("success"));
        })
        .await;

    let output = call_tool(
        &client_for(&server, "k", "s"),
        "place-reward-order",
        json!({
            "programId": "PGM1",
            "reference_no": "ref-1",
            "rewards": [{"id": "r1", "denomination": 50000, "quantity": 2}],
        }),
    )
    .await;
    let text = result_text(&output);

    assert_eq!(output.is_error, Some(false));
    assert!(text.starts_with("Order placed successfully!\n\nOrder ID: order-1\nReference No: ref-1\nStatus: success\n"));
    assert!(text.contains("Amount: ₹1000.00"));
    assert!(text.contains("  - Code: CODE-1"));
}

#[tokio::test]
async fn test_order_status_tool_error_prefix() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/PGM1/orders/o-9");
            then.status(400).json_body(json!({"error": {"description": "reference no does not match"}}));
        })
        .await;

    let output = call_tool(
        &client_for(&server, "k", "s"),
        "get-order-status",
        json!({"programId": "PGM1", "orderId": "o-9", "referenceNo": "bad"}),
    )
    .await;

    assert_eq!(output.is_error, Some(true));
    assert_eq!(result_text(&output), "Error: Invalid reference number");
}
