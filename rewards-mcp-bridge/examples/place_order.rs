//! Reward order example.
//!
//! This example validates and places an order for a single gift card, prints the
//! receipt, and then looks the order up again by ID and reference number.
//!
//! # Running this example
//!
//! ```bash
//! export REWARDS_BASE_URL=https://rewards.example.com
//! export MERCHANT_KEY=<key> MERCHANT_SECRET=<secret>
//! cargo run --example place_order -- PGM1 <reward-id>
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use rewards_mcp_bridge::{
    BridgeConfig, BridgeError, RewardsClient,
    formatter::format_order_receipt,
    mcp::{
        models::{CreateOrderRequest, CustomerDetails, OrderReward},
        order_status::get_order_status,
        orders::{create_order, validate_order},
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Rewards MCP Bridge: Place Order Example\n");

    let mut args = env::args().skip(1);
    let program_id = args.next().unwrap_or_else(|| "PGM1".to_owned());
    let reward_id = args.next().unwrap_or_else(|| "reward-1".to_owned());

    let client = RewardsClient::from_config(&BridgeConfig::from_env()?)?;

    // Step 1: Build the request
    let request = CreateOrderRequest {
        reference_no: format!("example-{}", chrono::Utc::now().timestamp()),
        rewards: vec![OrderReward {
            id: reward_id,
            denomination: Some(50_000),
            interval: None,
            quantity: 1,
        }],
        customer: CustomerDetails::from_parts(None, Some("customer@example.com".to_owned()), None),
    };

    // Step 2: Validation runs before any request is sent
    println!("1. Validating order {}...", request.reference_no);
    let too_many = CreateOrderRequest {
        rewards: vec![OrderReward { quantity: 5, ..request.rewards[0].clone() }],
        ..request.clone()
    };
    if let Err(BridgeError::InvalidInput(message)) = validate_order(&program_id, &too_many) {
        println!("   ✓ Quantity 5 rejected: {}", message);
    }
    validate_order(&program_id, &request)?;
    println!("   ✓ Request is valid");

    // Step 3: Place the order
    println!("\n2. Placing order...");
    let order = match create_order(&client, &program_id, &request).await {
        Ok(order) => order,
        Err(e) => {
            eprintln!("   ✗ {}", e);
            eprintln!("\n   This is expected when REWARDS_BASE_URL points at example.com");
            return Ok(());
        }
    };
    println!("{}", format_order_receipt(&order));

    // Step 4: Look it up again
    println!("3. Fetching order status...");
    let status = get_order_status(&client, &program_id, &order.order_id, Some(&request.reference_no)).await?;
    println!("   ✓ Status: {}", status.status);

    Ok(())
}
