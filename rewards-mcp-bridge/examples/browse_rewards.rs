//! Reward catalog browsing example.
//!
//! This example checks a program's wallet balance and then lists its featured gift
//! cards, printing the same table and narratives the MCP tools return.
//!
//! # Running this example
//!
//! ```bash
//! export REWARDS_BASE_URL=https://rewards.example.com
//! export MERCHANT_KEY=<key> MERCHANT_SECRET=<secret> MERCHANT_ID=<merchant>
//! cargo run --example browse_rewards -- PGM1
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use rewards_mcp_bridge::{
    BridgeConfig, RewardsClient,
    formatter::{CURRENCY_SYMBOL, format_amount, format_reward_details, format_rewards_table},
    mcp::{
        balance::get_balance,
        models::{RewardType, RewardsQuery},
        rewards::list_rewards,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Rewards MCP Bridge: Browse Rewards Example\n");

    let program_id = env::args().nth(1).unwrap_or_else(|| "PGM1".to_owned());

    // Step 1: Load configuration
    println!("1. Loading configuration from the environment...");
    let config = BridgeConfig::from_env()?;
    println!("   ✓ Base URL: {}", config.base_url);

    let client = RewardsClient::from_config(&config)?;

    // Step 2: Wallet balance
    println!("\n2. Checking balance of program {}...", program_id);
    match get_balance(&client, &program_id).await {
        Ok(balance) => println!(
            "   ✓ {CURRENCY_SYMBOL}{} {}",
            format_amount(balance.item.amount),
            balance.item.currency
        ),
        Err(e) => eprintln!("   ✗ Balance check failed: {}", e),
    }

    // Step 3: Featured gift cards
    println!("\n3. Listing featured gift cards...");
    let query = RewardsQuery {
        reward_type: Some(RewardType::GiftCard),
        featured: Some(true),
        count: Some("10".to_owned()),
        ..Default::default()
    };

    let page = match list_rewards(&client, &program_id, &query).await {
        Ok(page) => page,
        Err(e) => {
            eprintln!("   ✗ Listing failed: {}", e);
            eprintln!("\n   This is expected when REWARDS_BASE_URL points at example.com");
            return Ok(());
        }
    };

    println!("   ✓ {} rewards\n", page.total());
    println!("{}", format_rewards_table(&page.items));

    for reward in page.items.iter().take(3) {
        println!("\n{}", format_reward_details(reward));
    }

    if let Some(next) = page.next_page() {
        println!("\nNext page: {}", next);
    }

    Ok(())
}
