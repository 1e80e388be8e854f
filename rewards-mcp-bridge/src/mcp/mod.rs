//! Model Context Protocol (MCP) integration.
//!
//! This module implements the rewards operations and exposes them as MCP tools.
//! Each operation follows the same shape: validate, build the path, call the
//! [`Transport`](crate::transport::Transport), classify the result.
//!
//! # Available Operations
//!
//! - [`balance::get_balance`]: program wallet balance
//! - [`rewards::list_rewards`]: reward catalog with filters and pagination
//! - [`orders::create_order`]: place an order for one or more rewards
//! - [`order_status::get_order_status`]: look up an existing order
//!
//! # Architecture
//!
//! ```text
//! AI Agent
//!     │
//!     │ MCP Protocol (JSON-RPC 2.0)
//!     ▼
//! rmcp ServerHandler (server)
//!     │
//!     ▼
//! Tool dispatch (tools)
//!     │
//!     │ argument decoding, error prefixes
//!     ▼
//! Operations (balance, rewards, orders, order_status)
//!     │
//!     │ validation, error classification
//!     ▼
//! Transport (Basic auth, JSON)
//!     │
//!     ▼
//! Rewards API (HTTPS)
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use rewards_mcp_bridge::{
//!     config::BridgeConfig,
//!     mcp::{RewardsClient, call_tool, result_text},
//! };
//!
//! # async fn example() -> rewards_mcp_bridge::error::Result<()> {
//! let config = BridgeConfig::from_env()?;
//! let client = RewardsClient::from_config(&config)?;
//!
//! let output = call_tool(&client, "list-rewards", serde_json::json!({
//!     "programId": "PGM1",
//!     "type": "gift_card",
//! }))
//! .await;
//! println!("{}", result_text(&output));
//! # Ok(())
//! # }
//! ```

pub mod balance;
pub mod client;
pub mod http;
pub mod models;
pub mod order_status;
pub mod orders;
pub mod rewards;
pub mod server;
pub mod tools;

pub use client::RewardsClient;
pub use server::RewardsMcpServer;
pub use tools::{call_tool, result_text, tool_definitions};
