//! Rewards MCP Bridge: Rewards Marketplace Tools for AI Agents
//!
//! A Rust library that exposes a rewards and gift-card marketplace API as Model
//! Context Protocol (MCP) tools. Agents can check a program's wallet balance, browse
//! the reward catalog, place orders, and look up order status.
//!
//! # What is Rewards MCP Bridge?
//!
//! The library is the request/response translation layer between an agent and the
//! marketplace:
//!
//! - **Authenticated Transport**: one static HTTP Basic credential, derived once at startup
//! - **Validation Before I/O**: invalid orders never reach the network
//! - **Readable Results**: reward narratives, fixed-width tables and order receipts
//! - **One Error Discipline**: every operation returns [`Result`]; only the tool
//!   boundary turns errors into MCP error payloads
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   AI Agent      │  MCP-compatible agent
//! └────────┬────────┘
//!          │ MCP Protocol (JSON-RPC 2.0)
//!          │
//! ┌────────▼────────────────────────────────────────┐
//! │         Rewards MCP Bridge (this crate)         │
//! │  ┌──────────────┐      ┌──────────────────┐    │
//! │  │  MCP Tools   │──────│  Formatters      │    │
//! │  │  (balance,   │      │  (narrative,     │    │
//! │  │   rewards,   │      │   table,         │    │
//! │  │   orders)    │      │   receipt)       │    │
//! │  └──────┬───────┘      └──────────────────┘    │
//! │         │ Transport (Basic auth, JSON)          │
//! └─────────┼───────────────────────────────────────┘
//!           │ HTTPS
//! ┌─────────▼───────┐
//! │  Rewards API    │
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rewards_mcp_bridge::{
//!     config::BridgeConfig,
//!     mcp::{RewardsClient, balance::get_balance, call_tool, result_text},
//! };
//!
//! # async fn example() -> rewards_mcp_bridge::error::Result<()> {
//! // REWARDS_BASE_URL, MERCHANT_KEY, MERCHANT_SECRET, MERCHANT_ID
//! let config = BridgeConfig::from_env()?;
//! config.validate()?;
//! let client = RewardsClient::from_config(&config)?;
//!
//! // Typed operation
//! let balance = get_balance(&client, "PGM1").await?;
//! println!("{} {}", balance.item.amount, balance.item.currency);
//!
//! // Tool invocation, as an MCP server would do it
//! let output = call_tool(&client, "get-program-balance", serde_json::json!({
//!     "programId": "PGM1"
//! }))
//! .await;
//! println!("{}", result_text(&output));
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`]: Basic credential derivation
//! - [`config`]: environment and TOML configuration
//! - [`transport`]: HTTP transport returning uniform response envelopes
//! - [`mcp`]: operations, data models and the MCP tool catalog
//! - [`formatter`]: reward narrative, reward table and order receipt rendering
//! - [`error`]: error types
//!
//! # Money
//!
//! Amounts are integers in minor currency units (paise) everywhere except the
//! [`formatter`] output, which divides by 100 using decimal arithmetic.
//!
//! # Error Handling
//!
//! ```rust
//! use rewards_mcp_bridge::BridgeError;
//!
//! fn describe(err: &BridgeError) -> &'static str {
//!     match err {
//!         BridgeError::InvalidInput(_) => "fix the request",
//!         BridgeError::Upstream(_) | BridgeError::OperationFailed { .. } => "upstream failure",
//!         BridgeError::InvalidResponse(_) => "unexpected response shape",
//!         BridgeError::HttpError(_) | BridgeError::ConfigError(_) => "startup problem",
//!     }
//! }
//!
//! let err = BridgeError::InvalidInput("At least one reward is required".to_owned());
//! assert_eq!(describe(&err), "fix the request");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from rmcp and reqwest"
)]

pub mod auth;
pub mod config;
pub mod error;
pub mod formatter;
pub mod mcp;
pub mod transport;

pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use mcp::{RewardsClient, RewardsMcpServer, call_tool, result_text, tool_definitions};
