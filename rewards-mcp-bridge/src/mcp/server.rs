//! MCP server handler for the rewards tools.
//!
//! [`RewardsMcpServer`] plugs the tool catalog into `rmcp`: `tools/list` returns
//! [`tool_definitions`] and `tools/call` runs [`call_tool`]. Framing, the initialize
//! handshake and protocol errors are handled by `rmcp`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rewards_mcp_bridge::{
//!     config::BridgeConfig,
//!     mcp::{RewardsClient, server::RewardsMcpServer},
//! };
//! use rmcp::{ServiceExt, transport::stdio};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RewardsClient::from_config(&BridgeConfig::from_env()?)?;
//! let service = RewardsMcpServer::new(client).serve(stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
};
use serde_json::Value;
use tracing::debug;

use crate::{
    mcp::{
        client::RewardsClient,
        tools::{call_tool, tool_definitions},
    },
    transport::Transport,
};

/// Name reported to clients during initialization.
pub const SERVER_NAME: &str = "rewards-mcp-server";

const INSTRUCTIONS: &str = "Rewards marketplace tools: check a program's wallet balance, \
browse rewards, place reward orders and look up order status. Amounts are in paise.";

/// MCP server exposing the rewards tools over a [`RewardsClient`].
#[derive(Debug)]
pub struct RewardsMcpServer<T> {
    client: RewardsClient<T>,
}

impl<T: Transport> RewardsMcpServer<T> {
    /// Wraps a configured client.
    #[must_use]
    pub const fn new(client: RewardsClient<T>) -> Self {
        Self { client }
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn client(&self) -> &RewardsClient<T> {
        &self.client
    }

    /// Runs the tool `name`. Missing arguments are treated as an empty object.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = arguments.map_or(Value::Null, Value::Object);
        call_tool(&self.client, name, arguments).await
    }
}

impl<T: Transport + 'static> ServerHandler for RewardsMcpServer<T> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..Implementation::default()
            },
            instructions: Some(INSTRUCTIONS.to_owned()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        debug!("listing tools");
        Ok(ListToolsResult::with_all_items(tool_definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.call(&request.name, request.arguments).await)
    }
}
