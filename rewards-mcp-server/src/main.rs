//! Rewards MCP Server - MCP stdio server for the rewards marketplace tools
//!
//! Loads configuration from the environment, logs a startup health report to
//! stderr, and serves the tool catalog over stdio until the client disconnects.

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from rmcp and reqwest"
)]

mod observability;

use std::process::ExitCode;

use rewards_mcp_bridge::{BridgeConfig, RewardsClient, RewardsMcpServer};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info};

use crate::observability::{HealthReport, LogFormat, init_observability};

/// Main entry point for the rewards MCP server.
#[tokio::main]
async fn main() -> ExitCode {
    init_observability(LogFormat::from_env());

    let config = match BridgeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    HealthReport::from_config(&config).log();

    let client = match RewardsClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create HTTP transport");
            return ExitCode::FAILURE;
        }
    };

    info!(base_url = %config.base_url, api_stub = %config.api_stub, "serving MCP on stdio");

    let service = match RewardsMcpServer::new(client).serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "MCP initialization failed");
            return ExitCode::FAILURE;
        }
    };

    match service.waiting().await {
        Ok(reason) => {
            info!(?reason, "MCP session ended");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "MCP service task failed");
            ExitCode::FAILURE
        }
    }
}
