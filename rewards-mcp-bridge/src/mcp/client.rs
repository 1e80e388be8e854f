//! Shared context for the rewards operations.

use crate::{
    config::BridgeConfig,
    error::{BridgeError, Result},
    mcp::http::build_api_path,
    transport::{HttpTransport, Transport},
};

/// Header carrying the merchant identifier on balance requests.
pub const MERCHANT_ID_HEADER: &str = "X-Merchant-Id";

/// Everything an operation needs to reach the rewards API.
///
/// Built once at startup and shared by reference; holds no mutable state.
#[derive(Debug, Clone)]
pub struct RewardsClient<T> {
    transport: T,
    api_stub: String,
    merchant_id: String,
}

impl RewardsClient<HttpTransport> {
    /// Builds an HTTP-backed client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP transport cannot be created.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport, config.api_stub.clone(), config.merchant_id.clone()))
    }
}

impl<T: Transport> RewardsClient<T> {
    /// Creates a client over an existing transport.
    #[must_use]
    pub fn new(transport: T, api_stub: impl Into<String>, merchant_id: impl Into<String>) -> Self {
        Self { transport, api_stub: api_stub.into(), merchant_id: merchant_id.into() }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the configured merchant identifier, possibly empty.
    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Builds `/{stub}/{program_id}/{segments...}`.
    pub(crate) fn program_path(&self, program_id: &str, segments: &[&str]) -> Result<String> {
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push(program_id);
        all.extend_from_slice(segments);
        build_api_path(&self.api_stub, &all)
    }
}

/// Rejects an empty program identifier.
pub(crate) fn require_program_id(program_id: &str) -> Result<()> {
    require(program_id, "Program ID is required")
}

pub(crate) fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::InvalidInput(message.to_owned()));
    }
    Ok(())
}
