//! Error types for the rewards MCP bridge.
//!
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Validation Errors** ([`BridgeError::InvalidInput`]): caller-supplied data failed a
//!   precondition. Raised before any network I/O.
//! - **Upstream Errors** ([`BridgeError::Upstream`]): transport failures and non-2xx
//!   responses, carrying the message surfaced by the transport envelope.
//! - **Operation Errors** ([`BridgeError::OperationFailed`]): an upstream failure wrapped
//!   with the name of the operation that failed.
//! - **Decoding Errors** ([`BridgeError::InvalidResponse`]): a successful response whose
//!   body does not have the expected shape.
//! - **Startup Errors** ([`BridgeError::HttpError`], [`BridgeError::ConfigError`]):
//!   HTTP client construction and configuration problems.
//!
//! # Examples
//!
//! ```
//! use rewards_mcp_bridge::error::{BridgeError, Result};
//!
//! fn require_program(program_id: &str) -> Result<&str> {
//!     if program_id.is_empty() {
//!         return Err(BridgeError::InvalidInput("Program ID is required".to_owned()));
//!     }
//!     Ok(program_id)
//! }
//!
//! assert!(require_program("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for bridge operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur in the rewards MCP bridge.
///
/// The display text of every variant is user-facing: the tool boundary forwards it
/// to the agent unchanged after an operation-specific prefix.
///
/// # Error Recovery
///
/// - **Validation errors** ([`InvalidInput`](Self::InvalidInput)): fix input and retry
/// - **Upstream errors** ([`Upstream`](Self::Upstream),
///   [`OperationFailed`](Self::OperationFailed)): nothing is retried automatically; the
///   caller decides whether to retry
/// - **Decoding errors** ([`InvalidResponse`](Self::InvalidResponse)): upstream contract
///   changed, contact the API provider
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Caller-supplied data failed validation.
    ///
    /// The message is actionable on its own and names the offending line item index
    /// where applicable.
    ///
    /// # Examples
    ///
    /// ```
    /// use rewards_mcp_bridge::error::BridgeError;
    ///
    /// let err = BridgeError::InvalidInput("At least one reward is required".to_owned());
    /// assert_eq!(err.to_string(), "At least one reward is required");
    /// ```
    #[error("{0}")]
    InvalidInput(String),

    /// Transport failure or upstream application error.
    ///
    /// Carries the message of the transport envelope verbatim: the status text of a
    /// non-2xx response, or the underlying network failure message.
    #[error("{0}")]
    Upstream(String),

    /// An operation failed after validation, wrapped with the operation name.
    ///
    /// # Examples
    ///
    /// ```
    /// use rewards_mcp_bridge::error::BridgeError;
    ///
    /// let err = BridgeError::OperationFailed {
    ///     operation: "create order",
    ///     message: "Bad Request".to_owned(),
    /// };
    /// assert_eq!(err.to_string(), "Failed to create order: Bad Request");
    /// ```
    #[error("Failed to {operation}: {message}")]
    OperationFailed {
        /// Human-readable operation name (e.g. "create order").
        operation: &'static str,
        /// Underlying failure message.
        message: String,
    },

    /// A 2xx response did not decode into the expected shape.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// HTTP client construction failed.
    ///
    /// Only produced at startup; requests never surface this variant because the
    /// transport folds request failures into its response envelope.
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Configuration could not be loaded or failed validation.
    ///
    /// # Recovery
    ///
    /// Check `REWARDS_BASE_URL`, `REWARDS_API_STUB` and the optional `REWARDS_CONFIG`
    /// file.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BridgeError {
    /// Wraps any error with the name of the operation that failed.
    ///
    /// An error that is already wrapped is returned unchanged so that prefixes never
    /// stack.
    pub fn within(self, operation: &'static str) -> Self {
        match self {
            wrapped @ Self::OperationFailed { .. } => wrapped,
            other => Self::OperationFailed { operation, message: other.to_string() },
        }
    }
}
