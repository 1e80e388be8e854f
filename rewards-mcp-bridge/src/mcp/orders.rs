//! Order placement.

use tracing::{info, instrument, warn};

use crate::{
    error::{BridgeError, Result},
    mcp::{
        client::{RewardsClient, require, require_program_id},
        models::{CreateOrderRequest, OrderResponse},
    },
    transport::{HttpMethod, Transport},
};

/// Smallest quantity accepted per line item.
pub const MIN_QUANTITY: i64 = 1;
/// Largest quantity accepted per line item.
pub const MAX_QUANTITY: i64 = 4;

/// Validates an order request. The first violated rule wins.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] naming the violated rule, and the index of
/// the offending line item where one applies.
pub fn validate_order(program_id: &str, request: &CreateOrderRequest) -> Result<()> {
    require_program_id(program_id)?;
    require(&request.reference_no, "Reference number is required")?;

    if request.rewards.is_empty() {
        return Err(BridgeError::InvalidInput("At least one reward is required".to_owned()));
    }

    for (index, reward) in request.rewards.iter().enumerate() {
        require(&reward.id, &format!("Reward ID is required for reward at index {index}"))?;

        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&reward.quantity) {
            return Err(BridgeError::InvalidInput(format!(
                "Invalid quantity for reward at index {index}. Must be between {MIN_QUANTITY} and {MAX_QUANTITY}."
            )));
        }
    }

    if let Some(email) = request.customer.as_ref().and_then(|c| c.email.as_deref()) {
        validate_email(email)?;
    }

    Ok(())
}

/// Checks that `email` has a single `@` separating non-empty local and domain parts.
fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid { Ok(()) } else { Err(BridgeError::InvalidInput("Invalid customer email".to_owned())) }
}

/// Places an order for one or more rewards.
///
/// The request is validated before any network call. Failures after validation are
/// reported as `Failed to create order: {cause}`.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] for invalid requests and
/// [`BridgeError::OperationFailed`] for upstream or decoding failures.
///
/// # Examples
///
/// ```no_run
/// use rewards_mcp_bridge::{
///     config::BridgeConfig,
///     mcp::{
///         RewardsClient,
///         models::{CreateOrderRequest, OrderReward},
///         orders::create_order,
///     },
/// };
///
/// # async fn example() -> rewards_mcp_bridge::error::Result<()> {
/// let client = RewardsClient::from_config(&BridgeConfig::from_env()?)?;
/// let request = CreateOrderRequest {
///     reference_no: "ref-2024-001".into(),
///     rewards: vec![OrderReward {
///         id: "reward-1".into(),
///         denomination: Some(50_000),
///         interval: None,
///         quantity: 1,
///     }],
///     customer: None,
/// };
///
/// let order = create_order(&client, "PGM1", &request).await?;
/// println!("Order {} is {}", order.order_id, order.status);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(client, request), fields(reference_no = %request.reference_no, items = request.rewards.len()))]
pub async fn create_order<T: Transport>(
    client: &RewardsClient<T>,
    program_id: &str,
    request: &CreateOrderRequest,
) -> Result<OrderResponse> {
    validate_order(program_id, request)?;
    info!("placing order");

    let order = submit(client, program_id, request).await.map_err(|e| {
        warn!(error = %e, "order placement failed");
        e.within("create order")
    })?;

    info!(order_id = %order.order_id, status = %order.status, "order placed");
    Ok(order)
}

async fn submit<T: Transport>(
    client: &RewardsClient<T>,
    program_id: &str,
    request: &CreateOrderRequest,
) -> Result<OrderResponse> {
    let path = client.program_path(program_id, &["orders"])?;
    client.transport().send(HttpMethod::Post, &path, Some(request), &[]).await.decode()
}
