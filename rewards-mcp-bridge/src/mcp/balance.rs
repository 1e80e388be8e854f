//! Program wallet balance lookup.

use tracing::{info, instrument};

use crate::{
    error::Result,
    mcp::{
        client::{MERCHANT_ID_HEADER, RewardsClient, require_program_id},
        models::BalanceResponse,
    },
    transport::{HttpMethod, Transport},
};

/// Retrieves the balance of a program wallet.
///
/// Sends the configured merchant identifier in the `X-Merchant-Id` header. Upstream
/// errors surface verbatim.
///
/// # Errors
///
/// Returns error if `program_id` is empty, the upstream reports an error, or the
/// response body does not describe a balance.
///
/// # Examples
///
/// ```no_run
/// use rewards_mcp_bridge::{config::BridgeConfig, mcp::{RewardsClient, balance::get_balance}};
///
/// # async fn example() -> rewards_mcp_bridge::error::Result<()> {
/// let client = RewardsClient::from_config(&BridgeConfig::from_env()?)?;
/// let balance = get_balance(&client, "PGM1").await?;
/// println!("{} {}", balance.item.amount, balance.item.currency);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(client))]
pub async fn get_balance<T: Transport>(
    client: &RewardsClient<T>,
    program_id: &str,
) -> Result<BalanceResponse> {
    require_program_id(program_id)?;
    info!("fetching program balance");

    let path = client.program_path(program_id, &["balance"])?;
    let headers = [(MERCHANT_ID_HEADER, client.merchant_id())];

    let balance: BalanceResponse =
        client.transport().send(HttpMethod::Get, &path, None::<&()>, &headers).await.decode()?;

    info!(currency = %balance.item.currency, "balance retrieved");
    Ok(balance)
}
