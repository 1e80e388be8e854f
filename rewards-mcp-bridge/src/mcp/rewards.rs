//! Reward catalog browsing.

use tracing::{info, instrument};

use crate::{
    error::Result,
    mcp::{
        client::{RewardsClient, require_program_id},
        http::build_url_with_query,
        models::{RewardsPage, RewardsQuery},
    },
    transport::{HttpMethod, Transport},
};

/// Retrieves one page of the reward catalog.
///
/// Only the filters present in `query` are sent; see [`RewardsQuery::to_query_pairs`].
///
/// # Errors
///
/// Returns error if `program_id` is empty, the upstream reports an error, or the
/// response body is not a reward collection.
///
/// # Examples
///
/// ```no_run
/// use rewards_mcp_bridge::{
///     config::BridgeConfig,
///     mcp::{
///         RewardsClient,
///         models::{RewardType, RewardsQuery},
///         rewards::list_rewards,
///     },
/// };
///
/// # async fn example() -> rewards_mcp_bridge::error::Result<()> {
/// let client = RewardsClient::from_config(&BridgeConfig::from_env()?)?;
/// let query = RewardsQuery {
///     reward_type: Some(RewardType::GiftCard),
///     featured: Some(true),
///     ..Default::default()
/// };
///
/// let page = list_rewards(&client, "PGM1", &query).await?;
/// println!("Found {} rewards", page.total());
/// # Ok(())
/// # }
/// ```
#[instrument(skip(client, query))]
pub async fn list_rewards<T: Transport>(
    client: &RewardsClient<T>,
    program_id: &str,
    query: &RewardsQuery,
) -> Result<RewardsPage> {
    require_program_id(program_id)?;
    info!("fetching reward catalog");

    let pairs = query.to_query_pairs();
    let params: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let path = build_url_with_query(&client.program_path(program_id, &["rewards"])?, &params)?;

    let page: RewardsPage =
        client.transport().send(HttpMethod::Get, &path, None::<&()>, &[]).await.decode()?;

    info!(count = page.items.len(), has_more = page.next_page().is_some(), "catalog retrieved");
    Ok(page)
}
