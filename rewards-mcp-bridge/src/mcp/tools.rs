//! MCP tool catalog and dispatch.
//!
//! This is the only place where a [`BridgeError`](crate::error::BridgeError) becomes a
//! protocol-level failure: every call yields a [`CallToolResult`], with `is_error` set
//! and an operation-specific prefix on failure.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crate::{
    error::{BridgeError, Result},
    formatter::{
        CURRENCY_SYMBOL, format_amount, format_order_receipt, format_reward_details,
        format_rewards_table, rewards_table_data,
    },
    mcp::{
        balance::get_balance,
        client::RewardsClient,
        models::{CreateOrderRequest, CustomerDetails, OrderReward, RewardsQuery},
        order_status::get_order_status_with_body,
        orders::create_order,
        rewards::list_rewards,
    },
    transport::Transport,
};

/// Balance lookup tool.
pub const GET_PROGRAM_BALANCE: &str = "get-program-balance";
/// Catalog listing tool.
pub const LIST_REWARDS: &str = "list-rewards";
/// Order placement tool.
pub const PLACE_REWARD_ORDER: &str = "place-reward-order";
/// Order lookup tool.
pub const GET_ORDER_STATUS: &str = "get-order-status";

/// Returns the text of the first content block of a tool result.
///
/// Tool results built by [`call_tool`] always carry exactly one text block.
#[must_use]
pub fn result_text(result: &CallToolResult) -> &str {
    result.content.first().and_then(|c| c.as_text()).map_or("", |t| t.text.as_str())
}

fn tool(name: &'static str, description: &'static str, input_schema: Value) -> Tool {
    let schema = match input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(name, description, Arc::new(schema))
}

/// Returns the definitions of every tool, in registration order.
#[must_use]
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        tool(
            GET_PROGRAM_BALANCE,
            "Retrieves the current balance of the merchant wallet associated with a rewards program",
            json!({
                "type": "object",
                "properties": {
                    "programId": {
                        "type": "string",
                        "description": "The programme ID for which balance has to be checked"
                    }
                },
                "required": ["programId"]
            }),
        ),
        tool(
            LIST_REWARDS,
            "Retrieves a list of available rewards with filtering options for the given program",
            json!({
                "type": "object",
                "properties": {
                    "programId": {"type": "string", "description": "The program ID for which to fetch rewards"},
                    "page_id": {"type": "string", "description": "Optional page ID for pagination"},
                    "count": {"type": "string", "description": "Number of rewards to display per page"},
                    "brand_name": {"type": "string", "description": "Filter by brand name"},
                    "category": {"type": "string", "description": "Filter by reward category"},
                    "type": {
                        "type": "string",
                        "enum": ["gift_card", "membership", "offer"],
                        "description": "Filter by reward type"
                    },
                    "featured": {"type": "boolean", "description": "Filter for featured rewards only"},
                    "min_price": {"type": "string", "description": "Filter by minimum price (in rupees)"},
                    "max_price": {"type": "string", "description": "Filter by maximum price (in rupees)"},
                    "denomination": {
                        "type": "string",
                        "description": "Filter by specific denomination. Denomination is in paisa"
                    },
                    "sort_by": {"type": "string", "enum": ["gmv", "units_sold"], "description": "Sort results by"},
                    "expiry_by": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Only rewards expiring within this many days"
                    }
                },
                "required": ["programId"]
            }),
        ),
        tool(
            PLACE_REWARD_ORDER,
            "Places an order for one or more rewards such as gift cards, memberships, or offers",
            json!({
                "type": "object",
                "properties": {
                    "programId": {"type": "string", "description": "The program ID for which to place the order"},
                    "reference_no": {"type": "string", "description": "Unique reference number for the order"},
                    "rewards": {
                        "type": "array",
                        "description": "Array of rewards to purchase",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": {
                                    "type": "string",
                                    "description": "Reward ID to purchase, same as ID returned in list-rewards tool"
                                },
                                "denomination": {
                                    "type": "integer",
                                    "description": "Denomination amount in paise. Mandatory for gift cards"
                                },
                                "interval": {
                                    "type": "string",
                                    "description": "Plan interval (required for memberships like 'Monthly')"
                                },
                                "quantity": {
                                    "type": "integer",
                                    "minimum": 1,
                                    "maximum": 4,
                                    "description": "Quantity to purchase (1-4)"
                                }
                            },
                            "required": ["id", "quantity"]
                        }
                    },
                    "customer_name": {"type": "string", "description": "Optional customer name"},
                    "customer_email": {"type": "string", "format": "email", "description": "Optional customer email"},
                    "customer_contact": {"type": "integer", "description": "Optional customer contact number"}
                },
                "required": ["programId", "reference_no", "rewards"]
            }),
        ),
        tool(
            GET_ORDER_STATUS,
            "Fetches the status of a specific order using the program ID, order ID, and an optional reference number",
            json!({
                "type": "object",
                "properties": {
                    "programId": {"type": "string", "description": "The program ID associated with the order"},
                    "orderId": {"type": "string", "description": "The order ID to fetch the status for"},
                    "referenceNo": {"type": "string", "description": "Optional reference number for the order"}
                },
                "required": ["programId", "orderId"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct BalanceArgs {
    #[serde(default, rename = "programId")]
    program_id: String,
}

#[derive(Debug, Deserialize)]
struct ListRewardsArgs {
    #[serde(default, rename = "programId")]
    program_id: String,
    #[serde(flatten)]
    query: RewardsQuery,
}

#[derive(Debug, Deserialize)]
struct PlaceOrderArgs {
    #[serde(default, rename = "programId")]
    program_id: String,
    #[serde(default)]
    reference_no: String,
    #[serde(default)]
    rewards: Vec<OrderReward>,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    customer_email: Option<String>,
    #[serde(default)]
    customer_contact: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderStatusArgs {
    #[serde(default)]
    program_id: String,
    #[serde(default)]
    order_id: String,
    #[serde(default)]
    reference_no: Option<String>,
}

/// Invokes the tool called `name` with JSON `arguments`.
///
/// Never fails: unknown tools, malformed arguments and operation errors all become
/// error results.
///
/// # Examples
///
/// ```no_run
/// use rewards_mcp_bridge::{
///     config::BridgeConfig,
///     mcp::{RewardsClient, tools::{call_tool, result_text}},
/// };
///
/// # async fn example() -> rewards_mcp_bridge::error::Result<()> {
/// let client = RewardsClient::from_config(&BridgeConfig::from_env()?)?;
/// let output =
///     call_tool(&client, "get-program-balance", serde_json::json!({"programId": "PGM1"})).await;
/// println!("{}", result_text(&output));
/// # Ok(())
/// # }
/// ```
#[instrument(skip(client, arguments))]
pub async fn call_tool<T: Transport>(client: &RewardsClient<T>, name: &str, arguments: Value) -> CallToolResult {
    let (prefix, result) = match name {
        GET_PROGRAM_BALANCE => ("Error checking balance: ", balance_tool(client, arguments).await),
        LIST_REWARDS => ("Error fetching rewards: ", list_rewards_tool(client, arguments).await),
        PLACE_REWARD_ORDER => ("Error placing order: ", place_order_tool(client, arguments).await),
        GET_ORDER_STATUS => ("Error: ", order_status_tool(client, arguments).await),
        unknown => {
            warn!(tool = unknown, "unknown tool requested");
            return CallToolResult::error(vec![Content::text(format!("Unknown tool: {unknown}"))]);
        }
    };

    match result {
        Ok(text) => {
            info!("tool call succeeded");
            CallToolResult::success(vec![Content::text(text)])
        }
        Err(e) => {
            warn!(error = %e, "tool call failed");
            CallToolResult::error(vec![Content::text(format!("{prefix}{e}"))])
        }
    }
}

fn parse_args<A: DeserializeOwned>(arguments: Value) -> Result<A> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).map_err(|e| BridgeError::InvalidInput(format!("Invalid arguments: {e}")))
}

async fn balance_tool<T: Transport>(client: &RewardsClient<T>, arguments: Value) -> Result<String> {
    let args: BalanceArgs = parse_args(arguments)?;
    let balance = get_balance(client, &args.program_id).await?;

    Ok(format!(
        "Program {} has a balance of {CURRENCY_SYMBOL}{} {}",
        args.program_id,
        format_amount(balance.item.amount),
        balance.item.currency
    ))
}

async fn list_rewards_tool<T: Transport>(client: &RewardsClient<T>, arguments: Value) -> Result<String> {
    let args: ListRewardsArgs = parse_args(arguments)?;
    let page = list_rewards(client, &args.program_id, &args.query).await?;

    let details = page
        .items
        .iter()
        .enumerate()
        .map(|(index, reward)| format!("## Reward {}\n{}", index + 1, format_reward_details(reward)))
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut text = format!(
        "Found {} rewards for program {}\n\n# Rewards Table\n\n{}\n\n# Detailed Information\n\n{details}",
        page.total(),
        args.program_id,
        format_rewards_table(&page.items)
    );

    if let Some(next) = page.next_page() {
        text.push_str(&format!("\n\nMore rewards available. Use page_id: \"{next}\" to see more."));
    }

    let table = serde_json::to_string(&rewards_table_data(&args.program_id, &page.items))
        .map_err(|e| BridgeError::InvalidResponse(e.to_string()))?;
    // `--` would close the comment early.
    text.push_str(&format!("\n\n<!-- Table Data: {} -->", table.replace("--", "-\\u002d")));

    Ok(text)
}

async fn place_order_tool<T: Transport>(client: &RewardsClient<T>, arguments: Value) -> Result<String> {
    let args: PlaceOrderArgs = parse_args(arguments)?;
    let request = CreateOrderRequest {
        reference_no: args.reference_no,
        rewards: args.rewards,
        customer: CustomerDetails::from_parts(args.customer_name, args.customer_email, args.customer_contact),
    };

    let order = create_order(client, &args.program_id, &request).await?;
    Ok(format!("Order placed successfully!\n\n{}", format_order_receipt(&order)))
}

async fn order_status_tool<T: Transport>(client: &RewardsClient<T>, arguments: Value) -> Result<String> {
    let args: OrderStatusArgs = parse_args(arguments)?;
    let (_, body) =
        get_order_status_with_body(client, &args.program_id, &args.order_id, args.reference_no.as_deref()).await?;

    serde_json::to_string_pretty(&body).map_err(|e| BridgeError::InvalidResponse(e.to_string()))
}
