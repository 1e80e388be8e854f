//! Single-reward narrative.

use super::{CURRENCY_SYMBOL, NOT_AVAILABLE, format_amount, format_date};
use crate::mcp::models::{Denomination, Reward, RewardKind};

/// Marker on the first line of a featured reward.
pub const FEATURED_MARKER: &str = "⭐ FEATURED";

/// Interval assumed for a membership amount when none is reported.
const DEFAULT_INTERVAL: &str = "month";

/// Renders a multi-line description of `reward`.
///
/// Lines that have nothing to show (no featured marker, no discount, no denomination)
/// are left out rather than rendered empty.
///
/// # Examples
///
/// ```
/// use rewards_mcp_bridge::{formatter::format_reward_details, mcp::models::Reward};
///
/// let reward: Reward = serde_json::from_value(serde_json::json!({
///     "id": "r1",
///     "type": "offer",
///     "status": "active",
///     "offer_has_code": "TRUE",
///     "display_parameters": {"name": "Flat 10% off", "redemption_channels": ["online"]},
///     "brand": {"name": "Acme"},
/// }))?;
///
/// let text = format_reward_details(&reward);
/// assert!(text.contains("Type: Offer\nHas Code: Yes"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[must_use]
pub fn format_reward_details(reward: &Reward) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(12);

    if reward.featured {
        lines.push(FEATURED_MARKER.to_owned());
    }
    lines.push(format!("ID: {}", reward.id));
    lines.push(format!("Name: {}", reward.display.name));
    lines.push(format!("Brand: {}", reward.brand.name));

    match &reward.kind {
        RewardKind::GiftCard { denomination } => {
            lines.push("Type: Gift Card".to_owned());
            lines.extend(denomination_summary(denomination));
        }
        RewardKind::Membership { interval, amount } => {
            lines.push("Type: Membership".to_owned());
            lines.push(format!("Interval: {}", interval.as_deref().unwrap_or(NOT_AVAILABLE)));
            if let Some(amount) = amount.filter(|a| *a != 0) {
                lines.push(format!(
                    "Amount: {CURRENCY_SYMBOL}{} / {}",
                    format_amount(amount),
                    interval.as_deref().unwrap_or(DEFAULT_INTERVAL)
                ));
            }
        }
        RewardKind::Offer { has_code } => {
            lines.push("Type: Offer".to_owned());
            lines.push(format!("Has Code: {}", if *has_code { "Yes" } else { "No" }));
        }
        RewardKind::Other(tag) => lines.push(format!("Type: {tag}")),
    }

    if let Some(discount) = &reward.discount {
        lines.push(format!("Discount: {}% ({})", format_amount(discount.value), discount.kind));
    }

    lines.push(format!("Status: {}", reward.status));
    lines.push(format!("Categories: {}", join_or(&reward.categories, "No categories")));
    lines.push(format!("Redemption: {}", join_or(&reward.display.redemption_channels, NOT_AVAILABLE)));
    lines.push(format!(
        "Valid: {} - {}",
        format_date(reward.validity.start),
        format_date(reward.validity.end)
    ));

    lines.join("\n")
}

fn denomination_summary(denomination: &Denomination) -> Option<String> {
    match denomination {
        Denomination::Fixed(amounts) => {
            let values: Vec<String> =
                amounts.iter().map(|a| format!("{CURRENCY_SYMBOL}{}", format_amount(*a))).collect();
            Some(format!("Fixed denominations: {}", values.join(", ")))
        }
        Denomination::Range { min, max } => Some(format!(
            "Range: {CURRENCY_SYMBOL}{} - {CURRENCY_SYMBOL}{}",
            format_amount(*min),
            format_amount(*max)
        )),
        Denomination::Unspecified => None,
    }
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() { fallback.to_owned() } else { values.join(", ") }
}
