//! Human-readable renderings of rewards and orders.
//!
//! Every function here is pure and infallible: missing optional fields degrade to
//! fallback text such as `N/A`, `Variable` or `No categories`. Money amounts arrive in
//! minor units and are converted to major units only here.

use std::borrow::Cow;

use chrono::{DateTime, Local, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

pub mod receipt;
pub mod reward;
pub mod table;

#[cfg(test)]
mod tests;

pub use receipt::format_order_receipt;
pub use reward::format_reward_details;
pub use table::{TableData, format_rewards_table, rewards_table_data};

/// Currency symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Fallback for values that are absent or cannot be rendered.
pub const NOT_AVAILABLE: &str = "N/A";

const ELLIPSIS: &str = "...";

/// Converts minor units to a major-unit string with two decimals.
///
/// # Examples
///
/// ```
/// use rewards_mcp_bridge::formatter::format_amount;
///
/// assert_eq!(format_amount(250), "2.50");
/// assert_eq!(format_amount(-5), "-0.05");
/// ```
#[must_use]
pub fn format_amount(minor: i64) -> String {
    Decimal::new(minor, 2).to_string()
}

/// Converts minor units to a whole major-unit string, rounding half away from zero.
#[must_use]
pub fn format_whole_amount(minor: i64) -> String {
    Decimal::new(minor, 2).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero).to_string()
}

/// Renders unix seconds as a calendar date in the local time zone.
#[must_use]
pub fn format_date(seconds: Option<i64>) -> String {
    format_date_in(seconds, &Local)
}

/// Renders unix seconds as a `month/day/year` calendar date in `tz`.
pub fn format_date_in<Tz: TimeZone>(seconds: Option<i64>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    seconds
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map_or_else(
            || NOT_AVAILABLE.to_owned(),
            |utc| utc.with_timezone(tz).format("%-m/%-d/%Y").to_string(),
        )
}

/// Shortens `value` to at most `max` characters, ending in `...` when cut.
///
/// # Examples
///
/// ```
/// use rewards_mcp_bridge::formatter::truncate;
///
/// assert_eq!(truncate("Amazon Pay", 23), "Amazon Pay");
/// assert_eq!(truncate("Amazon Pay Gift Card", 10), "Amazon ...");
/// ```
#[must_use]
pub fn truncate(value: &str, max: usize) -> Cow<'_, str> {
    if value.chars().count() <= max {
        return Cow::Borrowed(value);
    }

    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(&ELLIPSIS[..max.min(ELLIPSIS.len())]);
    Cow::Owned(out)
}
