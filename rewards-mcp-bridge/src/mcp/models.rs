//! Rewards marketplace data models.
//!
//! Wire payloads are decoded leniently and normalized at this boundary: the two
//! legacy category field names collapse into one list, discount values collapse into
//! one amount, and every reward becomes a [`RewardKind`] carrying only the fields of
//! its own variant. Money amounts stay in minor units (paise) until formatting.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Reward category accepted by the catalog filter and reported on order items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    /// Gift card with fixed or ranged denominations.
    GiftCard,
    /// Recurring membership.
    Membership,
    /// Discount offer.
    Offer,
}

impl RewardType {
    /// Returns the wire name of the reward type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GiftCard => "gift_card",
            Self::Membership => "membership",
            Self::Offer => "offer",
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Highest gross merchandise value first.
    Gmv,
    /// Most units sold first.
    UnitsSold,
}

impl SortBy {
    /// Returns the wire name of the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gmv => "gmv",
            Self::UnitsSold => "units_sold",
        }
    }
}

/// Declares a string-backed status enum that keeps unrecognized values verbatim.
macro_rules! open_status {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Any status not known to this client, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Returns the status exactly as the upstream reported it.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(raw) => raw,
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                match status {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_owned(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_status! {
    /// Lifecycle status of a reward.
    RewardStatus {
        /// Reward can be ordered.
        Active => "active",
        /// Reward is listed but cannot be ordered.
        Inactive => "inactive",
    }
}

open_status! {
    /// Aggregate order status. Authoritative as returned by the server.
    OrderStatus {
        /// Every item succeeded.
        Success => "success",
        /// Some items failed.
        PartialSuccess => "partial_success",
        /// Every item failed.
        Failure => "failure",
    }
}

open_status! {
    /// Per-line order item status.
    ItemStatus {
        /// Item was fulfilled.
        Success => "success",
        /// Item was not fulfilled.
        Failed => "failed",
    }
}

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

/// Program wallet balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Entity tag reported by the upstream (`balance`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Balance line.
    pub item: BalanceItem,
}

/// Single balance line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceItem {
    /// Wallet identifier.
    #[serde(default)]
    pub id: String,
    /// Amount in minor units.
    pub amount: i64,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Display metadata of a reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayParameters {
    /// Human-readable name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Terms and conditions.
    pub terms: String,
    /// Redemption channels in display order.
    pub redemption_channels: Vec<String>,
    /// Redemption URL.
    pub redemption_url: String,
    /// Optional redemption instructions.
    pub redemption_instructions: Option<String>,
    /// Optional image URL.
    pub image_url: Option<String>,
}

/// Brand offering a reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Brand {
    /// Brand name.
    pub name: String,
    /// Brand website.
    pub website: String,
    /// Brand logo URL.
    pub logo_url: String,
    /// Optional brand description.
    pub description: Option<String>,
}

/// Normalized discount terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    /// Discount type as reported (`percentage` or `fixed`).
    pub kind: String,
    /// Discount value; basis points for percentages, minor units for fixed amounts.
    pub value: i64,
}

/// Unix-seconds validity window. Unparsable bounds are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validity {
    /// Start of the window.
    pub start: Option<i64>,
    /// End of the window.
    pub end: Option<i64>,
}

/// Gift card denomination mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denomination {
    /// Only the listed amounts (minor units) can be ordered.
    Fixed(Vec<i64>),
    /// Any amount between `min` and `max` (minor units).
    Range {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
    /// The upstream did not describe a usable denomination.
    Unspecified,
}

/// Variant-specific reward fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardKind {
    /// Gift card.
    GiftCard {
        /// Denomination mode.
        denomination: Denomination,
    },
    /// Recurring membership.
    Membership {
        /// Recurrence interval (`Monthly`, `Yearly`, ...).
        interval: Option<String>,
        /// Price per interval in minor units.
        amount: Option<i64>,
    },
    /// Discount offer.
    Offer {
        /// Whether redemption requires a code.
        has_code: bool,
    },
    /// A type this crate does not know, with its wire tag kept verbatim.
    Other(String),
}

impl RewardKind {
    /// Returns the reward type tag, or `None` for an unknown type.
    #[must_use]
    pub const fn reward_type(&self) -> Option<RewardType> {
        match self {
            Self::GiftCard { .. } => Some(RewardType::GiftCard),
            Self::Membership { .. } => Some(RewardType::Membership),
            Self::Offer { .. } => Some(RewardType::Offer),
            Self::Other(_) => None,
        }
    }

    /// Returns the wire name of the reward type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Other(tag) => tag,
            known => known.reward_type().map_or("", RewardType::as_str),
        }
    }
}

/// Catalog reward, normalized from the wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawReward")]
pub struct Reward {
    /// Reward identifier.
    pub id: String,
    /// Lifecycle status.
    pub status: RewardStatus,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Display metadata.
    pub display: DisplayParameters,
    /// Brand.
    pub brand: Brand,
    /// Discount terms, present only when the upstream names a discount type.
    pub discount: Option<Discount>,
    /// Validity window.
    pub validity: Validity,
    /// Featured flag.
    pub featured: bool,
    /// Categories, from whichever legacy field was populated first.
    pub categories: Vec<String>,
    /// Variant-specific fields.
    pub kind: RewardKind,
}

impl Reward {
    /// Returns the reward type tag, or `None` for an unknown type.
    #[must_use]
    pub const fn reward_type(&self) -> Option<RewardType> {
        self.kind.reward_type()
    }

    /// Returns the wire name of the reward type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// One page of the rewards catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewardsPage {
    /// Count reported by the upstream.
    #[serde(default)]
    pub count: Option<u64>,
    /// Cursor of the next page, if any.
    #[serde(default)]
    pub next_page_id: Option<String>,
    /// Rewards on this page.
    #[serde(default)]
    pub items: Vec<Reward>,
}

impl RewardsPage {
    /// Returns the reported count, falling back to the number of decoded items.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.count.unwrap_or(self.items.len() as u64)
    }

    /// Returns the next-page cursor when it is non-empty.
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct RawDiscount {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    discount_value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawReward {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    start_date: Option<Value>,
    #[serde(default)]
    end_date: Option<Value>,
    #[serde(default)]
    featured: Option<bool>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    category: Option<Vec<String>>,
    #[serde(default)]
    display_parameters: DisplayParameters,
    #[serde(default)]
    brand: Brand,
    #[serde(default)]
    discount: Option<RawDiscount>,
    #[serde(default)]
    denomination_type: Option<String>,
    #[serde(default)]
    eligible_fixed_denomination: Option<Value>,
    #[serde(default)]
    eligible_range_denomination: Option<Value>,
    #[serde(default)]
    interval: Option<String>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    offer_has_code: Option<Value>,
}

impl From<RawReward> for Reward {
    fn from(raw: RawReward) -> Self {
        let kind = match raw.kind.as_str() {
            "gift_card" => RewardKind::GiftCard {
                denomination: denomination_of(
                    raw.denomination_type.as_deref(),
                    raw.eligible_fixed_denomination.as_ref(),
                    raw.eligible_range_denomination.as_ref(),
                ),
            },
            "membership" => RewardKind::Membership {
                interval: raw.interval.filter(|i| !i.is_empty()),
                amount: raw.amount.as_ref().and_then(minor_units),
            },
            "offer" => RewardKind::Offer { has_code: flag(raw.offer_has_code.as_ref()) },
            _ => RewardKind::Other(raw.kind.clone()),
        };

        let categories = [raw.categories, raw.category]
            .into_iter()
            .flatten()
            .find(|list| !list.is_empty())
            .unwrap_or_default();

        let discount = raw.discount.and_then(|d| {
            let kind = d.kind.filter(|k| !k.is_empty())?;
            let value = [d.value, d.discount_value]
                .iter()
                .flatten()
                .filter_map(minor_units)
                .find(|v| *v != 0)
                .unwrap_or(0);
            Some(Discount { kind, value })
        });

        Self {
            id: raw.id,
            status: RewardStatus::from(raw.status.unwrap_or_default()),
            currency: raw.currency.unwrap_or_default(),
            display: raw.display_parameters,
            brand: raw.brand,
            discount,
            validity: Validity {
                start: raw.start_date.as_ref().and_then(minor_units),
                end: raw.end_date.as_ref().and_then(minor_units),
            },
            featured: raw.featured.unwrap_or(false),
            categories,
            kind,
        }
    }
}

/// Reads an integer carried either as a JSON number or a numeric string.
fn minor_units(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(round_to_i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(round_to_i64))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, reason = "saturating float to integer conversion")]
fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}

fn amounts(value: Option<&Value>) -> Vec<i64> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(minor_units).collect(),
        _ => Vec::new(),
    }
}

fn denomination_of(mode: Option<&str>, fixed: Option<&Value>, range: Option<&Value>) -> Denomination {
    match mode {
        Some("fixed") => {
            let values = amounts(fixed);
            if values.is_empty() { Denomination::Unspecified } else { Denomination::Fixed(values) }
        }
        Some("range") => match amounts(range).as_slice() {
            [min, max, ..] => Denomination::Range { min: *min, max: *max },
            _ => Denomination::Unspecified,
        },
        _ => Denomination::Unspecified,
    }
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Catalog filters
// ---------------------------------------------------------------------------

/// Optional catalog filters and pagination.
///
/// Only present, non-empty parameters reach the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardsQuery {
    /// Cursor returned as `next_page_id` by the previous page.
    #[serde(deserialize_with = "lenient_string")]
    pub page_id: Option<String>,
    /// Rewards per page.
    #[serde(deserialize_with = "lenient_string")]
    pub count: Option<String>,
    /// Brand name filter.
    #[serde(deserialize_with = "lenient_string")]
    pub brand_name: Option<String>,
    /// Category filter.
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// Reward type filter.
    #[serde(rename = "type")]
    pub reward_type: Option<RewardType>,
    /// Featured-only filter. `false` is sent as an explicit filter value.
    pub featured: Option<bool>,
    /// Minimum price.
    #[serde(deserialize_with = "lenient_string")]
    pub min_price: Option<String>,
    /// Maximum price.
    #[serde(deserialize_with = "lenient_string")]
    pub max_price: Option<String>,
    /// Exact denomination in minor units.
    #[serde(deserialize_with = "lenient_string")]
    pub denomination: Option<String>,
    /// Sort key.
    pub sort_by: Option<SortBy>,
    /// Only rewards expiring within this many days.
    pub expiry_by: Option<u32>,
}

impl RewardsQuery {
    /// Returns the query pairs for every present, non-empty parameter.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("page_id", self.page_id.clone()),
            ("count", self.count.clone()),
            ("brand_name", self.brand_name.clone()),
            ("category", self.category.clone()),
            ("type", self.reward_type.map(|t| t.as_str().to_owned())),
            ("featured", self.featured.map(|f| f.to_string())),
            ("min_price", self.min_price.clone()),
            ("max_price", self.max_price.clone()),
            ("denomination", self.denomination.clone()),
            ("sort_by", self.sort_by.map(|s| s.as_str().to_owned())),
            ("expiry_by", self.expiry_by.map(|d| d.to_string())),
        ];

        text.into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect()
    }
}

/// Accepts a string, a number or a boolean and keeps its textual form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected a string, found {other}"))),
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Optional customer contact block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Customer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Customer email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Customer phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<u64>,
}

impl CustomerDetails {
    /// Builds the block only when at least one field is present.
    #[must_use]
    pub fn from_parts(name: Option<String>, email: Option<String>, contact: Option<u64>) -> Option<Self> {
        let name = name.filter(|n| !n.is_empty());
        let email = email.filter(|e| !e.is_empty());
        (name.is_some() || email.is_some() || contact.is_some()).then_some(Self { name, email, contact })
    }
}

/// Order line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReward {
    /// Reward identifier from the catalog.
    #[serde(default)]
    pub id: String,
    /// Denomination in minor units; required by the upstream for gift cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denomination: Option<i64>,
    /// Membership interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Quantity, 1 to 4.
    #[serde(default)]
    pub quantity: i64,
}

/// Create-order request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Caller-supplied tracking key.
    pub reference_no: String,
    /// Line items.
    pub rewards: Vec<OrderReward>,
    /// Optional customer contact block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerDetails>,
}

/// Voucher issued for a fulfilled order item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Voucher code.
    #[serde(default)]
    pub code: String,
    /// Voucher PIN.
    #[serde(default)]
    pub pin: String,
    /// Expiry as unix seconds.
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub validity: Option<i64>,
}

/// Order line as reported by the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Reward identifier.
    pub reward_id: String,
    /// Reward type as reported.
    #[serde(default)]
    pub reward_type: String,
    /// Denomination in minor units.
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub denomination: Option<i64>,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Ordered quantity.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    /// Per-line status.
    pub status: ItemStatus,
    /// Failure reason for failed lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_reason: Option<String>,
    /// Membership interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Creation time, unix seconds.
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Last update time, unix seconds.
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    /// Issued vouchers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vouchers: Vec<Voucher>,
}

/// Collection of order items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItems {
    /// Entity tag reported by the upstream (`collection`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Item count reported by the upstream.
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
    /// Order lines.
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// Order as returned by create-order and order lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order identifier.
    #[serde(default)]
    pub order_id: String,
    /// Entity tag reported by the upstream (`orders`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Echoed reference number.
    #[serde(default)]
    pub reference_no: String,
    /// Aggregate status.
    pub status: OrderStatus,
    /// Creation time, unix seconds.
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Requested amount in minor units.
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub order_amount: Option<i64>,
    /// Fulfilled amount in minor units.
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub order_success_amount: Option<i64>,
    /// Order lines.
    #[serde(default)]
    pub order: OrderItems,
}

// Order numbers arrive as numbers or numeric strings; anything else reads as absent.

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.as_ref().and_then(minor_units))
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_integer(deserializer)?.unwrap_or(0))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_integer(deserializer)?.and_then(|n| u64::try_from(n).ok()).unwrap_or(0))
}
