//! Fixed-width reward table and its machine-readable counterpart.

use std::fmt::Write as _;

use serde::Serialize;

use super::{CURRENCY_SYMBOL, NOT_AVAILABLE, format_amount, format_whole_amount, truncate};
use crate::mcp::models::{Denomination, Reward, RewardKind};

/// Text rendered instead of a table for an empty catalog page.
pub const EMPTY_TABLE: &str = "No rewards found";

/// Table column: header label, padded width, and longest content kept before cutting.
#[derive(Debug, Clone, Copy)]
struct Column {
    label: &'static str,
    width: usize,
    max: usize,
}

const COLUMNS: [Column; 7] = [
    Column { label: "REWARD NAME", width: 25, max: 23 },
    Column { label: "TYPE", width: 10, max: 10 },
    Column { label: "CATEGORY", width: 15, max: 13 },
    Column { label: "CHANNELS", width: 25, max: 23 },
    Column { label: "BRAND", width: 15, max: 13 },
    Column { label: "PRICE", width: 12, max: 12 },
    Column { label: "ID", width: 36, max: 36 },
];

/// Renders rewards as a fixed-width table inside a fenced code block.
///
/// Rows keep input order. Cell text longer than its column is cut with `...`, and
/// `|` or line breaks inside a cell are replaced so every row has the same cells.
#[must_use]
pub fn format_rewards_table(rewards: &[Reward]) -> String {
    if rewards.is_empty() {
        return EMPTY_TABLE.to_owned();
    }

    let mut out = String::from("```\n");
    push_row(&mut out, COLUMNS.map(|c| c.label.to_owned()));
    out.push('|');
    for column in &COLUMNS {
        out.push_str(&"-".repeat(column.width + 2));
        out.push('|');
    }

    for reward in rewards {
        out.push('\n');
        push_row(&mut out, row_cells(reward));
    }

    out.push_str("\n```");
    out
}

fn push_row(out: &mut String, cells: [String; 7]) {
    out.push('|');
    for (column, cell) in COLUMNS.iter().zip(cells) {
        let cell = sanitize(&cell);
        let cell = truncate(&cell, column.max);
        let _ = write!(out, " {cell:<width$} |", width = column.width);
    }
}

fn sanitize(cell: &str) -> String {
    cell.chars()
        .map(|c| match c {
            '|' => '/',
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect()
}

fn row_cells(reward: &Reward) -> [String; 7] {
    [
        reward.display.name.clone(),
        reward.type_name().to_owned(),
        reward.categories.first().cloned().unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        reward.display.redemption_channels.join(", "),
        reward.brand.name.clone(),
        price_cell(reward),
        reward.id.clone(),
    ]
}

/// Short price summary for the table's price column.
#[must_use]
pub fn price_cell(reward: &Reward) -> String {
    match &reward.kind {
        RewardKind::GiftCard { denomination: Denomination::Fixed(amounts) } => {
            match (amounts.iter().min(), amounts.iter().max()) {
                (Some(min), Some(max)) if amounts.len() > 1 => format!(
                    "{CURRENCY_SYMBOL}{}-{}",
                    format_whole_amount(*min),
                    format_whole_amount(*max)
                ),
                (Some(only), _) => format!("{CURRENCY_SYMBOL}{}", format_whole_amount(*only)),
                _ => NOT_AVAILABLE.to_owned(),
            }
        }
        RewardKind::GiftCard { denomination: Denomination::Range { min, max } } => format!(
            "{CURRENCY_SYMBOL}{}-{}",
            format_whole_amount(*min),
            format_whole_amount(*max)
        ),
        RewardKind::Membership { interval, amount: Some(amount) } if *amount != 0 => {
            let unit = interval
                .as_deref()
                .and_then(|i| i.chars().next())
                .map_or_else(|| "m".to_owned(), |c| c.to_lowercase().collect());
            format!("{CURRENCY_SYMBOL}{}/{unit}", format_whole_amount(*amount))
        }
        RewardKind::Offer { .. } => match reward.discount.as_ref() {
            Some(d) if d.value != 0 && d.kind == "percentage" => format!("{}% off", d.value),
            Some(d) if d.value != 0 && d.kind == "fixed" => {
                format!("{CURRENCY_SYMBOL}{} off", format_whole_amount(d.value))
            }
            _ => NOT_AVAILABLE.to_owned(),
        },
        RewardKind::GiftCard { denomination: Denomination::Unspecified }
        | RewardKind::Membership { .. }
        | RewardKind::Other(_) => NOT_AVAILABLE.to_owned(),
    }
}

/// Column labels of the machine-readable table.
pub const TABLE_COLUMN_LABELS: [&str; 7] =
    ["Reward Name", "Type", "Category", "Channels", "Brand", "Denomination", "ID"];

/// Longest reward name kept in the machine-readable table.
const TABLE_NAME_LIMIT: usize = 50;

/// Machine-readable reward table for clients that render tables natively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    /// Always `table`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Table title.
    pub title: String,
    /// Column labels.
    pub column_labels: Vec<&'static str>,
    /// One row per reward, in input order.
    pub rows: Vec<Vec<String>>,
}

/// Builds the machine-readable table for a page of rewards.
#[must_use]
pub fn rewards_table_data(program_id: &str, rewards: &[Reward]) -> TableData {
    let rows = rewards
        .iter()
        .map(|reward| {
            let name = &reward.display.name;
            let mut shown: String = name.chars().take(TABLE_NAME_LIMIT).collect();
            if name.chars().count() > TABLE_NAME_LIMIT {
                shown.push_str("...");
            }

            let denomination = representative_amount(reward)
                .map_or_else(|| "Variable".to_owned(), |a| format!("{CURRENCY_SYMBOL}{}", format_amount(a)));

            vec![
                shown,
                reward.type_name().to_owned(),
                reward.categories.first().cloned().unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
                reward.display.redemption_channels.join(", "),
                reward.brand.name.clone(),
                denomination,
                reward.id.clone(),
            ]
        })
        .collect();

    TableData {
        kind: "table",
        title: format!("Rewards for Program {program_id}"),
        column_labels: TABLE_COLUMN_LABELS.to_vec(),
        rows,
    }
}

/// First orderable amount of a reward in minor units, if it has a non-zero one.
fn representative_amount(reward: &Reward) -> Option<i64> {
    let amount = match &reward.kind {
        RewardKind::GiftCard { denomination: Denomination::Fixed(amounts) } => amounts.first().copied(),
        RewardKind::GiftCard { denomination: Denomination::Range { min, .. } } => Some(*min),
        RewardKind::GiftCard { denomination: Denomination::Unspecified } => None,
        RewardKind::Membership { amount, .. } => *amount,
        RewardKind::Offer { .. } => reward.discount.as_ref().map(|d| d.value),
        RewardKind::Other(_) => None,
    };
    amount.filter(|a| *a != 0)
}
