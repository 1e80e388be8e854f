//! Order receipt narrative.

use std::fmt::Write as _;

use super::{CURRENCY_SYMBOL, NOT_AVAILABLE, format_amount, format_date};
use crate::mcp::models::{OrderItem, OrderResponse};

/// Line rendered when the order carries no items.
pub const NO_ITEMS: &str = "No order items found in the response.";

/// Renders an order as a receipt.
///
/// The aggregate status is printed exactly as the server reported it.
#[must_use]
pub fn format_order_receipt(order: &OrderResponse) -> String {
    let mut out = String::new();

    if !order.order_id.is_empty() {
        let _ = writeln!(out, "Order ID: {}", order.order_id);
    }
    let _ = writeln!(out, "Reference No: {}", order.reference_no);
    let _ = writeln!(out, "Status: {}", order.status);
    let amount = order
        .order_success_amount
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |a| format!("{CURRENCY_SYMBOL}{}", format_amount(a)));
    let _ = writeln!(out, "Amount: {amount}\n");

    let _ = writeln!(out, "Order Items ({}):\n", order.order.count);

    if order.order.order_items.is_empty() {
        let _ = writeln!(out, "{NO_ITEMS}");
    }

    for (index, item) in order.order.order_items.iter().enumerate() {
        push_item(&mut out, index + 1, item);
    }

    out
}

fn push_item(out: &mut String, number: usize, item: &OrderItem) {
    let _ = writeln!(out, "Item {number}:");
    let _ = writeln!(out, "- Reward ID: {}", item.reward_id);
    let _ = writeln!(out, "- Type: {}", item.reward_type);
    let _ = writeln!(out, "- Quantity: {}", item.quantity);
    let _ = writeln!(out, "- Status: {}", item.status);

    if let Some(denomination) = item.denomination.filter(|d| *d != 0) {
        let _ = writeln!(out, "- Denomination: {CURRENCY_SYMBOL}{}", format_amount(denomination));
    }
    if let Some(interval) = item.interval.as_deref().filter(|i| !i.is_empty()) {
        let _ = writeln!(out, "- Interval: {interval}");
    }
    if let Some(reason) = item.failed_reason.as_deref().filter(|r| !r.is_empty()) {
        let _ = writeln!(out, "- Failure Reason: {reason}");
    }

    if !item.vouchers.is_empty() {
        let _ = writeln!(out, "- Vouchers:");
        for (index, voucher) in item.vouchers.iter().enumerate() {
            let _ = writeln!(out, "  Voucher {}:", index + 1);
            let _ = writeln!(out, "  - Code: {}", voucher.code);
            let _ = writeln!(out, "  - PIN: {}", voucher.pin);
            let _ = writeln!(out, "  - Valid until: {}", format_date(voucher.validity));
        }
    }

    out.push('\n');
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn order(value: Value) -> OrderResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_receipt_with_vouchers() {
        let text = format_order_receipt(&order(json!({
            "order_id": "order-1", "reference_no": "ref-1", "status": "success",
            "order_success_amount": 50000,
            "order": {"count": 1, "order_items": [{
                "reward_id": "r1", "reward_type": "gift_card", "quantity": 2,
                "status": "success", "denomination": 25000,
                "vouchers": [{"code": "ABC", "pin": "1234", "validity": 1767225600}],
            }]},
        })));

        assert!(text.starts_with(
            "Order ID: order-1\nReference No: ref-1\nStatus: success\nAmount: ₹500.00\n\nOrder Items (1):\n\nItem 1:\n"
        ));
        assert!(text.contains("- Quantity: 2\n- Status: success\n- Denomination: ₹250.00\n- Vouchers:\n"));
        assert!(text.contains("  Voucher 1:\n  - Code: ABC\n  - PIN: 1234\n  - Valid until: "));
        assert!(!text.contains("Failure Reason"));
    }

    #[test]
    fn test_receipt_status_is_verbatim() {
        let text = format_order_receipt(&order(json!({
            "order_id": "o", "reference_no": "r", "status": "partial_success",
            "order": {"count": 2, "order_items": [
                {"reward_id": "a", "reward_type": "offer", "quantity": 1, "status": "success"},
                {"reward_id": "b", "reward_type": "membership", "quantity": 1, "status": "failed",
                 "interval": "Monthly", "failed_reason": "Out of stock"},
            ]},
        })));

        assert!(text.contains("Status: partial_success\n"));
        assert!(text.contains("Item 2:\n- Reward ID: b\n- Type: membership\n- Quantity: 1\n- Status: failed\n- Interval: Monthly\n- Failure Reason: Out of stock\n"));
    }

    #[test]
    fn test_receipt_without_items() {
        let text = format_order_receipt(&order(json!({
            "order_id": "", "reference_no": "r", "status": "failure", "order": {"count": 0},
        })));

        assert!(text.starts_with("Reference No: r\n"));
        assert!(text.contains("Amount: N/A\n"));
        assert!(text.ends_with("Order Items (0):\n\nNo order items found in the response.\n"));
    }
}
