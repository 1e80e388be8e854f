use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use crate::{
    formatter::{format_amount, format_rewards_table, truncate},
    mcp::models::{Reward, RewardsQuery},
};

fn reward(name: &str, brand: &str, category: &str, channel: &str, id: &str) -> Reward {
    serde_json::from_value(json!({
        "id": id,
        "type": "offer",
        "category": [category],
        "display_parameters": {"name": name, "redemption_channels": [channel]},
        "brand": {"name": brand},
    }))
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_format_amount_is_hundredth(amount in -1_000_000_000_000i64..1_000_000_000_000) {
        let rendered = format_amount(amount);
        let parsed: Decimal = rendered.parse().unwrap();

        prop_assert_eq!(parsed, Decimal::new(amount, 2));
        prop_assert_eq!(rendered.split('.').nth(1).map(str::len), Some(2));
    }

    #[test]
    fn test_truncate_never_exceeds_width(value in ".{0,80}", max in 3usize..60) {
        let cut = truncate(&value, max);

        prop_assert!(cut.chars().count() <= max);
        if value.chars().count() <= max {
            prop_assert_eq!(cut.as_ref(), value.as_str());
        } else {
            prop_assert!(cut.ends_with("..."));
        }
    }

    #[test]
    fn test_table_rows_have_header_cell_count(
        rows in prop::collection::vec(
            (".{0,40}", ".{0,30}", ".{0,30}", ".{0,40}", "[a-z0-9-]{0,40}"),
            1..6,
        ),
    ) {
        let rewards: Vec<Reward> = rows
            .iter()
            .map(|(name, brand, category, channel, id)| reward(name, brand, category, channel, id))
            .collect();

        let table = format_rewards_table(&rewards);
        let lines: Vec<&str> = table.lines().collect();
        let header_cells = lines[1].matches('|').count();

        prop_assert_eq!(lines.len(), rewards.len() + 4);
        for line in &lines[2..lines.len() - 1] {
            prop_assert_eq!(line.matches('|').count(), header_cells);
        }
    }

    #[test]
    fn test_query_pairs_only_non_empty(
        page_id in proptest::option::of("[a-z0-9]{0,8}"),
        brand in proptest::option::of("[A-Za-z ]{0,8}"),
        category in proptest::option::of("[a-z]{0,8}"),
        featured in proptest::option::of(any::<bool>()),
        expiry in proptest::option::of(0u32..365),
    ) {
        let query = RewardsQuery {
            page_id: page_id.clone(),
            brand_name: brand.clone(),
            category: category.clone(),
            featured,
            expiry_by: expiry,
            ..Default::default()
        };
        let pairs = query.to_query_pairs();

        let expected = [
            ("page_id", page_id),
            ("brand_name", brand),
            ("category", category),
            ("featured", featured.map(|f| f.to_string())),
            ("expiry_by", expiry.map(|d| d.to_string())),
        ];
        for (key, value) in expected {
            let hits: Vec<&String> = pairs.iter().filter(|(k, _)| *k == key).map(|(_, v)| v).collect();
            match value.filter(|v| !v.is_empty()) {
                Some(v) => {
                    prop_assert_eq!(hits, vec![&v]);
                }
                None => {
                    prop_assert!(hits.is_empty());
                }
            }
        }
        prop_assert!(pairs.iter().all(|(_, v)| !v.is_empty()));
    }
}
