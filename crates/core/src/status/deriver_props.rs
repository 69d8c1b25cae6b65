//! Property-based tests for status derivation.

use proptest::prelude::*;
use procura_shared::types::ItemKey;
use rust_decimal::Decimal;

use super::deriver::derive_status;
use super::types::OrderFulfillmentStatus;
use crate::fulfillment::{OrderLine, ReconciliationContext};

/// Strategy for (ordered, received) pairs in whole units.
fn arb_line() -> impl Strategy<Value = (i64, i64)> {
    (0i64..50, 0i64..60)
}

fn build(rows: &[(i64, i64)]) -> (Vec<OrderLine>, ReconciliationContext) {
    let mut ctx = ReconciliationContext::default();
    let lines = rows
        .iter()
        .enumerate()
        .map(|(i, (ordered, received))| {
            let item = ItemKey::new(&format!("sku-{i}")).unwrap();
            ctx.total_received_by_item
                .insert(item.clone(), Decimal::from(*received));
            OrderLine {
                item,
                item_name: None,
                ordered_quantity: Decimal::from(*ordered),
                unit_price: Decimal::ONE,
                cost_code: None,
            }
        })
        .collect();
    (lines, ctx)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The deriver never produces Approved.
    #[test]
    fn prop_never_regresses_to_approved(rows in prop::collection::vec(arb_line(), 0..10)) {
        let (lines, ctx) = build(&rows);
        prop_assert_ne!(derive_status(&lines, &ctx, false), Some(OrderFulfillmentStatus::Approved));
    }

    /// The explicit partial flag always wins.
    #[test]
    fn prop_explicit_partial_wins(rows in prop::collection::vec(arb_line(), 0..10)) {
        let (lines, ctx) = build(&rows);
        prop_assert_eq!(
            derive_status(&lines, &ctx, true),
            Some(OrderFulfillmentStatus::PartiallyReceived)
        );
    }

    /// Completed exactly when every line is received in full.
    #[test]
    fn prop_completed_iff_all_received(rows in prop::collection::vec(arb_line(), 1..10)) {
        let (lines, ctx) = build(&rows);
        let all_received = rows.iter().all(|(ordered, received)| received >= ordered);
        prop_assert_eq!(
            derive_status(&lines, &ctx, false) == Some(OrderFulfillmentStatus::Completed),
            all_received
        );
    }
}
