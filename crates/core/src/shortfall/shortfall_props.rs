//! Property-based tests for the receipt-note quantity checks.

use proptest::prelude::*;
use procura_shared::types::{ItemKey, NoteId, OrderId};
use rust_decimal::Decimal;

use super::coverage::remaining_shortfall;
use super::detector::detect;
use super::leftover::leftovers;
use super::over_received::validate_over_received;
use crate::fulfillment::{
    DraftReceiptLine, Lifecycle, OrderLine, OrderRef, ReconciliationContext, ReturnRecord,
};

/// Strategy for a non-negative quantity with two decimal places.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn key(i: usize) -> ItemKey {
    ItemKey::new(&format!("sku-{i}")).unwrap()
}

fn order_line(i: usize, ordered: Decimal) -> OrderLine {
    OrderLine {
        item: key(i),
        item_name: None,
        ordered_quantity: ordered,
        unit_price: Decimal::ONE,
        cost_code: None,
    }
}

fn draft(i: usize, ordered: Decimal, received: Decimal) -> DraftReceiptLine {
    DraftReceiptLine {
        item: key(i),
        item_name: None,
        ordered_quantity: ordered,
        received_quantity: received,
        unit_price: Decimal::ONE,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Σ leftover ≤ Σ ordered for any order and any history.
    #[test]
    fn prop_leftover_never_exceeds_ordered(
        rows in prop::collection::vec((arb_quantity(), arb_quantity()), 0..20),
    ) {
        let lines: Vec<OrderLine> = rows
            .iter()
            .enumerate()
            .map(|(i, (ordered, _))| order_line(i, *ordered))
            .collect();
        let mut ctx = ReconciliationContext::default();
        for (i, (_, received)) in rows.iter().enumerate() {
            ctx.total_received_by_item.insert(key(i), *received);
        }

        let result = leftovers(&lines, &ctx);
        let total_leftover: Decimal = result.iter().map(|l| l.leftover_quantity).sum();
        let total_ordered: Decimal = lines.iter().map(|l| l.ordered_quantity).sum();
        prop_assert!(total_leftover <= total_ordered);
        for line in &result {
            prop_assert!(line.leftover_quantity >= Decimal::ZERO);
        }
    }

    /// Zero-ordered lines are never flagged as over-received.
    #[test]
    fn prop_zero_ordered_never_over_received(received in arb_quantity()) {
        let flagged = validate_over_received(&[draft(0, Decimal::ZERO, received)]);
        prop_assert!(flagged.is_empty());
    }

    /// Flagged over-receipt is exactly received - ordered.
    #[test]
    fn prop_over_received_amount(ordered in arb_quantity(), received in arb_quantity()) {
        let flagged = validate_over_received(&[draft(0, ordered, received)]);
        if ordered > Decimal::ZERO && received > ordered {
            prop_assert_eq!(flagged.len(), 1);
            prop_assert_eq!(flagged[0].over_received_quantity, received - ordered);
        } else {
            prop_assert!(flagged.is_empty());
        }
    }

    /// Shortfall is always strictly positive and never exceeds leftover.
    #[test]
    fn prop_shortfall_bounded_by_leftover(
        ordered in arb_quantity(),
        prior in arb_quantity(),
        proposed in arb_quantity(),
    ) {
        let mut ctx = ReconciliationContext::default();
        ctx.total_received_by_item.insert(key(0), prior);

        let result = detect(&[order_line(0, ordered)], &[draft(0, ordered, proposed)], &ctx);
        for line in &result {
            prop_assert!(line.shortfall_quantity > Decimal::ZERO);
            prop_assert!(line.shortfall_quantity <= line.leftover_quantity);
            prop_assert_eq!(line.shortfall_quantity, line.leftover_quantity - proposed);
        }
    }

    /// Coverage resolution is idempotent and never reports a negative remainder.
    #[test]
    fn prop_coverage_idempotent(
        ordered in arb_quantity(),
        proposed in arb_quantity(),
        returned in prop::collection::vec(arb_quantity(), 0..5),
    ) {
        let order = OrderRef::purchase_order(OrderId::new());
        let ctx = ReconciliationContext::default();
        let shortfall = detect(&[order_line(0, ordered)], &[draft(0, ordered, proposed)], &ctx);
        let returns: Vec<ReturnRecord> = returned
            .iter()
            .map(|qty| ReturnRecord {
                note: Some(NoteId::new()),
                order,
                item: key(0),
                return_quantity: *qty,
                lifecycle: Lifecycle::Active,
            })
            .collect();

        let first = remaining_shortfall(&order, &shortfall, &returns);
        let second = remaining_shortfall(&order, &shortfall, &returns);
        prop_assert_eq!(&first, &second);
        for line in &first {
            prop_assert!(line.shortfall_quantity > Decimal::ZERO);
        }
        prop_assert_eq!(remaining_shortfall(&order, &shortfall, &[]), shortfall);
    }
}
