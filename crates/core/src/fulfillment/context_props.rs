//! Property-based tests for history aggregation.

use proptest::prelude::*;
use procura_shared::types::{ItemKey, NoteId, OrderId};
use rust_decimal::Decimal;

use super::context::aggregate;
use super::types::{Lifecycle, OrderRef, ReceiptRecord};

/// Strategy for a small pool of item identities, with casing noise.
fn arb_item() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("sku-a".to_string()),
        Just("SKU-A".to_string()),
        Just("sku-b".to_string()),
        Just(" Sku-C ".to_string()),
    ]
}

/// Strategy for a non-negative quantity with two decimal places.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a history row: (note index, item, quantity, active).
fn arb_row() -> impl Strategy<Value = (usize, String, Decimal, bool)> {
    (0usize..4, arb_item(), arb_quantity(), any::<bool>())
}

fn build(
    order: OrderRef,
    notes: &[NoteId],
    rows: &[(usize, String, Decimal, bool)],
) -> Vec<ReceiptRecord> {
    rows.iter()
        .map(|(note, item, qty, active)| ReceiptRecord {
            note: Some(notes[*note]),
            order,
            item: ItemKey::new(item).unwrap(),
            received_quantity: *qty,
            lifecycle: Lifecycle::from_flag(Some(*active)),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Excluding a note never increases any item's total, and leaves totals
    /// untouched for items the excluded note did not contribute to.
    #[test]
    fn prop_self_exclusion_never_increases_totals(
        rows in prop::collection::vec(arb_row(), 0..30),
        excluded in 0usize..4,
    ) {
        let order = OrderRef::purchase_order(OrderId::new());
        let notes: Vec<NoteId> = (0..4).map(|_| NoteId::new()).collect();
        let receipts = build(order, &notes, &rows);

        let with_all = aggregate(&order, &receipts, &[], None);
        let without = aggregate(&order, &receipts, &[], Some(notes[excluded]));

        for (item, total) in &with_all.total_received_by_item {
            let excluded_total = without.received(item);
            prop_assert!(excluded_total <= *total);

            let contributed = receipts.iter().any(|r| {
                r.note == Some(notes[excluded])
                    && r.lifecycle.is_active()
                    && &r.item == item
                    && r.received_quantity > Decimal::ZERO
            });
            if !contributed {
                prop_assert_eq!(excluded_total, *total);
            }
        }
    }

    /// Aggregated total equals the sum of the active rows.
    #[test]
    fn prop_total_matches_active_rows(rows in prop::collection::vec(arb_row(), 0..30)) {
        let order = OrderRef::change_order(OrderId::new());
        let notes: Vec<NoteId> = (0..4).map(|_| NoteId::new()).collect();
        let receipts = build(order, &notes, &rows);

        let ctx = aggregate(&order, &receipts, &[], None);
        let aggregated: Decimal = ctx.total_received_by_item.values().copied().sum();
        let expected: Decimal = receipts
            .iter()
            .filter(|r| r.lifecycle.is_active())
            .map(|r| r.received_quantity)
            .sum();
        prop_assert_eq!(aggregated, expected);
    }
}
