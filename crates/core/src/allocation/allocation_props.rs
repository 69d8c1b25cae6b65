//! Property-based tests for proration.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocator::{Allocator, ProrationItem};

/// Strategy for a positive amount with 2 decimal places (0.01 to 100,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a list of non-negative subtotals with at least one positive entry.
fn arb_items() -> impl Strategy<Value = Vec<ProrationItem>> {
    (arb_amount(), prop::collection::vec(0i64..1_000_000i64, 0..8)).prop_map(|(first, rest)| {
        std::iter::once(first)
            .chain(rest.into_iter().map(|cents| Decimal::new(cents, 2)))
            .enumerate()
            .map(|(i, subtotal)| ProrationItem::new(format!("item-{i}"), subtotal))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Exact allocations sum to the total within a 1e-6 relative bound.
    #[test]
    fn prop_allocate_sums_to_total(items in arb_items(), total in arb_amount()) {
        let result = Allocator::allocate(&items, total).unwrap();
        let sum: Decimal = result.iter().map(|a| a.allocated_amount).sum();
        let tolerance = total * Decimal::new(1, 6);
        prop_assert!((sum - total).abs() <= tolerance, "sum {} vs total {}", sum, total);
    }

    /// Rounded allocations sum exactly to the total.
    #[test]
    fn prop_allocate_rounded_sums_exactly(items in arb_items(), total in arb_amount()) {
        let result = Allocator::allocate_rounded(&items, total, 2).unwrap();
        let sum: Decimal = result.iter().map(|a| a.allocated_amount).sum();
        prop_assert_eq!(sum, total);
    }

    /// Rounded allocations stay within one unit of the exact share.
    #[test]
    fn prop_allocate_rounded_close_to_exact(items in arb_items(), total in arb_amount()) {
        let exact = Allocator::allocate(&items, total).unwrap();
        let rounded = Allocator::allocate_rounded(&items, total, 2).unwrap();
        for (e, r) in exact.iter().zip(rounded.iter()) {
            prop_assert!((e.allocated_amount - r.allocated_amount).abs() < Decimal::new(1, 2));
        }
    }

    /// Allocation preserves item order and identity.
    #[test]
    fn prop_allocate_preserves_order(items in arb_items(), total in arb_amount()) {
        let result = Allocator::allocate(&items, total).unwrap();
        prop_assert_eq!(result.len(), items.len());
        for (item, allocation) in items.iter().zip(result.iter()) {
            prop_assert_eq!(&item.id, &allocation.id);
            prop_assert_eq!(item.subtotal, allocation.subtotal);
        }
    }
}
