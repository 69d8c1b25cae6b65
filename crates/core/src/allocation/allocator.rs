//! Proportional allocation of an aggregate total across line items.
//!
//! Each item receives `subtotal / Σ subtotal × total`. Two strategies:
//! - `allocate` uses plain decimal arithmetic. The allocations may differ
//!   from the total by a tiny remainder, so callers must not assert exact equality.
//! - `allocate_rounded` rounds to a number of decimal places using the
//!   Largest Remainder Method, so the rounded allocations sum exactly to the
//!   rounded total:
//!   1. Calculate exact allocations
//!   2. Round each toward zero
//!   3. Calculate the remainder (total - sum of rounded)
//!   4. Give one unit to the items with the largest fractional parts

use procura_shared::ProrationMode;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Largest scale `Decimal` supports.
const MAX_SCALE: u32 = 28;

/// An item taking part in a proration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationItem {
    /// Caller-defined identity (line id, cost code, ...).
    pub id: String,
    /// Weight of the item, usually its subtotal before charges and taxes.
    pub subtotal: Decimal,
}

impl ProrationItem {
    /// Creates a proration item.
    #[must_use]
    pub fn new(id: impl Into<String>, subtotal: Decimal) -> Self {
        Self {
            id: id.into(),
            subtotal,
        }
    }
}

/// An item's share of the aggregate total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Identity of the item.
    pub id: String,
    /// Weight the share was computed from.
    pub subtotal: Decimal,
    /// Allocated share of the total.
    pub allocated_amount: Decimal,
}

/// Stateless proration allocator.
pub struct Allocator;

impl Allocator {
    /// Sum of subtotals, if positive and representable. Without a positive base
    /// proration is meaningless.
    fn positive_base(items: &[ProrationItem]) -> Option<Decimal> {
        let base = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal))?;
        (!items.is_empty() && base > Decimal::ZERO).then_some(base)
    }

    /// `subtotal × total / base`, or `None` if no evaluation order fits in a `Decimal`.
    fn share(subtotal: Decimal, total: Decimal, base: Decimal) -> Option<Decimal> {
        subtotal
            .checked_mul(total)
            .and_then(|product| product.checked_div(base))
            .or_else(|| {
                subtotal
                    .checked_div(base)
                    .and_then(|ratio| ratio.checked_mul(total))
            })
    }

    /// Allocates `total` proportionally to each item's subtotal.
    ///
    /// Returns `None`, meaning "leave the items unchanged", when the list is
    /// empty, the subtotals do not sum to a positive base, or a share overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use procura_core::allocation::{Allocator, ProrationItem};
    ///
    /// let items = vec![ProrationItem::new("a", dec!(500)), ProrationItem::new("b", dec!(600))];
    /// let result = Allocator::allocate(&items, dec!(1331)).unwrap();
    /// assert_eq!(result[0].allocated_amount, dec!(605));
    /// assert_eq!(result[1].allocated_amount, dec!(726));
    /// ```
    #[must_use]
    pub fn allocate(items: &[ProrationItem], total: Decimal) -> Option<Vec<Allocation>> {
        let base = Self::positive_base(items)?;
        items
            .iter()
            .map(|item| {
                Some(Allocation {
                    id: item.id.clone(),
                    subtotal: item.subtotal,
                    allocated_amount: Self::share(item.subtotal, total, base)?,
                })
            })
            .collect()
    }

    /// Allocates `total` proportionally, rounded with the Largest Remainder Method.
    ///
    /// For non-negative subtotals the allocations sum EXACTLY to `total`
    /// rounded to `decimal_places` (banker's rounding). Returns `None` under
    /// the same conditions as [`Allocator::allocate`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use procura_core::allocation::{Allocator, ProrationItem};
    ///
    /// let items: Vec<_> = ["a", "b", "c"]
    ///     .iter()
    ///     .map(|id| ProrationItem::new(*id, dec!(1)))
    ///     .collect();
    /// let result = Allocator::allocate_rounded(&items, dec!(100), 2).unwrap();
    /// let sum: rust_decimal::Decimal = result.iter().map(|a| a.allocated_amount).sum();
    /// assert_eq!(sum, dec!(100));
    /// ```
    #[must_use]
    pub fn allocate_rounded(
        items: &[ProrationItem],
        total: Decimal,
        decimal_places: u32,
    ) -> Option<Vec<Allocation>> {
        let base = Self::positive_base(items)?;
        let decimal_places = decimal_places.min(MAX_SCALE);
        let unit = Decimal::new(1, decimal_places);

        // Round total to target precision first, then work on its magnitude
        let total_rounded =
            total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
        let magnitude = total_rounded.abs();

        let exact: Vec<Decimal> = items
            .iter()
            .map(|item| Self::share(item.subtotal, magnitude, base))
            .collect::<Option<_>>()?;

        let mut rounded: Vec<Decimal> = exact
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
            .collect();

        let sum_rounded = rounded
            .iter()
            .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(*a))?;
        let remainder = magnitude.checked_sub(sum_rounded)?;

        let units_to_distribute = remainder
            .checked_div(unit)?
            .round_dp_with_strategy(0, RoundingStrategy::ToZero)
            .to_u64()
            .unwrap_or(0);
        let units_to_distribute = usize::try_from(units_to_distribute).unwrap_or(0);

        if units_to_distribute > 0 {
            let mut remainders: Vec<(usize, Decimal)> = exact
                .iter()
                .zip(rounded.iter())
                .enumerate()
                .map(|(i, (e, r))| (i, *e - *r))
                .collect();

            // Largest fractional remainder first; ties keep item order
            remainders.sort_by(|a, b| b.1.cmp(&a.1));

            for (idx, _) in remainders.iter().take(units_to_distribute) {
                rounded[*idx] = rounded[*idx].checked_add(unit)?;
            }
        }

        if total_rounded.is_sign_negative() {
            for amount in &mut rounded {
                *amount = -*amount;
            }
        }

        Some(
            items
                .iter()
                .zip(rounded)
                .map(|(item, allocated_amount)| Allocation {
                    id: item.id.clone(),
                    subtotal: item.subtotal,
                    allocated_amount,
                })
                .collect(),
        )
    }

    /// Allocates with the configured strategy.
    #[must_use]
    pub fn allocate_with(
        mode: ProrationMode,
        decimal_places: u32,
        items: &[ProrationItem],
        total: Decimal,
    ) -> Option<Vec<Allocation>> {
        match mode {
            ProrationMode::Exact => Self::allocate(items, total),
            ProrationMode::LargestRemainder => Self::allocate_rounded(items, total, decimal_places),
        }
    }
}
