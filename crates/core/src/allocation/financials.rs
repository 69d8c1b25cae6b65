//! Receipt-note financial totals.
//!
//! A goods-receipt note carries header-level freight, packing, duties and
//! taxes. The grand total is spread back over the item lines in proportion
//! to their subtotals, so each stored line carries its landed cost.

use procura_shared::ProrationMode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allocator::{Allocator, ProrationItem};

/// Header-level charges of a receipt note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCharges {
    /// Freight.
    #[serde(default)]
    pub freight: Decimal,
    /// Packing.
    #[serde(default)]
    pub packing: Decimal,
    /// Custom duties.
    #[serde(default)]
    pub custom_duties: Decimal,
    /// Any other charge.
    #[serde(default)]
    pub other: Decimal,
}

impl NoteCharges {
    /// Sum of every charge, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.freight
            .saturating_add(self.packing)
            .saturating_add(self.custom_duties)
            .saturating_add(self.other)
    }
}

/// Header-level taxes of a receipt note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTaxes {
    /// Tax rates in percent (e.g. `8.25`), each applied to the same base.
    #[serde(default)]
    pub rates: Vec<Decimal>,
    /// Whether charges are part of the taxable base.
    #[serde(default)]
    pub taxable_charges: bool,
}

/// A received line priced for the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialLine {
    /// Line identity.
    pub id: String,
    /// Received quantity.
    pub received_quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
}

/// Financial figures of one line after proration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFinancials {
    /// Line identity.
    pub id: String,
    /// `received_quantity × unit_price`.
    pub subtotal: Decimal,
    /// The line's share of the grand total; equals `subtotal` when no proration happened.
    pub allocated_total: Decimal,
}

/// Totals of a receipt note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFinancials {
    /// Per-line figures, in input order.
    pub lines: Vec<LineFinancials>,
    /// Σ line subtotals.
    pub item_total: Decimal,
    /// Σ charges.
    pub charges_total: Decimal,
    /// Σ taxes.
    pub tax_total: Decimal,
    /// `item_total + charges_total + tax_total`.
    pub grand_total: Decimal,
    /// Whether the grand total was spread over the lines.
    pub prorated: bool,
}

impl NoteFinancials {
    /// Computes note totals and prorates the grand total across lines.
    ///
    /// Figures that do not fit in a `Decimal` saturate at its bounds; if the
    /// proration itself overflows, lines keep their subtotals.
    #[must_use]
    pub fn compute(
        lines: &[FinancialLine],
        charges: &NoteCharges,
        taxes: &NoteTaxes,
        mode: ProrationMode,
        decimal_places: u32,
    ) -> Self {
        let subtotals: Vec<ProrationItem> = lines
            .iter()
            .map(|line| {
                ProrationItem::new(
                    line.id.clone(),
                    line.received_quantity.saturating_mul(line.unit_price),
                )
            })
            .collect();

        let item_total = subtotals
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal));
        let charges_total = charges.total();
        let tax_base = if taxes.taxable_charges {
            item_total.saturating_add(charges_total)
        } else {
            item_total
        };
        let tax_total = taxes.rates.iter().fold(Decimal::ZERO, |acc, rate| {
            acc.saturating_add(tax_base.saturating_mul(*rate) / Decimal::ONE_HUNDRED)
        });
        let grand_total = item_total
            .saturating_add(charges_total)
            .saturating_add(tax_total);

        let allocations = Allocator::allocate_with(mode, decimal_places, &subtotals, grand_total);
        let prorated = allocations.is_some();

        let lines = match allocations {
            Some(allocations) => allocations
                .into_iter()
                .map(|a| LineFinancials {
                    id: a.id,
                    subtotal: a.subtotal,
                    allocated_total: a.allocated_amount,
                })
                .collect(),
            None => subtotals
                .into_iter()
                .map(|item| LineFinancials {
                    id: item.id,
                    subtotal: item.subtotal,
                    allocated_total: item.subtotal,
                })
                .collect(),
        };

        Self {
            lines,
            item_total,
            charges_total,
            tax_total,
            grand_total,
            prorated,
        }
    }
}
