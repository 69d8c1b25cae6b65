//! Holdback (retention) breakdown per cost code.
//!
//! A supplier invoice withholds a retention amount; part of it is later
//! released. Both amounts are spread over the order's cost codes in
//! proportion to the cost codes' subtotals.

use procura_shared::ProrationMode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allocator::{Allocator, ProrationItem};
use crate::error::ReconciliationError;

/// A line contributing to a cost code's subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCodeLine {
    /// Free-text cost code, matched trimmed and case-insensitively.
    pub cost_code: String,
    /// Line subtotal.
    pub subtotal: Decimal,
}

/// Holdback and release shares of one cost code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCodeRelease {
    /// Cost code as first written on the input lines (trimmed).
    pub cost_code: String,
    /// Merged subtotal of the cost code.
    pub subtotal: Decimal,
    /// Share of the holdback total.
    pub holdback_share: Decimal,
    /// Share of the release amount.
    pub release_share: Decimal,
    /// `holdback_share - release_share`.
    pub remaining: Decimal,
}

/// Holdback breakdown across cost codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldbackBreakdown {
    /// Total withheld.
    pub holdback_total: Decimal,
    /// Amount released.
    pub release_amount: Decimal,
    /// Per cost code, in order of first appearance.
    pub cost_codes: Vec<CostCodeRelease>,
}

impl HoldbackBreakdown {
    /// Computes the breakdown with exact proration.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if either amount is negative and
    /// `ReleaseExceedsHoldback` if more is released than was withheld.
    pub fn compute(
        lines: &[CostCodeLine],
        holdback_total: Decimal,
        release_amount: Decimal,
    ) -> Result<Self, ReconciliationError> {
        Self::compute_with(ProrationMode::Exact, 2, lines, holdback_total, release_amount)
    }

    /// Computes the breakdown with the configured proration strategy.
    ///
    /// # Errors
    ///
    /// Same as [`HoldbackBreakdown::compute`].
    pub fn compute_with(
        mode: ProrationMode,
        decimal_places: u32,
        lines: &[CostCodeLine],
        holdback_total: Decimal,
        release_amount: Decimal,
    ) -> Result<Self, ReconciliationError> {
        if holdback_total.is_sign_negative() || release_amount.is_sign_negative() {
            return Err(ReconciliationError::NegativeAmount);
        }
        if release_amount > holdback_total {
            return Err(ReconciliationError::ReleaseExceedsHoldback {
                release: release_amount,
                holdback: holdback_total,
            });
        }

        let merged = merge_cost_codes(lines);
        let holdback = Allocator::allocate_with(mode, decimal_places, &merged, holdback_total);
        let release = Allocator::allocate_with(mode, decimal_places, &merged, release_amount);

        let cost_codes = merged
            .iter()
            .enumerate()
            .map(|(i, item)| {
                // No positive base or an overflowing share: nothing is attributed
                let holdback_share = holdback
                    .as_ref()
                    .map_or(Decimal::ZERO, |a| a[i].allocated_amount);
                let release_share = release
                    .as_ref()
                    .map_or(Decimal::ZERO, |a| a[i].allocated_amount);
                CostCodeRelease {
                    cost_code: item.id.clone(),
                    subtotal: item.subtotal,
                    holdback_share,
                    release_share,
                    remaining: holdback_share.saturating_sub(release_share),
                }
            })
            .collect();

        Ok(Self {
            holdback_total,
            release_amount,
            cost_codes,
        })
    }

    /// Σ remaining across cost codes.
    #[must_use]
    pub fn remaining_total(&self) -> Decimal {
        self.cost_codes
            .iter()
            .fold(Decimal::ZERO, |acc, c| acc.saturating_add(c.remaining))
    }
}

/// Merges lines sharing a cost code, keeping the order of first appearance.
fn merge_cost_codes(lines: &[CostCodeLine]) -> Vec<ProrationItem> {
    let mut merged: Vec<(String, ProrationItem)> = Vec::new();
    for line in lines {
        let code = line.cost_code.trim();
        let key = code.to_lowercase();
        match merged.iter_mut().find(|(k, _)| *k == key) {
            Some((_, item)) => item.subtotal = item.subtotal.saturating_add(line.subtotal),
            None => merged.push((key, ProrationItem::new(code, line.subtotal))),
        }
    }
    merged.into_iter().map(|(_, item)| item).collect()
}
