//! Return-note coverage of detected shortfall.

use rust_decimal::Decimal;

use super::detector::ShortfallLine;
use crate::fulfillment::{OrderRef, ReturnRecord, sum_returns};

/// Reduces each shortfall line by what active return notes already cover.
///
/// `remaining = max(0, shortfall - already_returned)`; fully covered lines are
/// dropped. Pure and idempotent: an empty return history yields the input
/// unchanged. Returns exceeding the shortfall never produce a negative remainder.
#[must_use]
pub fn remaining_shortfall(
    order: &OrderRef,
    shortfall: &[ShortfallLine],
    return_history: &[ReturnRecord],
) -> Vec<ShortfallLine> {
    let returned = sum_returns(order, return_history, None);

    shortfall
        .iter()
        .filter_map(|line| {
            let already_returned = returned.get(&line.item).copied().unwrap_or(Decimal::ZERO);
            let remaining = (line.shortfall_quantity - already_returned).max(Decimal::ZERO);
            (remaining > Decimal::ZERO).then(|| ShortfallLine {
                shortfall_quantity: remaining,
                ..line.clone()
            })
        })
        .collect()
}
