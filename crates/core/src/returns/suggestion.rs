//! Prefilled return-note lines for uncovered shortfall.

use std::collections::BTreeMap;

use procura_shared::types::ItemKey;
use rust_decimal::Decimal;

use crate::fulfillment::{DraftReturnLine, ReconciliationContext};
use crate::shortfall::ShortfallLine;

/// Builds return-note lines for the remaining shortfall.
///
/// Each line is capped at what `context` still allows to be returned for its
/// item, so the suggestion always passes return-note validation against the
/// same history. Lines for one item share that cap; lines left with nothing to
/// return are dropped.
#[must_use]
pub fn suggest_return_lines(
    remaining: &[ShortfallLine],
    context: &ReconciliationContext,
) -> Vec<DraftReturnLine> {
    let mut returnable: BTreeMap<&ItemKey, Decimal> = BTreeMap::new();
    remaining
        .iter()
        .filter_map(|line| {
            let left = returnable
                .entry(&line.item)
                .or_insert_with(|| context.returnable(&line.item));
            let return_quantity = line.shortfall_quantity.min(*left);
            if return_quantity <= Decimal::ZERO {
                return None;
            }
            *left -= return_quantity;
            Some(DraftReturnLine {
                item: line.item.clone(),
                item_name: line.item_name.clone(),
                return_quantity,
            })
        })
        .collect()
}
