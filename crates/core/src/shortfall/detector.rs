//! Shortfall detection for receipt-note drafts.

use procura_shared::types::ItemKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::leftover::leftover;
use crate::fulfillment::{DraftReceiptLine, OrderLine, ReconciliationContext};

/// A draft line that receives less than what is still outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallLine {
    /// Item identity.
    pub item: ItemKey,
    /// Display name, if known.
    pub item_name: Option<String>,
    /// Ordered quantity.
    pub ordered_quantity: Decimal,
    /// Outstanding quantity before this draft.
    pub leftover_quantity: Decimal,
    /// Quantity the draft proposes to receive.
    pub proposed_received_quantity: Decimal,
    /// `max(0, leftover - proposed)`.
    pub shortfall_quantity: Decimal,
}

/// Flags draft lines that leave part of the outstanding quantity unreceived.
///
/// The ordered quantity comes from the matching order line; a draft line for
/// an item the order does not list falls back to its own echoed quantity.
/// Lines with nothing left to receive are never flagged. Over-receipt is
/// handled separately by `validate_over_received`.
#[must_use]
pub fn detect(
    order_lines: &[OrderLine],
    proposed: &[DraftReceiptLine],
    context: &ReconciliationContext,
) -> Vec<ShortfallLine> {
    proposed
        .iter()
        .filter_map(|draft| {
            let order_line = order_lines.iter().find(|line| line.item == draft.item);
            let ordered_quantity =
                order_line.map_or(draft.ordered_quantity, |line| line.ordered_quantity);
            let leftover_quantity = leftover(ordered_quantity, context.received(&draft.item));

            if leftover_quantity <= Decimal::ZERO || draft.received_quantity >= leftover_quantity {
                return None;
            }

            Some(ShortfallLine {
                item: draft.item.clone(),
                item_name: draft
                    .item_name
                    .clone()
                    .or_else(|| order_line.and_then(|line| line.item_name.clone())),
                ordered_quantity,
                leftover_quantity,
                proposed_received_quantity: draft.received_quantity,
                shortfall_quantity: leftover_quantity - draft.received_quantity,
            })
        })
        .collect()
}
