//! Reconciliation service result types.

use procura_shared::types::CorporationId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fulfillment::{DraftReturnLine, OrderRef, ReconciliationContext};
use crate::returns::suggest_return_lines;
use crate::shortfall::{LeftoverLine, OverReceivedLine, ShortfallLine};
use crate::status::OrderFulfillmentStatus;

/// Evaluation of a receipt-note draft against its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptEvaluation {
    /// Order the draft is received against.
    pub order: OrderRef,
    /// History totals, excluding the note being edited.
    pub context: ReconciliationContext,
    /// Outstanding quantity per order line before the draft.
    pub leftovers: Vec<LeftoverLine>,
    /// Draft lines receiving less than what is outstanding.
    pub shortfall: Vec<ShortfallLine>,
    /// Shortfall not yet covered by return notes.
    pub remaining_shortfall: Vec<ShortfallLine>,
    /// Draft lines receiving more than was ordered. A non-empty list blocks the save.
    pub over_received: Vec<OverReceivedLine>,
    /// History totals as if the draft were saved.
    pub projected_context: ReconciliationContext,
    /// Status derived as if the draft were saved. `None` leaves the stored status as is.
    pub projected_status: Option<OrderFulfillmentStatus>,
}

impl ReceiptEvaluation {
    /// Returns true if the draft may be saved.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.over_received.is_empty()
    }

    /// Returns true if part of the shortfall still needs a return note.
    #[must_use]
    pub fn needs_return_note(&self) -> bool {
        !self.remaining_shortfall.is_empty()
    }

    /// Return-note lines prefilled with the uncovered shortfall, capped at
    /// what is returnable once the draft is saved.
    #[must_use]
    pub fn suggested_returns(&self) -> Vec<DraftReturnLine> {
        suggest_return_lines(&self.remaining_shortfall, &self.projected_context)
    }

    /// Rounds every reported quantity to `scale` decimal places.
    pub(crate) fn round_quantities(&mut self, scale: u32) {
        let round = |q: &mut Decimal| *q = q.round_dp(scale);

        for context in [&mut self.context, &mut self.projected_context] {
            context
                .total_received_by_item
                .values_mut()
                .chain(context.total_returned_by_item.values_mut())
                .for_each(round);
        }
        for line in &mut self.leftovers {
            round(&mut line.ordered_quantity);
            round(&mut line.total_received);
            round(&mut line.leftover_quantity);
        }
        for line in self.shortfall.iter_mut().chain(self.remaining_shortfall.iter_mut()) {
            round(&mut line.ordered_quantity);
            round(&mut line.leftover_quantity);
            round(&mut line.proposed_received_quantity);
            round(&mut line.shortfall_quantity);
        }
        for line in &mut self.over_received {
            round(&mut line.ordered_quantity);
            round(&mut line.received_quantity);
            round(&mut line.over_received_quantity);
        }
    }
}

/// Outcome of a best-effort status refresh after a receipt note was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StatusRefresh {
    /// The stored status was overwritten.
    Updated {
        /// Previous status.
        from: OrderFulfillmentStatus,
        /// New status.
        to: OrderFulfillmentStatus,
    },
    /// Nothing was written.
    Unchanged {
        /// Stored status.
        status: OrderFulfillmentStatus,
    },
    /// The note's corporation differs from the order's; nothing was written.
    CorporationMismatch {
        /// Corporation owning the order.
        order_corporation: CorporationId,
        /// Corporation of the saved note.
        note_corporation: CorporationId,
    },
    /// Reading or writing failed; logged and swallowed.
    Failed {
        /// Error message.
        reason: String,
    },
}
