//! Fulfillment history aggregation.
//!
//! Reduces the receipt and return history of one order to per-item totals.
//! The note currently being edited is always excluded, otherwise its own
//! draft quantities would be counted against itself.

use std::collections::BTreeMap;

use procura_shared::types::{ItemKey, NoteId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Lifecycle, OrderRef, ReceiptRecord, ReturnRecord};

/// Per-item received and returned totals for one order.
///
/// Unseen items read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationContext {
    /// Sum of active received quantities per item.
    pub total_received_by_item: BTreeMap<ItemKey, Decimal>,
    /// Sum of active returned quantities per item.
    pub total_returned_by_item: BTreeMap<ItemKey, Decimal>,
}

impl ReconciliationContext {
    /// Total received for an item.
    #[must_use]
    pub fn received(&self, item: &ItemKey) -> Decimal {
        self.total_received_by_item
            .get(item)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Total returned for an item.
    #[must_use]
    pub fn returned(&self, item: &ItemKey) -> Decimal {
        self.total_returned_by_item
            .get(item)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Quantity that can still be sent back for an item: received minus returned, floored at zero.
    #[must_use]
    pub fn returnable(&self, item: &ItemKey) -> Decimal {
        (self.received(item) - self.returned(item)).max(Decimal::ZERO)
    }

    /// Returns true if anything at all has been received for the order.
    #[must_use]
    pub fn has_receipts(&self) -> bool {
        self.total_received_by_item.values().any(|q| *q > Decimal::ZERO)
    }
}

/// A history row that can be summed per item.
trait HistoryRow {
    fn order(&self) -> &OrderRef;
    fn note(&self) -> Option<NoteId>;
    fn item(&self) -> &ItemKey;
    fn quantity(&self) -> Decimal;
    fn lifecycle(&self) -> Lifecycle;
}

impl HistoryRow for ReceiptRecord {
    fn order(&self) -> &OrderRef {
        &self.order
    }
    fn note(&self) -> Option<NoteId> {
        self.note
    }
    fn item(&self) -> &ItemKey {
        &self.item
    }
    fn quantity(&self) -> Decimal {
        self.received_quantity
    }
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

impl HistoryRow for ReturnRecord {
    fn order(&self) -> &OrderRef {
        &self.order
    }
    fn note(&self) -> Option<NoteId> {
        self.note
    }
    fn item(&self) -> &ItemKey {
        &self.item
    }
    fn quantity(&self) -> Decimal {
        self.return_quantity
    }
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

fn sum_by_item<R: HistoryRow>(
    order: &OrderRef,
    rows: &[R],
    exclude_note: Option<NoteId>,
) -> BTreeMap<ItemKey, Decimal> {
    let mut totals = BTreeMap::new();
    for row in rows {
        if !row.lifecycle().is_active() || row.order() != order {
            continue;
        }
        if exclude_note.is_some() && row.note() == exclude_note {
            continue;
        }
        *totals.entry(row.item().clone()).or_insert(Decimal::ZERO) += row.quantity();
    }
    totals
}

/// Sums active receipt lines of `order` per item, skipping `exclude_note`.
#[must_use]
pub fn sum_receipts(
    order: &OrderRef,
    receipts: &[ReceiptRecord],
    exclude_note: Option<NoteId>,
) -> BTreeMap<ItemKey, Decimal> {
    sum_by_item(order, receipts, exclude_note)
}

/// Sums active return lines of `order` per item, skipping `exclude_note`.
#[must_use]
pub fn sum_returns(
    order: &OrderRef,
    returns: &[ReturnRecord],
    exclude_note: Option<NoteId>,
) -> BTreeMap<ItemKey, Decimal> {
    sum_by_item(order, returns, exclude_note)
}

/// Builds the reconciliation context of an order from its history.
///
/// Only active records whose back-reference matches `order` (kind and id)
/// count. Records belonging to `exclude_note` are skipped even when active.
#[must_use]
pub fn aggregate(
    order: &OrderRef,
    receipts: &[ReceiptRecord],
    returns: &[ReturnRecord],
    exclude_note: Option<NoteId>,
) -> ReconciliationContext {
    ReconciliationContext {
        total_received_by_item: sum_receipts(order, receipts, exclude_note),
        total_returned_by_item: sum_returns(order, returns, exclude_note),
    }
}
