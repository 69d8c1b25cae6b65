//! Order status derivation after a receipt note is saved.

use procura_shared::types::CorporationId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::OrderFulfillmentStatus;
use crate::fulfillment::{OrderLine, ReconciliationContext};
use crate::shortfall::leftover;

/// Derives an order's fulfillment status from post-save receipt totals.
///
/// Rules, in order:
/// 1. `explicit_partial` forces `PartiallyReceived` (order deliberately kept open).
/// 2. Every line fully received → `Completed`.
/// 3. Any line with a receipt → `PartiallyReceived`.
/// 4. Otherwise `None`: the stored status is left as is. The deriver never
///    moves an order back to `Approved`.
///
/// An order without lines yields `None` unless `explicit_partial` is set.
#[must_use]
pub fn derive_status(
    lines: &[OrderLine],
    context: &ReconciliationContext,
    explicit_partial: bool,
) -> Option<OrderFulfillmentStatus> {
    if explicit_partial {
        return Some(OrderFulfillmentStatus::PartiallyReceived);
    }
    if lines.is_empty() {
        return None;
    }

    let all_received = lines
        .iter()
        .all(|line| leftover(line.ordered_quantity, context.received(&line.item)).is_zero());
    if all_received {
        return Some(OrderFulfillmentStatus::Completed);
    }

    let any_received = lines
        .iter()
        .any(|line| context.received(&line.item) > Decimal::ZERO);
    any_received.then_some(OrderFulfillmentStatus::PartiallyReceived)
}

/// What the caller should do with the order's stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StatusWrite {
    /// Overwrite the stored status.
    Write {
        /// Stored status.
        from: OrderFulfillmentStatus,
        /// Derived status.
        to: OrderFulfillmentStatus,
    },
    /// Nothing to write.
    Unchanged {
        /// Stored status, which stays in place.
        status: OrderFulfillmentStatus,
    },
    /// The note's corporation differs from the order's; never write across tenants.
    CorporationMismatch {
        /// Corporation owning the order.
        order_corporation: CorporationId,
        /// Corporation of the saved note.
        note_corporation: CorporationId,
    },
}

/// Decides whether a derived status may be written over the stored one.
#[must_use]
pub fn plan_status_write(
    stored: OrderFulfillmentStatus,
    derived: Option<OrderFulfillmentStatus>,
    order_corporation: CorporationId,
    note_corporation: CorporationId,
) -> StatusWrite {
    match derived {
        Some(to) if to != stored => {
            if order_corporation == note_corporation {
                StatusWrite::Write { from: stored, to }
            } else {
                StatusWrite::CorporationMismatch {
                    order_corporation,
                    note_corporation,
                }
            }
        }
        _ => StatusWrite::Unchanged { status: stored },
    }
}
