//! Fulfillment domain types.
//!
//! These are the strict, normalized shapes the engine operates on. Loosely
//! typed API payloads are converted into them by `fulfillment::raw`.

use procura_shared::types::{ItemKey, NoteId, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of order goods are received against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// Purchase order.
    PurchaseOrder,
    /// Change order.
    ChangeOrder,
}

impl OrderKind {
    /// Returns the string representation used by `receipt_type` / `return_type`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::ChangeOrder => "change_order",
        }
    }

    /// Parses a kind from a discriminator string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "purchase_order" => Some(Self::PurchaseOrder),
            "change_order" => Some(Self::ChangeOrder),
            _ => None,
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the order a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderRef {
    /// Which foreign-key column identifies the order.
    pub kind: OrderKind,
    /// Order identity.
    pub id: OrderId,
}

impl OrderRef {
    /// References a purchase order.
    #[must_use]
    pub const fn purchase_order(id: OrderId) -> Self {
        Self {
            kind: OrderKind::PurchaseOrder,
            id,
        }
    }

    /// References a change order.
    #[must_use]
    pub const fn change_order(id: OrderId) -> Self {
        Self {
            kind: OrderKind::ChangeOrder,
            id,
        }
    }

    /// Resolves the back-reference of a stored receipt or return line.
    ///
    /// The discriminator selects which column is read. When the discriminator
    /// is absent, the purchase-order column wins over the change-order column.
    /// An unknown discriminator or an empty selected column yields `None`.
    #[must_use]
    pub fn resolve(
        discriminator: Option<&str>,
        purchase_order_uuid: Option<&str>,
        change_order_uuid: Option<&str>,
    ) -> Option<Self> {
        let kind = match discriminator.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => OrderKind::parse(raw)?,
            None => {
                return OrderId::parse_lenient(purchase_order_uuid)
                    .map(Self::purchase_order)
                    .or_else(|| OrderId::parse_lenient(change_order_uuid).map(Self::change_order));
            }
        };

        match kind {
            OrderKind::PurchaseOrder => {
                OrderId::parse_lenient(purchase_order_uuid).map(Self::purchase_order)
            }
            OrderKind::ChangeOrder => {
                OrderId::parse_lenient(change_order_uuid).map(Self::change_order)
            }
        }
    }
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Soft-delete state of a historical record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Counts toward aggregation.
    #[default]
    Active,
    /// Soft-deleted; excluded from every aggregation.
    Retired,
}

impl Lifecycle {
    /// Maps an `is_active` flag. An absent flag means active.
    #[must_use]
    pub fn from_flag(is_active: Option<bool>) -> Self {
        match is_active {
            Some(false) => Self::Retired,
            _ => Self::Active,
        }
    }

    /// Returns true if the record counts toward aggregation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A line item of an approved order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Item identity, stable across receipt and return records.
    pub item: ItemKey,
    /// Display name, if known.
    pub item_name: Option<String>,
    /// Ordered quantity (≥ 0).
    pub ordered_quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
    /// Cost code the line is booked against.
    pub cost_code: Option<String>,
}

/// One line of a saved receipt note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Receipt note the line belongs to.
    pub note: Option<NoteId>,
    /// Order the note was received against.
    pub order: OrderRef,
    /// Item identity.
    pub item: ItemKey,
    /// Received quantity (≥ 0).
    pub received_quantity: Decimal,
    /// Soft-delete state.
    pub lifecycle: Lifecycle,
}

/// One line of a saved return note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// Return note the line belongs to.
    pub note: Option<NoteId>,
    /// Order the goods were originally received against.
    pub order: OrderRef,
    /// Item identity.
    pub item: ItemKey,
    /// Returned quantity (≥ 0).
    pub return_quantity: Decimal,
    /// Soft-delete state.
    pub lifecycle: Lifecycle,
}

/// A line of a receipt note that is being drafted or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftReceiptLine {
    /// Item identity.
    pub item: ItemKey,
    /// Display name, if known.
    pub item_name: Option<String>,
    /// Ordered quantity echoed from the order line.
    pub ordered_quantity: Decimal,
    /// Quantity the user proposes to receive.
    pub received_quantity: Decimal,
    /// Unit price echoed from the order line.
    pub unit_price: Decimal,
}

/// A line of a return note that is being drafted or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftReturnLine {
    /// Item identity.
    pub item: ItemKey,
    /// Display name, if known.
    pub item_name: Option<String>,
    /// Quantity to send back.
    pub return_quantity: Decimal,
}

/// Human-readable label for an item: its name, or its identity.
pub(crate) fn item_label<'a>(item: &'a ItemKey, name: Option<&'a str>) -> &'a str {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| item.as_str())
}
