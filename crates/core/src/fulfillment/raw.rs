//! Boundary DTOs for loosely-typed order and note payloads.
//!
//! The API echoes quantities as numbers, strings or `null`, identities with
//! arbitrary casing, and soft-delete flags that may be missing. Each raw row
//! is normalized exactly once into the strict types of `fulfillment::types`;
//! rows that cannot be attributed to an item or an order are dropped.

use procura_shared::types::{ItemKey, NoteId, lenient_amount, lenient_quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{
    DraftReceiptLine, DraftReturnLine, Lifecycle, OrderLine, OrderRef, ReceiptRecord,
    ReturnRecord,
};

/// Order line as returned by the order-fetch API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOrderLine {
    /// Primary item identity.
    #[serde(default)]
    pub item_uuid: Option<String>,
    /// Fallback item identity.
    #[serde(default)]
    pub base_item_uuid: Option<String>,
    /// Display name.
    #[serde(default)]
    pub item_name: Option<String>,
    /// Ordered quantity.
    #[serde(default, deserialize_with = "lenient_quantity", alias = "quantity")]
    pub ordered_quantity: Decimal,
    /// Unit price.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub unit_price: Decimal,
    /// Cost code.
    #[serde(default, alias = "cost_code_uuid")]
    pub cost_code: Option<String>,
}

impl RawOrderLine {
    /// Normalizes the line. Returns `None` when no item identity is present.
    #[must_use]
    pub fn normalize(&self) -> Option<OrderLine> {
        let item = ItemKey::resolve(self.item_uuid.as_deref(), self.base_item_uuid.as_deref())?;
        Some(OrderLine {
            item,
            item_name: self.item_name.clone(),
            ordered_quantity: self.ordered_quantity,
            unit_price: self.unit_price,
            cost_code: self
                .cost_code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}

/// Stored receipt-note line as returned by the history API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReceiptLine {
    /// Receipt note the line belongs to.
    #[serde(default, alias = "receipt_note_uuid")]
    pub note_uuid: Option<String>,
    /// `purchase_order` or `change_order`.
    #[serde(default)]
    pub receipt_type: Option<String>,
    /// Purchase-order back-reference.
    #[serde(default)]
    pub purchase_order_uuid: Option<String>,
    /// Change-order back-reference.
    #[serde(default)]
    pub change_order_uuid: Option<String>,
    /// Primary item identity.
    #[serde(default)]
    pub item_uuid: Option<String>,
    /// Fallback item identity.
    #[serde(default)]
    pub base_item_uuid: Option<String>,
    /// Received quantity.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub received_quantity: Decimal,
    /// Soft-delete flag; absent means active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl RawReceiptLine {
    /// Normalizes the line. Returns `None` when the item or order cannot be resolved.
    #[must_use]
    pub fn normalize(&self) -> Option<ReceiptRecord> {
        let item = ItemKey::resolve(self.item_uuid.as_deref(), self.base_item_uuid.as_deref())?;
        let order = OrderRef::resolve(
            self.receipt_type.as_deref(),
            self.purchase_order_uuid.as_deref(),
            self.change_order_uuid.as_deref(),
        )?;
        Some(ReceiptRecord {
            note: NoteId::parse_lenient(self.note_uuid.as_deref()),
            order,
            item,
            received_quantity: self.received_quantity,
            lifecycle: Lifecycle::from_flag(self.is_active),
        })
    }
}

/// Stored return-note line as returned by the history API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReturnLine {
    /// Return note the line belongs to.
    #[serde(default, alias = "return_note_uuid")]
    pub note_uuid: Option<String>,
    /// `purchase_order` or `change_order`.
    #[serde(default)]
    pub return_type: Option<String>,
    /// Purchase-order back-reference.
    #[serde(default)]
    pub purchase_order_uuid: Option<String>,
    /// Change-order back-reference.
    #[serde(default)]
    pub change_order_uuid: Option<String>,
    /// Primary item identity.
    #[serde(default)]
    pub item_uuid: Option<String>,
    /// Fallback item identity.
    #[serde(default)]
    pub base_item_uuid: Option<String>,
    /// Returned quantity.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub return_quantity: Decimal,
    /// Soft-delete flag; absent means active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl RawReturnLine {
    /// Normalizes the line. Returns `None` when the item or order cannot be resolved.
    #[must_use]
    pub fn normalize(&self) -> Option<ReturnRecord> {
        let item = ItemKey::resolve(self.item_uuid.as_deref(), self.base_item_uuid.as_deref())?;
        let order = OrderRef::resolve(
            self.return_type.as_deref(),
            self.purchase_order_uuid.as_deref(),
            self.change_order_uuid.as_deref(),
        )?;
        Some(ReturnRecord {
            note: NoteId::parse_lenient(self.note_uuid.as_deref()),
            order,
            item,
            return_quantity: self.return_quantity,
            lifecycle: Lifecycle::from_flag(self.is_active),
        })
    }
}

/// Receipt-note form line as submitted by the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDraftReceiptLine {
    /// Primary item identity.
    #[serde(default)]
    pub item_uuid: Option<String>,
    /// Fallback item identity.
    #[serde(default)]
    pub base_item_uuid: Option<String>,
    /// Display name.
    #[serde(default)]
    pub item_name: Option<String>,
    /// Ordered quantity echoed from the order.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub ordered_quantity: Decimal,
    /// Proposed received quantity.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub received_quantity: Decimal,
    /// Unit price echoed from the order.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub unit_price: Decimal,
}

impl RawDraftReceiptLine {
    /// Normalizes the line. Returns `None` when no item identity is present.
    #[must_use]
    pub fn normalize(&self) -> Option<DraftReceiptLine> {
        let item = ItemKey::resolve(self.item_uuid.as_deref(), self.base_item_uuid.as_deref())?;
        Some(DraftReceiptLine {
            item,
            item_name: self.item_name.clone(),
            ordered_quantity: self.ordered_quantity,
            received_quantity: self.received_quantity,
            unit_price: self.unit_price,
        })
    }
}

/// Return-note form line as submitted by the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDraftReturnLine {
    /// Primary item identity.
    #[serde(default)]
    pub item_uuid: Option<String>,
    /// Fallback item identity.
    #[serde(default)]
    pub base_item_uuid: Option<String>,
    /// Display name.
    #[serde(default)]
    pub item_name: Option<String>,
    /// Quantity to return.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub return_quantity: Decimal,
}

impl RawDraftReturnLine {
    /// Normalizes the line. Returns `None` when no item identity is present.
    #[must_use]
    pub fn normalize(&self) -> Option<DraftReturnLine> {
        let item = ItemKey::resolve(self.item_uuid.as_deref(), self.base_item_uuid.as_deref())?;
        Some(DraftReturnLine {
            item,
            item_name: self.item_name.clone(),
            return_quantity: self.return_quantity,
        })
    }
}

/// Normalizes a batch of raw rows, dropping the ones that cannot be attributed.
pub fn normalize_all<R, T>(rows: &[R], normalize: impl Fn(&R) -> Option<T>) -> Vec<T> {
    let normalized: Vec<T> = rows.iter().filter_map(normalize).collect();
    let dropped = rows.len() - normalized.len();
    if dropped > 0 {
        debug!(dropped, total = rows.len(), "dropped unattributable rows");
    }
    normalized
}
