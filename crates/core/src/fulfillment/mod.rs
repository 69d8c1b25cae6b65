//! Order fulfillment history.
//!
//! This module covers the data the reconciliation engine is given:
//! - Strict domain types for order lines, receipt and return records
//! - Boundary DTOs that normalize loosely-typed API payloads
//! - History aggregation into a per-item `ReconciliationContext`

pub mod context;
pub mod raw;
pub mod types;

#[cfg(test)]
mod context_props;

pub use context::{ReconciliationContext, aggregate, sum_receipts, sum_returns};
pub use raw::{
    RawDraftReceiptLine, RawDraftReturnLine, RawOrderLine, RawReceiptLine, RawReturnLine,
    normalize_all,
};
pub use types::{
    DraftReceiptLine, DraftReturnLine, Lifecycle, OrderKind, OrderLine, OrderRef, ReceiptRecord,
    ReturnRecord,
};
