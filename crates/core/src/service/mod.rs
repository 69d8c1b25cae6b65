//! Reconciliation service.
//!
//! Evaluates receipt and return drafts against repository data and refreshes
//! the order status after a save.

#[allow(clippy::module_inception)]
pub mod service;
pub mod types;

pub use service::ReconciliationService;
pub use types::{ReceiptEvaluation, StatusRefresh};
