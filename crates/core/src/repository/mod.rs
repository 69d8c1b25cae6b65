//! Storage seam for order data.
//!
//! The engine never talks to a database. It reads order lines and history
//! through `FulfillmentRepository` and writes only the derived status back.
//!
//! - `memory` - in-process store used by the CLI and tests
//! - `cache` - read-through cache wrapper for lines and headers

pub mod cache;
pub mod error;
pub mod memory;

use procura_shared::types::CorporationId;
use serde::{Deserialize, Serialize};

use crate::fulfillment::{OrderLine, OrderRef, ReceiptRecord, ReturnRecord};
use crate::status::OrderFulfillmentStatus;

pub use cache::CachedRepository;
pub use error::RepositoryError;
pub use memory::InMemoryRepository;

/// Header fields of an order the status refresh needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHeader {
    /// Order identity.
    pub order: OrderRef,
    /// Corporation (tenant) owning the order.
    pub corporation: CorporationId,
    /// Stored fulfillment status.
    pub status: OrderFulfillmentStatus,
}

/// Read and status-write access to order data.
///
/// History reads must reflect every committed note, so implementations
/// return receipt and return records fresh on each call.
pub trait FulfillmentRepository: Send + Sync {
    /// Lines of the order.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` if the order does not exist.
    fn order_lines(&self, order: &OrderRef) -> Result<Vec<OrderLine>, RepositoryError>;

    /// Every receipt line recorded against the order, retired ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn receipt_history(&self, order: &OrderRef) -> Result<Vec<ReceiptRecord>, RepositoryError>;

    /// Every return line recorded against the order, retired ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn return_history(&self, order: &OrderRef) -> Result<Vec<ReturnRecord>, RepositoryError>;

    /// Header of the order.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` if the order does not exist.
    fn order_header(&self, order: &OrderRef) -> Result<OrderHeader, RepositoryError>;

    /// Overwrites the stored status of the order.
    ///
    /// # Errors
    ///
    /// Returns `WriteFailed` if the store rejects the write.
    fn write_order_status(
        &self,
        order: &OrderRef,
        status: OrderFulfillmentStatus,
    ) -> Result<(), RepositoryError>;
}
