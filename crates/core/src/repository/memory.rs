//! In-memory fulfillment repository.

use dashmap::DashMap;
use procura_shared::types::NoteId;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::{FulfillmentRepository, OrderHeader, RepositoryError};
use crate::fulfillment::{Lifecycle, OrderLine, OrderRef, ReceiptRecord, ReturnRecord};
use crate::status::OrderFulfillmentStatus;

/// A stored order: its header and lines.
#[derive(Debug, Clone)]
struct StoredOrder {
    header: OrderHeader,
    lines: Vec<OrderLine>,
}

/// Concurrent in-memory store keyed by order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    orders: DashMap<OrderRef, StoredOrder>,
    receipts: DashMap<OrderRef, Vec<ReceiptRecord>>,
    returns: DashMap<OrderRef, Vec<ReturnRecord>>,
    fail_writes: AtomicBool,
    line_reads: AtomicU64,
    header_reads: AtomicU64,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an order.
    pub fn insert_order(&self, header: OrderHeader, lines: Vec<OrderLine>) {
        self.orders
            .insert(header.order, StoredOrder { header, lines });
    }

    /// Records a saved receipt line.
    pub fn record_receipt(&self, record: ReceiptRecord) {
        self.receipts.entry(record.order).or_default().push(record);
    }

    /// Records a saved return line.
    pub fn record_return(&self, record: ReturnRecord) {
        self.returns.entry(record.order).or_default().push(record);
    }

    /// Retires every stored receipt line of a note, as when the note is re-saved.
    ///
    /// Returns the number of lines retired.
    pub fn retire_receipt_note(&self, order: &OrderRef, note: NoteId) -> usize {
        let Some(mut records) = self.receipts.get_mut(order) else {
            return 0;
        };
        let mut retired = 0;
        for record in records
            .iter_mut()
            .filter(|r| r.note == Some(note) && r.lifecycle.is_active())
        {
            record.lifecycle = Lifecycle::Retired;
            retired += 1;
        }
        retired
    }

    /// Makes every subsequent status write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `order_lines` calls served.
    #[must_use]
    pub fn line_reads(&self) -> u64 {
        self.line_reads.load(Ordering::SeqCst)
    }

    /// Number of `order_header` calls served.
    #[must_use]
    pub fn header_reads(&self) -> u64 {
        self.header_reads.load(Ordering::SeqCst)
    }
}

impl FulfillmentRepository for InMemoryRepository {
    fn order_lines(&self, order: &OrderRef) -> Result<Vec<OrderLine>, RepositoryError> {
        self.line_reads.fetch_add(1, Ordering::SeqCst);
        self.orders
            .get(order)
            .map(|stored| stored.lines.clone())
            .ok_or(RepositoryError::OrderNotFound(*order))
    }

    fn receipt_history(&self, order: &OrderRef) -> Result<Vec<ReceiptRecord>, RepositoryError> {
        Ok(self
            .receipts
            .get(order)
            .map(|records| records.clone())
            .unwrap_or_default())
    }

    fn return_history(&self, order: &OrderRef) -> Result<Vec<ReturnRecord>, RepositoryError> {
        Ok(self
            .returns
            .get(order)
            .map(|records| records.clone())
            .unwrap_or_default())
    }

    fn order_header(&self, order: &OrderRef) -> Result<OrderHeader, RepositoryError> {
        self.header_reads.fetch_add(1, Ordering::SeqCst);
        self.orders
            .get(order)
            .map(|stored| stored.header)
            .ok_or(RepositoryError::OrderNotFound(*order))
    }

    fn write_order_status(
        &self,
        order: &OrderRef,
        status: OrderFulfillmentStatus,
    ) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::WriteFailed {
                order: *order,
                reason: "writes disabled".to_string(),
            });
        }
        let mut stored = self
            .orders
            .get_mut(order)
            .ok_or(RepositoryError::OrderNotFound(*order))?;
        stored.header.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_shared::types::{CorporationId, ItemKey, OrderId};
    use rust_decimal_macros::dec;

    fn order() -> OrderRef {
        OrderRef::purchase_order(OrderId::new())
    }

    fn header(order: OrderRef) -> OrderHeader {
        OrderHeader {
            order,
            corporation: CorporationId::new(),
            status: OrderFulfillmentStatus::Approved,
        }
    }

    #[test]
    fn test_unknown_order() {
        let repo = InMemoryRepository::new();
        let missing = order();
        assert_eq!(
            repo.order_lines(&missing),
            Err(RepositoryError::OrderNotFound(missing))
        );
        assert!(repo.receipt_history(&missing).unwrap().is_empty());
    }

    #[test]
    fn test_history_is_scoped_to_order() {
        let repo = InMemoryRepository::new();
        let a = order();
        let b = order();
        repo.insert_order(header(a), vec![]);
        repo.record_receipt(ReceiptRecord {
            note: None,
            order: a,
            item: ItemKey::new("sku").unwrap(),
            received_quantity: dec!(3),
            lifecycle: Lifecycle::Active,
        });

        assert_eq!(repo.receipt_history(&a).unwrap().len(), 1);
        assert!(repo.receipt_history(&b).unwrap().is_empty());
    }

    #[test]
    fn test_retire_receipt_note() {
        let repo = InMemoryRepository::new();
        let a = order();
        let note = NoteId::new();
        for n in [Some(note), Some(note), None] {
            repo.record_receipt(ReceiptRecord {
                note: n,
                order: a,
                item: ItemKey::new("sku").unwrap(),
                received_quantity: dec!(1),
                lifecycle: Lifecycle::Active,
            });
        }

        assert_eq!(repo.retire_receipt_note(&a, note), 2);
        assert_eq!(repo.retire_receipt_note(&a, note), 0);
        let active = repo
            .receipt_history(&a)
            .unwrap()
            .iter()
            .filter(|r| r.lifecycle.is_active())
            .count();
        assert_eq!(active, 1);
    }

    #[test]
    fn test_write_status_and_fail_switch() {
        let repo = InMemoryRepository::new();
        let a = order();
        repo.insert_order(header(a), vec![]);

        repo.write_order_status(&a, OrderFulfillmentStatus::Completed)
            .unwrap();
        assert_eq!(
            repo.order_header(&a).unwrap().status,
            OrderFulfillmentStatus::Completed
        );

        repo.set_fail_writes(true);
        assert!(matches!(
            repo.write_order_status(&a, OrderFulfillmentStatus::PartiallyReceived),
            Err(RepositoryError::WriteFailed { .. })
        ));
        assert_eq!(
            repo.order_header(&a).unwrap().status,
            OrderFulfillmentStatus::Completed
        );
    }
}
