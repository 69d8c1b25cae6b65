//! Order data caching using Moka.
//!
//! Order lines and headers change rarely while a receipt note is being
//! edited, so they are served from an in-memory cache. Receipt and return
//! history always goes to the wrapped repository: a status refresh must see
//! the note that was just committed.

use moka::sync::Cache;
use procura_shared::CacheConfig;
use std::sync::Arc;
use std::time::Duration;

use super::{FulfillmentRepository, OrderHeader, RepositoryError};
use crate::fulfillment::{OrderLine, OrderRef, ReceiptRecord, ReturnRecord};
use crate::status::OrderFulfillmentStatus;

/// Read-through cache in front of a fulfillment repository.
///
/// Status writes go through to the wrapped repository and invalidate the
/// cached header of the order.
pub struct CachedRepository<R> {
    inner: R,
    lines: Cache<OrderRef, Arc<Vec<OrderLine>>>,
    headers: Cache<OrderRef, OrderHeader>,
}

impl<R: FulfillmentRepository> CachedRepository<R> {
    /// Wraps a repository with the configured capacity and TTL.
    #[must_use]
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        Self::with_config(inner, config.max_capacity, config.ttl_secs)
    }

    /// Wraps a repository with a custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of orders cached per kind of entry
    /// * `ttl_secs` - Time-to-live in seconds for each entry
    #[must_use]
    pub fn with_config(inner: R, max_capacity: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);
        Self {
            inner,
            lines: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            headers: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// The wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Drops every cached entry of one order.
    pub fn invalidate(&self, order: &OrderRef) {
        self.lines.invalidate(order);
        self.headers.invalidate(order);
    }

    /// Drops every cached entry.
    pub fn invalidate_all(&self) {
        self.lines.invalidate_all();
        self.headers.invalidate_all();
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka evicts expired entries on its own; calling this reclaims memory
    /// sooner and makes `entry_count` exact.
    pub fn run_pending_tasks(&self) {
        self.lines.run_pending_tasks();
        self.headers.run_pending_tasks();
    }

    /// Number of cached line sets and headers.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.lines.entry_count() + self.headers.entry_count()
    }
}

impl<R: FulfillmentRepository> FulfillmentRepository for CachedRepository<R> {
    fn order_lines(&self, order: &OrderRef) -> Result<Vec<OrderLine>, RepositoryError> {
        if let Some(cached) = self.lines.get(order) {
            return Ok((*cached).clone());
        }

        let lines = self.inner.order_lines(order)?;
        self.lines.insert(*order, Arc::new(lines.clone()));
        Ok(lines)
    }

    fn receipt_history(&self, order: &OrderRef) -> Result<Vec<ReceiptRecord>, RepositoryError> {
        self.inner.receipt_history(order)
    }

    fn return_history(&self, order: &OrderRef) -> Result<Vec<ReturnRecord>, RepositoryError> {
        self.inner.return_history(order)
    }

    fn order_header(&self, order: &OrderRef) -> Result<OrderHeader, RepositoryError> {
        if let Some(cached) = self.headers.get(order) {
            return Ok(cached);
        }

        let header = self.inner.order_header(order)?;
        self.headers.insert(*order, header);
        Ok(header)
    }

    fn write_order_status(
        &self,
        order: &OrderRef,
        status: OrderFulfillmentStatus,
    ) -> Result<(), RepositoryError> {
        let result = self.inner.write_order_status(order, status);
        // Invalidate even on failure: the store state is unknown
        self.headers.invalidate(order);
        result
    }
}
