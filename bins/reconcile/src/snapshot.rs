//! Order snapshot files.
//!
//! A snapshot is the JSON an order-fetch and history-fetch would return for
//! one order, plus the receipt draft being evaluated.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use procura_core::fulfillment::{
    DraftReceiptLine, OrderKind, OrderRef, RawDraftReceiptLine, RawOrderLine, RawReceiptLine,
    RawReturnLine, normalize_all,
};
use procura_core::repository::{InMemoryRepository, OrderHeader};
use procura_core::status::OrderFulfillmentStatus;
use procura_shared::types::{CorporationId, OrderId};

/// Order header as written in a snapshot.
#[derive(Debug, Deserialize)]
pub struct SnapshotOrder {
    /// `purchase_order` (default) or `change_order`.
    #[serde(default)]
    pub kind: Option<String>,
    /// Order identity.
    pub uuid: String,
    /// Owning corporation.
    pub corporation_uuid: String,
    /// Stored status; `Approved` when absent.
    #[serde(default)]
    pub status: Option<String>,
}

/// Snapshot file contents.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    /// Order header.
    pub order: SnapshotOrder,
    /// Order lines.
    #[serde(default)]
    pub order_lines: Vec<RawOrderLine>,
    /// Stored receipt lines.
    #[serde(default)]
    pub receipts: Vec<RawReceiptLine>,
    /// Stored return lines.
    #[serde(default)]
    pub returns: Vec<RawReturnLine>,
    /// Receipt draft to evaluate.
    #[serde(default)]
    pub draft: Vec<RawDraftReceiptLine>,
    /// Corporation of the note being saved; the order's when absent.
    #[serde(default)]
    pub note_corporation_uuid: Option<String>,
}

/// A snapshot loaded into a repository.
pub struct LoadedSnapshot {
    /// Repository holding the order and its history.
    pub repository: InMemoryRepository,
    /// The snapshot's order.
    pub order: OrderRef,
    /// Corporation of the note being saved.
    pub note_corporation: CorporationId,
    /// Normalized draft lines.
    pub draft: Vec<DraftReceiptLine>,
}

/// Reads and parses a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

impl Snapshot {
    /// Normalizes the snapshot and loads it into an in-memory repository.
    pub fn load(self) -> Result<LoadedSnapshot> {
        let kind = match self.order.kind.as_deref() {
            None => OrderKind::PurchaseOrder,
            Some(raw) => {
                OrderKind::parse(raw).ok_or_else(|| anyhow!("Unknown order kind: {raw}"))?
            }
        };
        let id: OrderId = self.order.uuid.parse().context("Invalid order uuid")?;
        let order = OrderRef { kind, id };
        let corporation: CorporationId = self
            .order
            .corporation_uuid
            .parse()
            .context("Invalid corporation uuid")?;
        let status = match self.order.status.as_deref() {
            None => OrderFulfillmentStatus::Approved,
            Some(raw) => OrderFulfillmentStatus::parse(raw)
                .ok_or_else(|| anyhow!("Unknown order status: {raw}"))?,
        };
        let note_corporation = match self.note_corporation_uuid.as_deref() {
            None => corporation,
            Some(raw) => raw.parse().context("Invalid note corporation uuid")?,
        };

        let repository = InMemoryRepository::new();
        repository.insert_order(
            OrderHeader {
                order,
                corporation,
                status,
            },
            normalize_all(&self.order_lines, RawOrderLine::normalize),
        );
        for record in normalize_all(&self.receipts, RawReceiptLine::normalize) {
            repository.record_receipt(record);
        }
        for record in normalize_all(&self.returns, RawReturnLine::normalize) {
            repository.record_return(record);
        }

        Ok(LoadedSnapshot {
            repository,
            order,
            note_corporation,
            draft: normalize_all(&self.draft, RawDraftReceiptLine::normalize),
        })
    }
}
