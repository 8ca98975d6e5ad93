//! Inventory application state
//!
//! Wraps the shared stock ledger behind an async lock and tracks
//! which items have a use command in flight, so a double submit is
//! rejected before it touches the ledger or the network.

use dashmap::DashMap;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::inventory::StockUseRequest;
use shared::stock::{ItemSnapshot, StockLedger};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Shared inventory state for the client
#[derive(Debug, Default)]
pub struct InventoryStore {
    ledger: RwLock<StockLedger>,
    /// item_id -> command_id for in-flight use commands
    in_flight: DashMap<String, String>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local mirror with a fresh backend snapshot
    pub async fn refresh(&self, snapshots: Vec<ItemSnapshot>) {
        self.ledger.write().await.refresh(snapshots);
        self.in_flight.clear();
    }

    pub async fn get(&self, item_id: &str) -> Option<ItemSnapshot> {
        self.ledger.read().await.get(item_id).cloned()
    }

    pub async fn all(&self) -> Vec<ItemSnapshot> {
        self.ledger.read().await.all().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.ledger.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ledger.read().await.is_empty()
    }

    /// Items at or below their minimum stock level
    pub async fn low_stock(&self) -> Vec<ItemSnapshot> {
        self.ledger
            .read()
            .await
            .all()
            .filter(|s| s.is_low_stock())
            .cloned()
            .collect()
    }

    /// Items expiring within the lookahead window
    pub async fn expiring_soon(&self) -> Vec<ItemSnapshot> {
        let today = shared::util::today();
        self.ledger
            .read()
            .await
            .all()
            .filter(|s| s.is_expiring_soon(today))
            .cloned()
            .collect()
    }

    // ========== Command lifecycle ==========

    /// Register a use command for the item and get its command id.
    ///
    /// Fails with `DuplicateCommand` while another use of the same
    /// item is still in flight.
    pub fn begin_command(&self, item_id: &str) -> AppResult<String> {
        let command_id = Uuid::new_v4().to_string();
        match self.in_flight.entry(item_id.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(AppError::with_message(
                ErrorCode::DuplicateCommand,
                "A use command for this item is already in flight",
            )
            .with_detail("item_id", item_id.to_string())),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(command_id.clone());
                Ok(command_id)
            }
        }
    }

    /// Release the in-flight slot for the item
    pub fn end_command(&self, item_id: &str) {
        self.in_flight.remove(item_id);
    }

    pub async fn apply_optimistic_use(
        &self,
        command_id: &str,
        request: &StockUseRequest,
    ) -> AppResult<ItemSnapshot> {
        self.ledger
            .write()
            .await
            .apply_optimistic_use(command_id, request)
    }

    pub async fn commit(
        &self,
        command_id: &str,
        confirmed_quantity: f64,
    ) -> AppResult<ItemSnapshot> {
        self.ledger.write().await.commit(command_id, confirmed_quantity)
    }

    pub async fn rollback(&self, command_id: &str) -> AppResult<ItemSnapshot> {
        self.ledger.write().await.rollback(command_id)
    }
}
