//! Stock command pipeline
//!
//! Every use of an inventory item runs the same sequence: dedup check,
//! local precondition and optimistic deduction, backend call, then
//! commit or rollback depending on the answer. The backend sits behind
//! a trait so the pipeline is testable without a server.

use crate::{ClientError, ClientResult, HttpClient, InventoryStore};
use async_trait::async_trait;
use shared::models::diagnosis::ConsumableUse;
use shared::models::inventory::{StockUseRequest, StockUseResult};
use shared::stock::{DeductionFailure, DeductionReport, ItemSnapshot};
use std::sync::Arc;

/// Backend operations the stock pipeline depends on
#[async_trait]
pub trait StockBackend: Send + Sync {
    async fn fetch_inventory(&self) -> ClientResult<Vec<ItemSnapshot>>;
    async fn use_stock(&self, request: &StockUseRequest) -> ClientResult<StockUseResult>;
}

#[async_trait]
impl StockBackend for HttpClient {
    async fn fetch_inventory(&self) -> ClientResult<Vec<ItemSnapshot>> {
        HttpClient::fetch_inventory(self).await
    }

    async fn use_stock(&self, request: &StockUseRequest) -> ClientResult<StockUseResult> {
        HttpClient::use_stock(self, request).await
    }
}

#[async_trait]
impl<T: StockBackend + ?Sized> StockBackend for Arc<T> {
    async fn fetch_inventory(&self) -> ClientResult<Vec<ItemSnapshot>> {
        self.as_ref().fetch_inventory().await
    }

    async fn use_stock(&self, request: &StockUseRequest) -> ClientResult<StockUseResult> {
        self.as_ref().use_stock(request).await
    }
}

/// Stock operations over a backend and the local inventory store
pub struct StockService<B: StockBackend> {
    backend: B,
    store: Arc<InventoryStore>,
}

impl<B: StockBackend> StockService<B> {
    pub fn new(backend: B, store: Arc<InventoryStore>) -> Self {
        Self { backend, store }
    }

    pub fn store(&self) -> &Arc<InventoryStore> {
        &self.store
    }

    /// Fetch the inventory from the backend and replace the local mirror
    pub async fn refresh(&self) -> ClientResult<usize> {
        let snapshots = self.backend.fetch_inventory().await?;
        let count = snapshots.len();
        self.store.refresh(snapshots).await;
        tracing::info!(items = count, "Inventory refreshed");
        Ok(count)
    }

    /// Use stock: optimistic local deduction, then reconcile with the
    /// backend answer. On backend failure the deduction is rolled back
    /// and the error returned to the caller.
    pub async fn use_stock(&self, request: &StockUseRequest) -> ClientResult<ItemSnapshot> {
        let command_id = self.store.begin_command(&request.item_id)?;

        let snapshot = match self
            .store
            .apply_optimistic_use(&command_id, request)
            .await
        {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.store.end_command(&request.item_id);
                return Err(err.into());
            }
        };

        tracing::info!(
            item_id = %request.item_id,
            quantity = request.quantity,
            remaining = snapshot.quantity,
            "Optimistic stock deduction applied"
        );

        let result = self.backend.use_stock(request).await;
        self.store.end_command(&request.item_id);

        match result {
            Ok(confirmed) => {
                let snapshot = self.store.commit(&command_id, confirmed.quantity).await?;
                tracing::info!(
                    item_id = %request.item_id,
                    confirmed = confirmed.quantity,
                    "Stock deduction confirmed"
                );
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(
                    item_id = %request.item_id,
                    error = %err,
                    "Stock deduction rejected, rolling back"
                );
                self.store.rollback(&command_id).await?;
                Err(err)
            }
        }
    }

    /// Deduct every consumable recorded in a treatment session.
    ///
    /// Items are processed one by one; a failure on one item does not
    /// stop the rest. The report names each item that failed so the
    /// caller can surface a single consolidated message.
    pub async fn deduct_session_consumables(
        &self,
        uses: &[ConsumableUse],
        performed_by: &str,
    ) -> DeductionReport {
        let mut report = DeductionReport::default();

        for consumable in uses {
            let request =
                StockUseRequest::new(&consumable.item_id, consumable.quantity, performed_by);
            match self.use_stock(&request).await {
                Ok(_) => report.succeeded.push(consumable.item_id.clone()),
                Err(err) => {
                    let reason = match &err {
                        ClientError::App(app) => DeductionFailure::from_error(
                            &consumable.item_id,
                            &consumable.name,
                            app,
                        ),
                        other => DeductionFailure {
                            item_id: consumable.item_id.clone(),
                            item_name: consumable.name.clone(),
                            reason: other.to_string(),
                        },
                    };
                    report.failures.push(reason);
                }
            }
        }

        if report.is_partial() {
            tracing::warn!(
                succeeded = report.succeeded.len(),
                failed = report.failures.len(),
                "Session consumable deduction partially failed"
            );
        }

        report
    }
}
