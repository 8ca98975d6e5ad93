//! Stock ledger - optimistic local mirror with reconciliation
//!
//! The ledger applies deductions immediately so the UI stays
//! responsive, keyed by command id so each optimistic update can be
//! committed (adopt the server-confirmed quantity) or rolled back
//! (restore the pre-use value) when the backend answers. Quantities
//! never go below zero on any path.

use super::snapshot::ItemSnapshot;
use super::types::PendingDeduction;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::inventory::StockUseRequest;
use crate::util::now_millis;
use std::collections::HashMap;

/// In-memory mirror of inventory quantities
#[derive(Debug, Default)]
pub struct StockLedger {
    items: HashMap<String, ItemSnapshot>,
    /// Optimistic deductions awaiting backend confirmation
    pending: HashMap<String, PendingDeduction>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the mirror from a backend fetch.
    ///
    /// Drops all pending deductions: the fetch is newer truth than any
    /// in-flight guess.
    pub fn refresh(&mut self, snapshots: Vec<ItemSnapshot>) {
        self.items = snapshots
            .into_iter()
            .map(|s| (s.item_id.clone(), s))
            .collect();
        self.pending.clear();
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemSnapshot> {
        self.items.get(item_id)
    }

    pub fn all(&self) -> impl Iterator<Item = &ItemSnapshot> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Apply a deduction locally before the backend call.
    ///
    /// Fails with `InsufficientStock` when the requested quantity
    /// exceeds the locally known quantity; the caller must surface
    /// that and not send the request. This check is advisory, the
    /// server still holds the authoritative count. Performs no I/O.
    pub fn apply_optimistic_use(
        &mut self,
        command_id: &str,
        request: &StockUseRequest,
    ) -> AppResult<ItemSnapshot> {
        if !request.quantity.is_finite() || request.quantity <= 0.0 {
            return Err(AppError::validation("Use quantity must be positive")
                .with_detail("item_id", request.item_id.clone()));
        }

        let item = self
            .items
            .get_mut(&request.item_id)
            .ok_or_else(|| {
                AppError::new(ErrorCode::ItemNotFound)
                    .with_detail("item_id", request.item_id.clone())
            })?;

        if request.quantity > item.quantity {
            return Err(AppError::insufficient_stock(item.name.clone())
                .with_detail("requested", request.quantity)
                .with_detail("available", item.quantity));
        }

        let previous_quantity = item.quantity;
        item.quantity = (item.quantity - request.quantity).max(0.0);
        item.updated_at = now_millis();

        self.pending.insert(
            command_id.to_string(),
            PendingDeduction {
                command_id: command_id.to_string(),
                item_id: request.item_id.clone(),
                quantity: request.quantity,
                previous_quantity,
                issued_at: now_millis(),
            },
        );

        Ok(item.clone())
    }

    /// Backend confirmed the deduction: adopt the server-confirmed
    /// quantity as the new truth (last-write-wins, it may differ from
    /// the optimistic guess if concurrent usage happened elsewhere).
    pub fn commit(&mut self, command_id: &str, confirmed_quantity: f64) -> AppResult<ItemSnapshot> {
        let pending = self.take_pending(command_id)?;
        let item = self
            .items
            .get_mut(&pending.item_id)
            .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
        item.quantity = confirmed_quantity.max(0.0);
        item.updated_at = now_millis();
        Ok(item.clone())
    }

    /// Backend rejected the deduction: put the deducted amount back so
    /// use-then-revert is a no-op on quantity.
    pub fn rollback(&mut self, command_id: &str) -> AppResult<ItemSnapshot> {
        let pending = self.take_pending(command_id)?;
        let item = self
            .items
            .get_mut(&pending.item_id)
            .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
        item.quantity = (item.quantity + pending.quantity).max(0.0);
        item.updated_at = now_millis();
        Ok(item.clone())
    }

    fn take_pending(&mut self, command_id: &str) -> AppResult<PendingDeduction> {
        self.pending.remove(command_id).ok_or_else(|| {
            AppError::with_message(ErrorCode::NotFound, "No pending deduction for command")
                .with_detail("command_id", command_id.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(name: &str, quantity: f64) -> StockLedger {
        let mut ledger = StockLedger::new();
        ledger.refresh(vec![ItemSnapshot::new("itm-1", name, quantity)]);
        ledger
    }

    fn use_request(quantity: f64) -> StockUseRequest {
        StockUseRequest::new("itm-1", quantity, "nurse")
    }

    #[test]
    fn test_optimistic_use_decrements() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        let snapshot = ledger.apply_optimistic_use("cmd-1", &use_request(3.0)).unwrap();
        assert_eq!(snapshot.quantity, 7.0);
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 7.0);
        assert_eq!(ledger.pending_count(), 1);
    }

    #[test]
    fn test_insufficient_stock_leaves_snapshot_unchanged() {
        let mut ledger = ledger_with("Gel Pads", 2.0);
        let err = ledger.apply_optimistic_use("cmd-1", &use_request(5.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 2.0);
        assert_eq!(ledger.pending_count(), 0);
    }

    #[test]
    fn test_unknown_item() {
        let mut ledger = StockLedger::new();
        let err = ledger.apply_optimistic_use("cmd-1", &use_request(1.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemNotFound);
    }

    #[test]
    fn test_nonpositive_quantity_rejected() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        assert!(ledger.apply_optimistic_use("c1", &use_request(0.0)).is_err());
        assert!(ledger.apply_optimistic_use("c2", &use_request(-1.0)).is_err());
        assert!(ledger.apply_optimistic_use("c3", &use_request(f64::NAN)).is_err());
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 10.0);
    }

    #[test]
    fn test_use_then_rollback_is_noop_on_quantity() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        ledger.apply_optimistic_use("cmd-1", &use_request(4.0)).unwrap();
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 6.0);

        let restored = ledger.rollback("cmd-1").unwrap();
        assert_eq!(restored.quantity, 10.0);
        assert_eq!(ledger.pending_count(), 0);
    }

    #[test]
    fn test_commit_adopts_server_quantity() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        ledger.apply_optimistic_use("cmd-1", &use_request(3.0)).unwrap();
        // Server saw concurrent usage elsewhere: 5 left, not 7
        let confirmed = ledger.commit("cmd-1", 5.0).unwrap();
        assert_eq!(confirmed.quantity, 5.0);
        assert_eq!(ledger.pending_count(), 0);
    }

    #[test]
    fn test_commit_clamps_negative_server_quantity() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        ledger.apply_optimistic_use("cmd-1", &use_request(3.0)).unwrap();
        let confirmed = ledger.commit("cmd-1", -2.0).unwrap();
        assert_eq!(confirmed.quantity, 0.0);
    }

    #[test]
    fn test_two_optimistic_uses_interleaved() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        ledger.apply_optimistic_use("cmd-1", &use_request(4.0)).unwrap();
        ledger.apply_optimistic_use("cmd-2", &use_request(4.0)).unwrap();
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 2.0);

        // Second fails server-side, first confirms with 6 remaining
        ledger.rollback("cmd-2").unwrap();
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 6.0);
        let confirmed = ledger.commit("cmd-1", 6.0).unwrap();
        assert_eq!(confirmed.quantity, 6.0);
        assert_eq!(ledger.pending_count(), 0);
    }

    #[test]
    fn test_commit_unknown_command() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        assert!(ledger.commit("nope", 5.0).is_err());
        assert!(ledger.rollback("nope").is_err());
    }

    #[test]
    fn test_refresh_clears_pending() {
        let mut ledger = ledger_with("Gel Pads", 10.0);
        ledger.apply_optimistic_use("cmd-1", &use_request(3.0)).unwrap();
        assert_eq!(ledger.pending_count(), 1);

        ledger.refresh(vec![ItemSnapshot::new("itm-1", "Gel Pads", 42.0)]);
        assert_eq!(ledger.pending_count(), 0);
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 42.0);
        // Rolling back the dropped command now fails cleanly
        assert!(ledger.rollback("cmd-1").is_err());
    }

    #[test]
    fn test_quantity_never_negative() {
        let mut ledger = ledger_with("Gel Pads", 3.0);
        ledger.apply_optimistic_use("cmd-1", &use_request(3.0)).unwrap();
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 0.0);
        // A further use is a precondition failure, not a negative balance
        let err = ledger.apply_optimistic_use("cmd-2", &use_request(0.5)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(ledger.get("itm-1").unwrap().quantity, 0.0);
    }
}
