//! Inventory wire payloads
//!
//! The client-side cache itself lives in `stock::snapshot`; these are
//! the request/response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

/// One deduction attempt against an inventory item
///
/// The requested quantity is checked against the locally cached value
/// before anything is sent; that check is advisory only, the server
/// holds the authoritative count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUseRequest {
    pub item_id: String,
    /// Positive amount to deduct
    pub quantity: f64,
    /// Free-text actor label (e.g. "Dr. Chen")
    pub performed_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StockUseRequest {
    pub fn new(item_id: impl Into<String>, quantity: f64, performed_by: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            performed_by: performed_by.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Stock replenishment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAddRequest {
    /// Positive amount to add
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    /// YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Backend confirmation for a deduction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUseResult {
    pub item_id: String,
    /// Server-confirmed remaining quantity (authoritative)
    pub quantity: f64,
}
