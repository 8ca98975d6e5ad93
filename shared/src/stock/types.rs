//! Ledger-side types for deduction tracking and batch reporting

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};

/// One deduction applied locally but not yet confirmed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingDeduction {
    pub command_id: String,
    pub item_id: String,
    pub quantity: f64,
    /// Quantity before the optimistic decrement (for rollback)
    pub previous_quantity: f64,
    pub issued_at: i64,
}

/// One failed deduction inside a batch, named by item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionFailure {
    pub item_id: String,
    pub item_name: String,
    pub reason: String,
}

impl DeductionFailure {
    pub fn from_error(item_id: impl Into<String>, item_name: impl Into<String>, err: &AppError) -> Self {
        Self {
            item_id: item_id.into(),
            item_name: item_name.into(),
            reason: err.message.clone(),
        }
    }
}

/// Outcome of a multi-item deduction (e.g. laser session supplies)
///
/// Failures are collected per item so partial failures can be
/// reported individually instead of aborting the whole operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeductionReport {
    /// Item ids deducted and confirmed
    pub succeeded: Vec<String>,
    pub failures: Vec<DeductionFailure>,
}

impl DeductionReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() && !self.succeeded.is_empty()
    }

    /// Consolidated user-facing message naming every failed item,
    /// `None` when everything succeeded.
    pub fn error_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.item_name, f.reason))
            .collect();
        Some(format!(
            "Failed to deduct {} item(s):\n{}",
            self.failures.len(),
            lines.join("\n")
        ))
    }

    /// The report as a domain error, `None` when everything succeeded
    pub fn as_error(&self) -> Option<AppError> {
        let message = self.error_message()?;
        Some(
            AppError::with_message(ErrorCode::PartialFailure, message)
                .with_detail("succeeded", self.succeeded.len())
                .with_detail("failed", self.failures.len()),
        )
    }
}
