//! Payment status state machine
//!
//! NotPaid is the initial state. NotPaid -> Paid needs freshly
//! recomputed totals with a positive due amount; NotPaid -> Canceled
//! closes the draft. Paid -> NotPaid is permitted (mis-click
//! correction) but only with a reason, and every transition lands in
//! the invoice's append-only status log. Canceled is terminal.

use super::totals::recalculate_totals;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::invoice::{Invoice, PaymentMethod, PaymentStatus, StatusChange};
use crate::util::now_millis;

impl PaymentStatus {
    /// Whether a direct transition to `to` is allowed
    pub fn can_transition(self, to: PaymentStatus) -> bool {
        matches!(
            (self, to),
            (PaymentStatus::NotPaid, PaymentStatus::Paid)
                | (PaymentStatus::NotPaid, PaymentStatus::Canceled)
                | (PaymentStatus::Paid, PaymentStatus::NotPaid)
        )
    }
}

impl Invoice {
    fn log_transition(&mut self, to: PaymentStatus, reason: Option<String>, changed_by: Option<String>) {
        self.status_log.push(StatusChange {
            from: self.payment_status,
            to,
            reason,
            changed_by,
            timestamp: now_millis(),
        });
        self.payment_status = to;
        self.updated_at = now_millis();
    }

    fn invalid_transition(&self, to: PaymentStatus) -> AppError {
        AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("invoice_id", self.id.clone())
            .with_detail("from", format!("{:?}", self.payment_status))
            .with_detail("to", format!("{:?}", to))
    }

    /// Mark the invoice paid.
    ///
    /// Recomputes totals from current draft state first; an invoice
    /// with nothing due cannot be marked paid.
    pub fn mark_paid(&mut self, method: PaymentMethod, changed_by: Option<String>) -> AppResult<()> {
        if self.payment_status == PaymentStatus::Paid {
            return Err(AppError::new(ErrorCode::AlreadyPaid)
                .with_detail("invoice_id", self.id.clone()));
        }
        if !self.payment_status.can_transition(PaymentStatus::Paid) {
            return Err(self.invalid_transition(PaymentStatus::Paid));
        }

        recalculate_totals(self);
        if self.patient_due <= 0.0 {
            return Err(AppError::new(ErrorCode::NothingDue)
                .with_detail("invoice_id", self.id.clone()));
        }

        self.payment_method = method;
        self.log_transition(PaymentStatus::Paid, None, changed_by);
        Ok(())
    }

    /// Cancel the draft invoice. Terminal.
    pub fn cancel(&mut self, changed_by: Option<String>) -> AppResult<()> {
        if !self.payment_status.can_transition(PaymentStatus::Canceled) {
            return Err(self.invalid_transition(PaymentStatus::Canceled));
        }
        self.log_transition(PaymentStatus::Canceled, None, changed_by);
        Ok(())
    }

    /// Revert a paid invoice back to an editable draft.
    ///
    /// Requires a non-empty reason; the reversion is recorded in the
    /// status log.
    pub fn reopen(&mut self, reason: &str, changed_by: Option<String>) -> AppResult<()> {
        if !self.payment_status.can_transition(PaymentStatus::NotPaid) {
            return Err(self.invalid_transition(PaymentStatus::NotPaid));
        }
        if reason.trim().is_empty() {
            return Err(AppError::new(ErrorCode::ReasonRequired)
                .with_detail("invoice_id", self.id.clone()));
        }
        self.log_transition(PaymentStatus::NotPaid, Some(reason.trim().to_string()), changed_by);
        Ok(())
    }
}
