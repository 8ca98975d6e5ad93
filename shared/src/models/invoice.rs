//! Invoice model
//!
//! An invoice is a draft until marked Paid or Canceled. While it is a
//! draft the service lines, discount and insurance fields are freely
//! editable and the derived totals are recomputed from them; once the
//! status leaves NotPaid the aggregate is frozen.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::now_millis;
use serde::{Deserialize, Serialize};

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    NotPaid,
    Paid,
    Canceled,
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    BankTransfer,
    EWallet,
}

/// One billable item on an invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceLine {
    /// What was performed (must be non-empty)
    pub description: String,
    /// Positive integer, >= 1
    pub quantity: i32,
    /// Non-negative price per unit
    pub unit_price: f64,
}

impl ServiceLine {
    pub fn new(description: impl Into<String>, quantity: i32, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }
}

/// Append-only record of a payment-status change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusChange {
    pub from: PaymentStatus,
    pub to: PaymentStatus,
    /// Required when reverting Paid -> NotPaid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
    pub timestamp: i64,
}

/// Invoice aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub patient_id: String,
    /// Display order only; totals are order-insensitive
    pub services: Vec<ServiceLine>,
    /// Flat currency amount, not a percentage
    #[serde(default)]
    pub discount_amount: f64,
    /// Empty/absent means "no insurance"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    /// Percentage in [0, 100]; only meaningful with a provider
    #[serde(default)]
    pub insurance_coverage_percent: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,

    // === Derived totals (snapshot, refreshed by billing::recalculate_totals) ===
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub discount_applied: f64,
    #[serde(default)]
    pub insurance_amount: f64,
    #[serde(default)]
    pub patient_due: f64,

    /// Append-only status-change audit log
    #[serde(default)]
    pub status_log: Vec<StatusChange>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Invoice {
    /// Create a new draft invoice for a patient
    pub fn new(id: impl Into<String>, patient_id: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: id.into(),
            patient_id: patient_id.into(),
            services: Vec::new(),
            discount_amount: 0.0,
            insurance_provider: None,
            insurance_coverage_percent: 0.0,
            payment_status: PaymentStatus::NotPaid,
            payment_method: PaymentMethod::Cash,
            subtotal: 0.0,
            discount_applied: 0.0,
            insurance_amount: 0.0,
            patient_due: 0.0,
            status_log: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// An invoice is a draft while NotPaid
    pub fn is_draft(&self) -> bool {
        self.payment_status == PaymentStatus::NotPaid
    }

    /// Whether insurance applies (provider set and non-empty)
    pub fn has_insurance(&self) -> bool {
        self.insurance_provider
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
    }

    fn require_draft(&self) -> AppResult<()> {
        if self.is_draft() {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::InvoiceNotDraft)
                .with_detail("invoice_id", self.id.clone()))
        }
    }

    /// Add a service line to the draft
    pub fn add_service(&mut self, line: ServiceLine) -> AppResult<()> {
        self.require_draft()?;
        self.services.push(line);
        self.updated_at = now_millis();
        Ok(())
    }

    /// Remove a service line by index
    pub fn remove_service(&mut self, index: usize) -> AppResult<ServiceLine> {
        self.require_draft()?;
        if index >= self.services.len() {
            return Err(AppError::not_found("Service line"));
        }
        self.updated_at = now_millis();
        Ok(self.services.remove(index))
    }

    /// Set the flat discount on the draft
    pub fn set_discount(&mut self, amount: f64) -> AppResult<()> {
        self.require_draft()?;
        self.discount_amount = amount;
        self.updated_at = now_millis();
        Ok(())
    }

    /// Set (or clear) the insurance coverage on the draft
    pub fn set_insurance(
        &mut self,
        provider: Option<String>,
        coverage_percent: f64,
    ) -> AppResult<()> {
        self.require_draft()?;
        self.insurance_provider = provider;
        self.insurance_coverage_percent = coverage_percent;
        self.updated_at = now_millis();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_invoice_is_draft() {
        let invoice = Invoice::new("inv-1", "pat-1");
        assert!(invoice.is_draft());
        assert_eq!(invoice.payment_status, PaymentStatus::NotPaid);
        assert!(invoice.services.is_empty());
    }

    #[test]
    fn test_has_insurance_requires_nonempty_provider() {
        let mut invoice = Invoice::new("inv-1", "pat-1");
        assert!(!invoice.has_insurance());
        invoice.insurance_provider = Some("  ".to_string());
        assert!(!invoice.has_insurance());
        invoice.insurance_provider = Some("AIA".to_string());
        assert!(invoice.has_insurance());
    }

    #[test]
    fn test_paid_invoice_rejects_edits() {
        let mut invoice = Invoice::new("inv-1", "pat-1");
        invoice.payment_status = PaymentStatus::Paid;

        let err = invoice
            .add_service(ServiceLine::new("Consultation", 1, 450.0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvoiceNotDraft);
        assert!(invoice.set_discount(10.0).is_err());
        assert!(invoice.set_insurance(None, 0.0).is_err());
    }

    #[test]
    fn test_remove_service_out_of_range() {
        let mut invoice = Invoice::new("inv-1", "pat-1");
        assert!(invoice.remove_service(0).is_err());
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::NotPaid).unwrap();
        assert_eq!(json, "\"NOT_PAID\"");
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"BANK_TRANSFER\"");
    }
}
