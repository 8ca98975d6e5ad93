//! Invoice totals calculation
//!
//! The one computation the whole billing screen hangs off:
//!
//! ```text
//! subtotal         = sum(quantity_i * unit_price_i)
//! discount_applied = max(0, discount)
//! insurance_amount = max(0, (subtotal - discount_applied) * pct / 100)
//! patient_due      = max(0, subtotal - discount_applied - insurance_amount)
//! ```
//!
//! Over-large discounts are clamped, not rejected; `patient_due` is
//! never negative. These exact values are embedded verbatim into the
//! printable invoice, so any change to rounding here changes the
//! export output too.

use super::money::{DECIMAL_PLACES, parse_amount, parse_percent, to_decimal, to_f64};
use crate::models::invoice::{Invoice, ServiceLine};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Derived monetary fields of an invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub discount_applied: f64,
    pub insurance_amount: f64,
    pub patient_due: f64,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn line_amount_decimal(line: &ServiceLine) -> Decimal {
    let quantity = Decimal::from(line.quantity.max(1));
    let unit_price = to_decimal(line.unit_price).max(Decimal::ZERO);
    round2(unit_price * quantity)
}

impl ServiceLine {
    /// Rounded quantity x unit price, as shown on the line itself
    pub fn line_amount(&self) -> f64 {
        to_f64(line_amount_decimal(self))
    }
}

/// Compute all derived monetary fields from draft invoice state.
///
/// Pure: no I/O, inputs are not mutated, and the service order does
/// not affect the result. Quantities below 1 count as 1 and negative
/// prices as 0 (the UI prevents both, this is the backstop).
pub fn compute_totals(
    services: &[ServiceLine],
    discount_amount: Decimal,
    coverage_percent: Decimal,
) -> InvoiceTotals {
    let mut subtotal = Decimal::ZERO;
    for line in services {
        subtotal += line_amount_decimal(line);
    }

    let discount_applied = discount_amount.max(Decimal::ZERO);
    let coverage = coverage_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    let after_discount = (subtotal - discount_applied).max(Decimal::ZERO);
    let insurance_amount = round2(after_discount * coverage / Decimal::ONE_HUNDRED);
    let patient_due = (subtotal - discount_applied - insurance_amount).max(Decimal::ZERO);

    InvoiceTotals {
        subtotal: to_f64(subtotal),
        discount_applied: to_f64(discount_applied),
        insurance_amount: to_f64(insurance_amount),
        patient_due: to_f64(patient_due),
    }
}

/// Compute totals from raw user-typed discount/coverage text.
///
/// Non-numeric or empty input is treated as 0, never propagated as
/// NaN.
pub fn compute_totals_from_input(
    services: &[ServiceLine],
    discount_input: &str,
    coverage_input: &str,
) -> InvoiceTotals {
    compute_totals(
        services,
        parse_amount(discount_input),
        parse_percent(coverage_input),
    )
}

/// Refresh the stored totals snapshot on an invoice.
///
/// Used when a draft changes and when a saved invoice is reopened for
/// edits: derived fields are always recomputed from the stored
/// services/discount/insurance, never trusted from the wire. Coverage
/// only applies when an insurance provider is actually set.
pub fn recalculate_totals(invoice: &mut Invoice) {
    let coverage = if invoice.has_insurance() {
        to_decimal(invoice.insurance_coverage_percent)
    } else {
        Decimal::ZERO
    };
    let totals = compute_totals(
        &invoice.services,
        to_decimal(invoice.discount_amount).max(Decimal::ZERO),
        coverage,
    );
    invoice.subtotal = totals.subtotal;
    invoice.discount_applied = totals.discount_applied;
    invoice.insurance_amount = totals.insurance_amount;
    invoice.patient_due = totals.patient_due;
}

impl Invoice {
    /// Method form of [`recalculate_totals`]
    pub fn recalculate(&mut self) {
        recalculate_totals(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(description: &str, quantity: i32, unit_price: f64) -> ServiceLine {
        ServiceLine::new(description, quantity, unit_price)
    }

    #[test]
    fn test_line_amount_rounds_and_clamps() {
        assert_eq!(line("Cream", 3, 19.99).line_amount(), 59.97);
        assert_eq!(line("Cream", 0, 50.0).line_amount(), 50.0);
        assert_eq!(line("Cream", 2, -5.0).line_amount(), 0.0);
    }

    #[test]
    fn test_empty_invoice_is_all_zero() {
        let totals = compute_totals(&[], Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn test_simple_sum() {
        let services = [line("Consultation", 1, 450.0), line("Dressing", 1, 75.0)];
        let totals = compute_totals(&services, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, 525.0);
        assert_eq!(totals.patient_due, 525.0);
        assert_eq!(totals.insurance_amount, 0.0);
    }

    #[test]
    fn test_flat_discount() {
        let services = [line("Laser session", 1, 1200.0)];
        let totals = compute_totals(&services, Decimal::new(100, 0), Decimal::ZERO);
        assert_eq!(totals.subtotal, 1200.0);
        assert_eq!(totals.discount_applied, 100.0);
        assert_eq!(totals.insurance_amount, 0.0);
        assert_eq!(totals.patient_due, 1100.0);
    }

    #[test]
    fn test_insurance_coverage() {
        let services = [line("Procedure", 1, 1000.0)];
        let totals = compute_totals(&services, Decimal::ZERO, Decimal::new(20, 0));
        assert_eq!(totals.insurance_amount, 200.0);
        assert_eq!(totals.patient_due, 800.0);
    }

    #[test]
    fn test_discount_then_insurance() {
        // Insurance applies to the post-discount amount
        let services = [line("Procedure", 1, 1000.0)];
        let totals = compute_totals(&services, Decimal::new(200, 0), Decimal::new(50, 0));
        assert_eq!(totals.insurance_amount, 400.0); // (1000 - 200) * 50%
        assert_eq!(totals.patient_due, 400.0);
    }

    #[test]
    fn test_over_discount_clamps_to_zero() {
        let services = [line("Cream", 1, 100.0)];
        let totals = compute_totals(&services, Decimal::new(150, 0), Decimal::ZERO);
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.discount_applied, 150.0);
        assert_eq!(totals.insurance_amount, 0.0);
        assert_eq!(totals.patient_due, 0.0);
    }

    #[test]
    fn test_over_discount_with_coverage_never_negative() {
        let services = [line("Cream", 1, 100.0)];
        let totals = compute_totals(&services, Decimal::new(150, 0), Decimal::new(80, 0));
        assert_eq!(totals.insurance_amount, 0.0);
        assert_eq!(totals.patient_due, 0.0);
    }

    #[test]
    fn test_negative_discount_clamped() {
        let services = [line("Cream", 1, 100.0)];
        let totals = compute_totals(&services, Decimal::new(-50, 0), Decimal::ZERO);
        assert_eq!(totals.discount_applied, 0.0);
        assert_eq!(totals.patient_due, 100.0);
    }

    #[test]
    fn test_subtotal_invariant_under_reordering() {
        let a = [
            line("A", 2, 33.33),
            line("B", 1, 450.0),
            line("C", 3, 19.99),
        ];
        let b = [
            line("C", 3, 19.99),
            line("A", 2, 33.33),
            line("B", 1, 450.0),
        ];
        let ta = compute_totals(&a, Decimal::new(10, 0), Decimal::new(15, 0));
        let tb = compute_totals(&b, Decimal::new(10, 0), Decimal::new(15, 0));
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let services = [line("A", 2, 33.33), line("B", 1, 450.0)];
        let first = compute_totals(&services, Decimal::new(25, 0), Decimal::new(30, 0));
        let second = compute_totals(&services, Decimal::new(25, 0), Decimal::new(30, 0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_quantity_below_one_counts_as_one() {
        let services = [line("A", 0, 50.0), line("B", -3, 50.0)];
        let totals = compute_totals(&services, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, 100.0);
    }

    #[test]
    fn test_negative_price_counts_as_zero() {
        let services = [line("A", 2, -10.0), line("B", 1, 30.0)];
        let totals = compute_totals(&services, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, 30.0);
    }

    #[test]
    fn test_nan_price_counts_as_zero() {
        let services = [line("A", 1, f64::NAN), line("B", 1, 25.0)];
        let totals = compute_totals(&services, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, 25.0);
        assert_eq!(totals.patient_due, 25.0);
    }

    #[test]
    fn test_from_input_defensive_parsing() {
        let services = [line("Procedure", 1, 1000.0)];
        let totals = compute_totals_from_input(&services, "abc", "");
        assert_eq!(totals.discount_applied, 0.0);
        assert_eq!(totals.insurance_amount, 0.0);
        assert_eq!(totals.patient_due, 1000.0);

        let totals = compute_totals_from_input(&services, "100", "20");
        assert_eq!(totals.insurance_amount, 180.0); // (1000-100) * 20%
        assert_eq!(totals.patient_due, 720.0);
    }

    #[test]
    fn test_fractional_prices_accumulate_precisely() {
        // 100 lines at 0.01 must sum to exactly 1.00
        let services: Vec<ServiceLine> = (0..100).map(|i| line(&format!("s{}", i), 1, 0.01)).collect();
        let totals = compute_totals(&services, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, 1.0);
    }

    #[test]
    fn test_recalculate_ignores_coverage_without_provider() {
        let mut invoice = Invoice::new("inv-1", "pat-1");
        invoice.services.push(line("Procedure", 1, 1000.0));
        invoice.insurance_coverage_percent = 20.0;
        // No provider set: coverage must not apply
        recalculate_totals(&mut invoice);
        assert_eq!(invoice.insurance_amount, 0.0);
        assert_eq!(invoice.patient_due, 1000.0);

        invoice.insurance_provider = Some("AIA".to_string());
        recalculate_totals(&mut invoice);
        assert_eq!(invoice.insurance_amount, 200.0);
        assert_eq!(invoice.patient_due, 800.0);
    }

    #[test]
    fn test_reopened_invoice_recomputes_from_snapshot() {
        let mut invoice = Invoice::new("inv-1", "pat-1");
        invoice.services.push(line("Procedure", 1, 500.0));
        recalculate_totals(&mut invoice);
        assert_eq!(invoice.patient_due, 500.0);

        // Stale derived fields are overwritten, not trusted
        invoice.patient_due = 9999.0;
        recalculate_totals(&mut invoice);
        assert_eq!(invoice.patient_due, 500.0);
    }
}
