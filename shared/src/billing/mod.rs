//! Invoice calculation
//!
//! Pure, side-effect-free monetary computation: subtotal, discount,
//! insurance coverage and patient due. All arithmetic uses
//! `rust_decimal` internally; `f64` only appears at the model
//! boundary.

pub mod money;
pub mod status;
pub mod totals;
pub mod validate;

pub use money::{parse_amount, parse_percent, to_decimal, to_f64};
pub use totals::{InvoiceTotals, compute_totals, compute_totals_from_input, recalculate_totals};
pub use validate::{LineIssue, LineValidationError, validate_service_line, validate_services};
