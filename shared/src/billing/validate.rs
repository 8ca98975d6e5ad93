//! Service line validation
//!
//! The calculator clamps; validation is what the form surfaces to the
//! receptionist before a line is accepted into the draft.

use crate::error::ErrorCode;
use crate::models::invoice::ServiceLine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a service line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineValidationError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("unit price must be a non-negative number")]
    InvalidPrice,
    #[error("description must not be blank")]
    EmptyDescription,
}

impl LineValidationError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidQuantity => ErrorCode::InvalidQuantity,
            Self::InvalidPrice => ErrorCode::InvalidPrice,
            Self::EmptyDescription => ErrorCode::EmptyDescription,
        }
    }
}

/// Validate a single service line
pub fn validate_service_line(line: &ServiceLine) -> Result<(), LineValidationError> {
    if line.quantity < 1 {
        return Err(LineValidationError::InvalidQuantity);
    }
    if !line.unit_price.is_finite() || line.unit_price < 0.0 {
        return Err(LineValidationError::InvalidPrice);
    }
    if line.description.trim().is_empty() {
        return Err(LineValidationError::EmptyDescription);
    }
    Ok(())
}

/// A rejected line with its position in the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIssue {
    pub index: usize,
    pub error: LineValidationError,
}

/// Validate every line, collecting all failures instead of stopping
/// at the first one.
pub fn validate_services(services: &[ServiceLine]) -> Result<(), Vec<LineIssue>> {
    let issues: Vec<LineIssue> = services
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            validate_service_line(line)
                .err()
                .map(|error| LineIssue { index, error })
        })
        .collect();
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
