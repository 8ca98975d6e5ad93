//! Unified error system for the clinic client
//!
//! Error codes are `u16` values organized by range so the frontend,
//! the client crate and the backend envelope can agree on them:
//! - 0xxx: General errors
//! - 4xxx: Invoice errors
//! - 5xxx: Payment errors
//! - 6xxx: Inventory errors
//! - 9xxx: Backend/system errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// Represented as `u16` for efficient serialization and
/// cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Invoice ====================
    /// Service line quantity below 1 or non-numeric
    InvalidQuantity = 4001,
    /// Service line unit price negative or non-numeric
    InvalidPrice = 4002,
    /// Service line description is blank
    EmptyDescription = 4003,
    /// Invoice is no longer a draft and cannot be edited
    InvoiceNotDraft = 4004,
    /// Requested payment-status transition is not allowed
    InvalidStatusTransition = 4005,
    /// Reverting a paid invoice requires a reason
    ReasonRequired = 4006,

    // ==================== 5xxx: Payment ====================
    /// Nothing is due on this invoice
    NothingDue = 5001,
    /// Invoice has already been paid
    AlreadyPaid = 5002,

    // ==================== 6xxx: Inventory ====================
    /// Inventory item not found in the local cache
    ItemNotFound = 6001,
    /// Requested use-quantity exceeds available stock
    InsufficientStock = 6002,
    /// A command for this item is already in flight
    DuplicateCommand = 6003,
    /// Some deductions in a batch failed
    PartialFailure = 6004,

    // ==================== 9xxx: Backend/System ====================
    /// Backend call failed (network, non-2xx, bad envelope)
    BackendError = 9001,
    /// Local storage read/write failed
    StorageError = 9002,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidQuantity => "Quantity must be at least 1",
            Self::InvalidPrice => "Unit price must be a non-negative number",
            Self::EmptyDescription => "Description must not be blank",
            Self::InvoiceNotDraft => "Invoice is not editable",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::ReasonRequired => "A reason is required",
            Self::NothingDue => "Nothing is due on this invoice",
            Self::AlreadyPaid => "Invoice has already been paid",
            Self::ItemNotFound => "Inventory item not found",
            Self::InsufficientStock => "Insufficient stock",
            Self::DuplicateCommand => "Operation already in progress",
            Self::PartialFailure => "Some deductions failed",
            Self::BackendError => "Backend request failed",
            Self::StorageError => "Local storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when converting an unknown `u16` to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            5 => Self::InvalidRequest,
            4001 => Self::InvalidQuantity,
            4002 => Self::InvalidPrice,
            4003 => Self::EmptyDescription,
            4004 => Self::InvoiceNotDraft,
            4005 => Self::InvalidStatusTransition,
            4006 => Self::ReasonRequired,
            5001 => Self::NothingDue,
            5002 => Self::AlreadyPaid,
            6001 => Self::ItemNotFound,
            6002 => Self::InsufficientStock,
            6003 => Self::DuplicateCommand,
            6004 => Self::PartialFailure,
            9001 => Self::BackendError,
            9002 => Self::StorageError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", *self as u16)
    }
}

/// Rich application error with code, message and optional details
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("[{code}] {message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Structured context (e.g. which item failed), for UI messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Create an error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Create an error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a structured detail value
    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        let map = self
            .details
            .get_or_insert_with(|| serde_json::Value::Object(Default::default()));
        if let serde_json::Value::Object(obj) = map {
            obj.insert(key.to_string(), value.into());
        }
        self
    }

    // ========== Convenient constructors ==========

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource))
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BackendError, message)
    }

    /// Insufficient stock for a named item
    pub fn insufficient_stock(item_name: impl Into<String>) -> Self {
        let name = item_name.into();
        Self::with_message(
            ErrorCode::InsufficientStock,
            format!("Insufficient stock for {}", name),
        )
        .with_detail("item", name)
    }
}

/// Result type for domain operations
pub type AppResult<T> = Result<T, AppError>;
