//! Shared types for the clinic client
//!
//! Framework-free domain layer used by the client crate: data models,
//! invoice calculation, the optimistic stock ledger, error types and
//! the backend response envelope. No I/O happens in this crate.

pub mod billing;
pub mod error;
pub mod models;
pub mod response;
pub mod stock;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiEnvelope;
pub use serde::{Deserialize, Serialize};
