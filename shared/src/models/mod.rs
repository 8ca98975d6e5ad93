//! Data models
//!
//! Shared between the client crate and the backend API. Monetary
//! fields are `f64` on the wire; all arithmetic goes through
//! `billing::money` for decimal precision.

pub mod dashboard;
pub mod diagnosis;
pub mod inventory;
pub mod invoice;
pub mod patient;

// Re-exports
pub use dashboard::*;
pub use diagnosis::*;
pub use inventory::*;
pub use invoice::*;
pub use patient::*;
