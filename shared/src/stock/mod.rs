//! Optimistic stock ledger
//!
//! Client-side mirror of inventory quantities. A "use" action is
//! applied locally first for responsiveness, then reconciled against
//! the backend confirmation: commit adopts the server quantity,
//! rollback restores the pre-use value. The server owns the truth;
//! this cache is advisory.

pub mod ledger;
pub mod snapshot;
pub mod types;

pub use ledger::StockLedger;
pub use snapshot::{EXPIRY_LOOKAHEAD_DAYS, ItemSnapshot};
pub use types::{DeductionFailure, DeductionReport};
