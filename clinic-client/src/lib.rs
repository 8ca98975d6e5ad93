//! Clinic client
//!
//! Thin client layer over the clinic backend REST API: configuration,
//! HTTP wrappers, the inventory application-state store with its
//! optimistic use-stock command pipeline, and local JSON storage for
//! custom dropdown options.

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod storage;
pub mod store;

pub use commands::{StockBackend, StockService};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use options::{DropdownOptions, OptionKind};
pub use storage::JsonStore;
pub use store::InventoryStore;
