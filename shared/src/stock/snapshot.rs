//! Inventory item snapshot - client-local mirror of one SKU

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days ahead of expiry at which an item counts as expiring soon
pub const EXPIRY_LOOKAHEAD_DAYS: i64 = 30;

/// Client-local mirror of one stock-keeping unit
///
/// The authoritative quantity is server-side; this copy is a cache
/// refreshed on screen load and reconciled after each deduction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemSnapshot {
    /// Stable across sessions
    pub item_id: String,
    pub name: String,
    /// Non-negative; fractional units allowed (e.g. ml of gel)
    pub quantity: f64,
    /// Low-stock threshold
    #[serde(default)]
    pub min_stock_level: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Last update timestamp (Unix millis)
    pub updated_at: i64,
}

impl ItemSnapshot {
    pub fn new(item_id: impl Into<String>, name: impl Into<String>, quantity: f64) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity: quantity.max(0.0),
            min_stock_level: 0.0,
            unit: None,
            expiry_date: None,
            updated_at: crate::util::now_millis(),
        }
    }

    /// At or below the configured minimum threshold
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    fn parsed_expiry(&self) -> Option<NaiveDate> {
        self.expiry_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Already past its expiry date
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.parsed_expiry().is_some_and(|d| d < today)
    }

    /// Expires within the fixed lookahead window (not yet expired)
    pub fn is_expiring_soon(&self, today: NaiveDate) -> bool {
        self.parsed_expiry().is_some_and(|d| {
            let days = (d - today).num_days();
            (0..=EXPIRY_LOOKAHEAD_DAYS).contains(&days)
        })
    }
}
