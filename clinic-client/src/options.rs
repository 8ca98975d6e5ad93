//! Custom dropdown options
//!
//! Inventory forms offer built-in choices for category, unit and
//! supplier; staff can extend them with their own entries. Built-ins
//! are compiled in, custom entries live in local JSON storage and
//! survive restarts. Only custom entries can be removed.

use crate::{ClientResult, JsonStore};
use shared::AppError;

/// Which dropdown a custom option belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Category,
    Unit,
    Supplier,
}

impl OptionKind {
    /// Storage key for the custom entries of this dropdown
    pub fn storage_key(&self) -> &'static str {
        match self {
            OptionKind::Category => "custom_categories",
            OptionKind::Unit => "custom_units",
            OptionKind::Supplier => "custom_suppliers",
        }
    }

    /// Built-in choices, always present
    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            OptionKind::Category => &[
                "Consumable",
                "Medication",
                "Laser Supply",
                "Skincare Product",
                "Equipment",
            ],
            OptionKind::Unit => &["piece", "box", "bottle", "tube", "ml", "g"],
            OptionKind::Supplier => &[],
        }
    }
}

/// Dropdown option lists backed by local storage
#[derive(Debug, Clone)]
pub struct DropdownOptions {
    store: JsonStore,
}

impl DropdownOptions {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Custom entries only, in insertion order
    pub fn custom(&self, kind: OptionKind) -> Vec<String> {
        self.store
            .get::<Vec<String>>(kind.storage_key())
            .unwrap_or_default()
    }

    /// Full list for the dropdown: built-ins first, then custom entries
    pub fn list(&self, kind: OptionKind) -> Vec<String> {
        let mut options: Vec<String> =
            kind.defaults().iter().map(|s| s.to_string()).collect();
        for custom in self.custom(kind) {
            if !options.contains(&custom) {
                options.push(custom);
            }
        }
        options
    }

    /// Add a custom entry. Whitespace is trimmed, empty values are
    /// rejected, duplicates of any existing option are ignored.
    pub fn add(&self, kind: OptionKind, value: &str) -> ClientResult<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::validation("Option must not be empty").into());
        }

        if kind.defaults().iter().any(|d| *d == value) {
            return Ok(());
        }

        let mut custom = self.custom(kind);
        if custom.iter().any(|c| c == value) {
            return Ok(());
        }
        custom.push(value.to_string());
        self.store.set(kind.storage_key(), &custom)?;
        Ok(())
    }

    /// Remove a custom entry. Built-ins are untouchable; removing an
    /// unknown value is a no-op. Returns whether anything was removed.
    pub fn remove(&self, kind: OptionKind, value: &str) -> ClientResult<bool> {
        let mut custom = self.custom(kind);
        let before = custom.len();
        custom.retain(|c| c != value);
        if custom.len() == before {
            return Ok(false);
        }
        self.store.set(kind.storage_key(), &custom)?;
        Ok(true)
    }
}
