//! Local JSON storage
//!
//! One file per key under a base directory. Reads degrade to `None`
//! on missing or unreadable files so UI paths never fail on a corrupt
//! local cache.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store backed by JSON files
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ensure the base directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load a value, or `None` if absent or unreadable
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        let json = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Persist a value under the key
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), json)
    }

    /// Delete the value stored under the key
    pub fn remove(&self, key: &str) -> std::io::Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Check whether a value exists for the key
    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Get the base directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
