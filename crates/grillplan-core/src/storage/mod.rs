//! Durable storage: TOML configuration and the SQLite history database.

mod config;
pub mod database;

pub use config::{Config, DisplayConfig, NotificationsConfig};
pub use database::{CookRecord, CookStats, Database};

use std::path::PathBuf;

use crate::error::DatabaseError;

/// Durable key-value slot, as used for the custom item catalog.
///
/// [`Database`] implements this over its `kv` table; tests substitute an
/// in-memory map.
pub trait KvStore {
    /// Read one slot. `Ok(None)` means the key has never been written.
    fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError>;

    /// Write one slot, replacing any previous value.
    fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError>;
}

/// Returns `~/.config/grillplan[-dev]/` based on GRILLPLAN_ENV.
///
/// Set GRILLPLAN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GRILLPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("grillplan-dev")
    } else {
        base_dir.join("grillplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
