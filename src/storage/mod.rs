// src/storage/mod.rs
//! Durable key-value storage behind the message cache.
//!
//! Keys and values are plain strings, the same contract a browser's local
//! storage offers. Message tables are stored as JSON text under their table
//! name, single resolved codes as raw text under `{category}_{CODE}`.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::prelude::*;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// Opens the store named by the config, falling back to memory when no path is set.
pub fn open_configured(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match &config.storage.path {
        Some(raw) => {
            let path = crate::core::helpers::resolve_storage_path(raw)?;
            log::debug!("Message cache file: {}", path.display());
            Ok(Arc::new(FileStore::open(path)?))
        }
        None => {
            log::debug!("Message cache kept in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
