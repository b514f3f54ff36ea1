//! Key-value state storage. The dashboard kept everything in string-keyed storage; this module
//! puts that behind [`StateStore`] so the rest of the crate can run against memory in tests or a
//! file on disk.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::enums::StoreKey;
use crate::error::StoreError;

/// String-keyed storage for persisted state.
pub trait StateStore: Send {
    /// Gets the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
    
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
    
    /// Writes any pending changes to the backing medium. Stores with nothing to write can rely on
    /// the default.
    fn persist(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
    
    /// Gets the value for a [`StoreKey`].
    fn get_key(&self, key: StoreKey) -> Option<String> {
        self.get(key.as_str())
    }
    
    /// Sets the value for a [`StoreKey`].
    fn set_key(&mut self, key: StoreKey, value: String) {
        self.set(key.as_str(), value)
    }
}
