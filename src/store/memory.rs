use super::StateStore;
use std::collections::HashMap;

/// A [`StateStore`] kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// The number of times `set` has been called.
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// The number of writes made to this store.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
    
    fn set(&mut self, key: &str, value: String) {
        self.writes += 1;
        self.values.insert(key.to_owned(), value);
    }
}
