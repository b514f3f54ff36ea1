use super::StateStore;
use crate::error::StoreError;
use crate::helpers::{default_data_directory, write_file_atomic};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

const STATE_FILENAME: &str = "state.json";

/// A [`StateStore`] backed by a single JSON object on disk. Values are held in memory and only
/// written out on [`StateStore::persist`] when something has changed.
#[derive(Debug)]
pub struct FileStore {
    filepath: PathBuf,
    values: HashMap<String, String>,
    /// Whether the values have changed since the last write. Used for reducing file writes.
    changed: bool,
}

impl FileStore {
    /// Opens the store at `filepath`. A missing file is an empty store. A file that can't be
    /// parsed is logged and replaced with an empty store on the next write.
    pub fn open<P>(filepath: P) -> Result<Self, StoreError>
    where
        P: Into<PathBuf>,
    {
        let filepath: PathBuf = filepath.into();
        let values = match fs::read_to_string(&filepath) {
            Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                Ok(values) => values,
                Err(error) => {
                    log::warn!("State file {} is corrupt, starting empty: {error}", filepath.display());
                    HashMap::new()
                },
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => return Err(error.into()),
        };
        
        Ok(Self {
            filepath,
            values,
            changed: false,
        })
    }
    
    /// Opens the store in the platform's data directory, creating the directory if needed.
    pub fn open_default() -> Result<Self, StoreError> {
        let data_directory = default_data_directory()
            .ok_or(StoreError::NoDataDirectory)?;
        
        fs::create_dir_all(&data_directory)?;
        
        Self::open(data_directory.join(STATE_FILENAME))
    }
    
    /// The path of the backing file.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
    
    fn set(&mut self, key: &str, value: String) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_owned(), value);
            self.changed = true;
        }
    }
    
    fn persist(&mut self) -> Result<(), StoreError> {
        if !self.changed {
            return Ok(());
        }
        
        let data = serde_json::to_string(&self.values)?;
        
        write_file_atomic(&self.filepath, data.as_bytes())?;
        // Only cleared once written so a failed write is retried on the next persist.
        self.changed = false;
        
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::StoreKey;
    
    fn test_filepath(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dupe-alert-{}-{name}.json", std::process::id()))
    }
    
    #[test]
    fn missing_file_is_empty() {
        let store = FileStore::open(test_filepath("missing")).unwrap();
        
        assert_eq!(store.get("oldOffers"), None);
    }
    
    #[test]
    fn persists_and_reloads() {
        let filepath = test_filepath("reload");
        let mut store = FileStore::open(&filepath).unwrap();
        
        store.set_key(StoreKey::KnownOffers, r#"["12"]"#.into());
        store.persist().unwrap();
        
        let store = FileStore::open(&filepath).unwrap();
        
        assert_eq!(store.get_key(StoreKey::KnownOffers).as_deref(), Some(r#"["12"]"#));
        
        let _ = fs::remove_file(&filepath);
    }
    
    #[test]
    fn corrupt_file_starts_empty() {
        let filepath = test_filepath("corrupt");
        
        fs::write(&filepath, "{not json").unwrap();
        
        let store = FileStore::open(&filepath).unwrap();
        
        assert_eq!(store.get("knownOffers"), None);
        
        let _ = fs::remove_file(&filepath);
    }
    
    #[test]
    fn skips_write_when_unchanged() {
        let filepath = test_filepath("unchanged");
        let mut store = FileStore::open(&filepath).unwrap();
        
        store.persist().unwrap();
        
        assert!(!filepath.exists());
    }
}
