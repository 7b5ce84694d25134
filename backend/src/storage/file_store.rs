use anyhow::{anyhow, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::keys::StorageKey;
use super::traits::KeyValueStorage;

/// FileStore keeps each key in its own `<key>.json` file under a data directory
#[derive(Clone)]
pub struct FileStore {
    base_directory: PathBuf,
    /// Serializes writers so a rename never races another write of the same key
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Create a new file store, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !StorageKey::is_valid(key) {
            return Err(anyhow!("Invalid storage key: {:?}", key));
        }
        Ok(self.base_directory.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("File store lock poisoned"))?;

        // Atomic write using temp file
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("File store lock poisoned"))?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed key {}", key);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_directory)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if StorageKey::is_valid(stem) {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
