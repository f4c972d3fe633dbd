//! Persistent storage for the validated API key

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Error;

/// Where a validated key is kept between sessions
pub trait KeyStore: Send + Sync {
    /// The stored key, if any
    fn load(&self) -> Result<Option<String>, Error>;

    /// Remember `key`
    fn save(&self, key: &str) -> Result<(), Error>;

    /// Forget the stored key
    fn clear(&self) -> Result<(), Error>;
}

/// Key storage that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    key: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `key`
    pub fn with_key(key: &str) -> Self {
        Self { key: Mutex::new(Some(key.to_string())) }
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> Result<Option<String>, Error> {
        let key = self.key.lock().map_err(|_| Error::general("key store lock poisoned"))?;
        Ok(key.clone())
    }

    fn save(&self, key: &str) -> Result<(), Error> {
        let mut current = self.key.lock().map_err(|_| Error::general("key store lock poisoned"))?;
        *current = Some(key.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        let mut current = self.key.lock().map_err(|_| Error::general("key store lock poisoned"))?;
        *current = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredKey {
    inventory_api_key: String,
}

/// Key storage backed by a small JSON file
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> Result<Option<String>, Error> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let stored: StoredKey = serde_json::from_slice(&bytes)?;
                Ok(Some(stored.inventory_api_key))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredKey { inventory_api_key: key.to_string() };
        fs::write(&self.path, serde_json::to_vec_pretty(&stored)?)?;
        debug!("Stored API key in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
