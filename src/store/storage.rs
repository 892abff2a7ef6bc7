//! Key/value record storage used by the player store.
//!
//! Backends store whole serialized records as strings. Encoding is the
//! store's job, not the backend's.

use crate::core::constants::DATA_DIR_NAME;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub trait Storage {
    /// Read the record stored under `key`. `Ok(None)` means no record exists.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the record stored under `key`.
    fn write(&mut self, key: &str, data: &str) -> io::Result<()>;
}

/// Stores each record as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `~/.pokeplay/`, created if needed.
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::with_dir(home_dir.join(DATA_DIR_NAME))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, data: &str) -> io::Result<()> {
        fs::write(self.path_for(key), data)
    }
}

/// In-process storage. Clones share the same records, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, data: impl Into<String>) {
        self.records.borrow_mut().insert(key.to_string(), data.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.records.borrow_mut().remove(key)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, data: &str) -> io::Result<()> {
        self.insert(key, data);
        Ok(())
    }
}
