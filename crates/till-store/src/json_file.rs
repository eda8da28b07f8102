//! # JSON File Access
//!
//! The one place that touches the file system.
//!
//! ## Write Path
//! ```text
//! save(value)
//!     │
//!     ├── create_dir_all(parent)
//!     ├── serialize (pretty, trailing newline)
//!     ├── write  orders.json.tmp
//!     └── rename orders.json.tmp → orders.json
//! ```
//!
//! A reader therefore sees either the old file or the new one, never half
//! of each.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads and parses the document. A missing or blank file yields
    /// `T::default()`.
    pub fn load_or_default<T>(&self) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "File missing, using empty default");
                return Ok(T::default());
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        if text.trim().is_empty() {
            debug!(path = %self.path.display(), "File empty, using empty default");
            return Ok(T::default());
        }

        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrites the document with `value`, pretty printed.
    pub fn save<T>(&self, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
            }
        }

        let mut text = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;
        text.push('\n');

        let staging = self.staging_path();
        fs::write(&staging, text).map_err(|err| StoreError::io(&staging, err))?;
        fs::rename(&staging, &self.path).map_err(|err| StoreError::io(&self.path, err))?;

        debug!(path = %self.path.display(), "File written");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
