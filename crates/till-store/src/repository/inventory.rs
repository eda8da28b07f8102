//! # Inventory Repository
//!
//! inventory.json is read and written whole. Callers take a snapshot, work
//! on it with till-core, and replace the file with the result.

use tracing::debug;

use till_core::{CoreResult, Inventory};

use crate::error::StoreResult;
use crate::json_file::JsonFile;

/// Repository for component stock counts.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    file: JsonFile,
}

impl InventoryRepository {
    pub fn new(file: JsonFile) -> Self {
        InventoryRepository { file }
    }

    /// Current counts as stored.
    pub fn snapshot(&self) -> StoreResult<Inventory> {
        let inventory: Inventory = self.file.load_or_default()?;
        debug!(components = inventory.len(), "Inventory snapshot read");
        Ok(inventory)
    }

    /// Overwrites the stored counts.
    pub fn replace(&self, inventory: &Inventory) -> StoreResult<()> {
        debug!(components = inventory.len(), "Replacing inventory");
        self.file.save(inventory)
    }

    /// Reads a snapshot, derives the next inventory from it and writes that
    /// back. Nothing is written when `f` fails.
    ///
    /// Returns `(snapshot, next)`; the snapshot is what a caller writes back
    /// to undo the update.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let (before, after) = store
    ///     .inventory()
    ///     .update(|snapshot| reserve(&catalog, snapshot, &selection))?;
    /// ```
    pub fn update<F>(&self, f: F) -> StoreResult<(Inventory, Inventory)>
    where
        F: FnOnce(&Inventory) -> CoreResult<Inventory>,
    {
        let snapshot = self.snapshot()?;
        let next = f(&snapshot)?;
        self.replace(&next)?;
        Ok((snapshot, next))
    }

    pub fn exists(&self) -> bool {
        self.file.exists()
    }
}
