//! # Catalog Repository
//!
//! Reads and writes products.json:
//!
//! ```json
//! {
//!   "Zinger Burger": {
//!     "price_cents": 55000,
//!     "discount_bps": 1000,
//!     "components": { "bun": 1, "zinger_fillet": 1 }
//!   }
//! }
//! ```

use tracing::debug;

use till_core::validation::validate_catalog_item;
use till_core::Catalog;

use crate::error::{StoreError, StoreResult};
use crate::json_file::JsonFile;

/// Repository for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    file: JsonFile,
}

impl CatalogRepository {
    pub fn new(file: JsonFile) -> Self {
        CatalogRepository { file }
    }

    /// Loads the catalog and rejects the first entry that breaks the rules
    /// (negative price, discount over 100%, zero recipe count).
    pub fn load(&self) -> StoreResult<Catalog> {
        let catalog: Catalog = self.file.load_or_default()?;

        for (name, item) in catalog.iter() {
            validate_catalog_item(name, item).map_err(|source| StoreError::InvalidCatalog {
                item: name.clone(),
                source,
            })?;
        }

        debug!(items = catalog.len(), path = %self.file.path().display(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        self.file.save(catalog)
    }

    pub fn exists(&self) -> bool {
        self.file.exists()
    }
}
