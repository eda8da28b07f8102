//! # till-store: Persistence Layer for Till POS
//!
//! Keeps the catalog, the inventory and the order ledger in three flat JSON
//! files, and runs the checkout transaction over them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Data Flow                               │
//! │                                                                         │
//! │  Console session (checkout)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Store      │    │ Repositories  │    │   JsonFile   │   │   │
//! │  │   │  (store.rs)   │    │               │    │              │   │   │
//! │  │   │               │    │ CatalogRepo   │    │ load/default │   │   │
//! │  │   │ checkout()    │───►│ InventoryRepo │───►│ save/rename  │   │   │
//! │  │   │ Mutex         │    │ LedgerRepo    │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products.json   inventory.json   orders.json                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `StoreConfig`, `Store` and checkout
//! - [`repository`] - Catalog, inventory and ledger repositories
//! - [`json_file`] - File reads and atomic writes
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use till_store::{CheckoutRequest, Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("./data"))?;
//! let menu = store.available_items()?;
//! let order = store.checkout(&request, &policy)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod json_file;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFile;
pub use store::{CheckoutRequest, Store, StoreConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::ledger::LedgerRepository;
