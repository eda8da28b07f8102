//! # Repository Module
//!
//! File-backed repositories for Till POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Console session                                                        │
//! │       │                                                                 │
//! │       │  store.inventory().snapshot()                                   │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                    │
//! │  ├── snapshot(&self)                                                    │
//! │  ├── replace(&self, inventory)                                          │
//! │  └── update(&self, f)                                                   │
//! │       │                                                                 │
//! │       │  JsonFile                                                       │
//! │       ▼                                                                 │
//! │  inventory.json                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`] - products.json, validated on load
//! - [`InventoryRepository`] - inventory.json, whole-file snapshots
//! - [`LedgerRepository`] - orders.json, append-only

pub mod catalog;
pub mod inventory;
pub mod ledger;

pub use catalog::CatalogRepository;
pub use inventory::InventoryRepository;
pub use ledger::LedgerRepository;
