//! # till-core: Pure Business Logic for Till POS
//!
//! Pricing, availability and inventory reservation for a counter-service
//! fast-food outlet, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 till-console (conversation loop)                │   │
//! │  │     Name ──► Menu ──► Quantity ──► Payment ──► Receipt          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐   │   │
//! │  │  │availability│ │  pricing   │ │reservation │ │ validation │   │   │
//! │  │  │ max qty    │ │ discounts  │ │ snapshot − │ │ name, qty, │   │   │
//! │  │  │ per item   │ │ gross/net  │ │ recipe     │ │ payment    │   │   │
//! │  │  └────────────┘ └────────────┘ └────────────┘ └────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  till-store (JSON files)                        │   │
//! │  │         products.json, inventory.json, orders.json              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog, Inventory, Selection, Order, PaymentMethod
//! - [`money`] - Money type with integer arithmetic
//! - [`availability`] - Which items can be sold, and how many
//! - [`pricing`] - Gross, discount rate, net
//! - [`reservation`] - Inventory after an order, checked against a snapshot
//! - [`validation`] - Input and catalog validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::availability::max_purchasable;
//! use till_core::reservation::reserve;
//! use till_core::{Catalog, CatalogItem, Inventory, Money, Selection};
//!
//! let catalog = Catalog::new().with_item(
//!     "Burger",
//!     CatalogItem::new(Money::from_cents(10000))
//!         .with_component("bun", 1)
//!         .with_component("patty", 1),
//! );
//! let inventory = Inventory::new().with("bun", 5).with("patty", 3);
//!
//! assert_eq!(max_purchasable(&catalog, &inventory, "Burger"), Some(3));
//!
//! let after = reserve(&catalog, &inventory, &Selection::new().with("Burger", 2))?;
//! assert_eq!(after.count("patty"), 1);
//! # Ok::<(), till_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod error;
pub mod money;
pub mod pricing;
pub mod reservation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use pricing::{compute_order, DiscountPolicy, LoyaltyMode, Quote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Basis points in one whole (100%).
pub const BPS_SCALE: u32 = 10_000;

/// Maximum quantity of a single item per order.
///
/// ## Business Reason
/// Caps items with an empty recipe, which the inventory never limits, and
/// catches a slipped finger (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Highest catalog price accepted, in minor units (100,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;
