//! # Store
//!
//! Opens the data directory and runs checkouts.
//!
//! ## Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store::checkout (one critical section)               │
//! │                                                                         │
//! │   lock ──► name = normalize_customer_name(request)                     │
//! │            prior = ledger.count_by_customer(name)                      │
//! │              │                                                          │
//! │              ▼                                                          │
//! │            quote = compute_order(catalog, policy, selection, prior)    │
//! │              │                                                          │
//! │              ▼                                                          │
//! │            inventory.update(|snapshot| reserve(catalog, snapshot, ..)) │
//! │              │  (writes the reserved counts, hands back the snapshot)  │
//! │              ▼                                                          │
//! │            ledger.append(order) ──fails──► inventory.replace(snapshot) │
//! │              │                                                          │
//! │              ▼                                                          │
//! │            unlock, return Order                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any failure leaves the files as they were before the call.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use till_core::availability::{list_available_items, AvailableItem};
use till_core::reservation::reserve;
use till_core::validation::normalize_customer_name;
use till_core::{
    compute_order, Catalog, CoreError, DiscountPolicy, Order, PaymentMethod, Selection,
    ValidationError,
};

use crate::error::StoreResult;
use crate::json_file::JsonFile;
use crate::repository::{CatalogRepository, InventoryRepository, LedgerRepository};

// =============================================================================
// Configuration
// =============================================================================

pub const DEFAULT_PRODUCTS_FILE: &str = "products.json";
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";
pub const DEFAULT_ORDERS_FILE: &str = "orders.json";

/// Where the store keeps its files.
///
/// ## Example
/// ```rust
/// use till_store::StoreConfig;
///
/// let config = StoreConfig::new("./data").orders_file("ledger.json");
/// assert!(config.orders_path().ends_with("ledger.json"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the three files.
    pub data_dir: PathBuf,
    /// Default: products.json
    pub products_file: String,
    /// Default: inventory.json
    pub inventory_file: String,
    /// Default: orders.json
    pub orders_file: String,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            products_file: DEFAULT_PRODUCTS_FILE.to_string(),
            inventory_file: DEFAULT_INVENTORY_FILE.to_string(),
            orders_file: DEFAULT_ORDERS_FILE.to_string(),
        }
    }

    pub fn products_file(mut self, name: impl Into<String>) -> Self {
        self.products_file = name.into();
        self
    }

    pub fn inventory_file(mut self, name: impl Into<String>) -> Self {
        self.inventory_file = name.into();
        self
    }

    pub fn orders_file(mut self, name: impl Into<String>) -> Self {
        self.orders_file = name.into();
        self
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(&self.inventory_file)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(&self.orders_file)
    }
}

// =============================================================================
// Checkout Request
// =============================================================================

/// Everything a checkout needs from the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Canonical (uppercased) name.
    pub customer_name: String,
    pub selection: Selection,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Store
// =============================================================================

/// Handle over the data directory.
///
/// The catalog is read and validated once in [`Store::open`] and stays fixed
/// for the lifetime of the handle. Inventory and ledger are read fresh on
/// every call.
#[derive(Debug)]
pub struct Store {
    catalog: Catalog,
    inventory: InventoryRepository,
    ledger: LedgerRepository,
    checkout_lock: Mutex<()>,
}

impl Store {
    /// Opens the store and loads the catalog.
    ///
    /// ## Returns
    /// * `Ok(Store)` - ready to serve
    /// * `Err(StoreError)` - products.json unreadable, malformed or invalid
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening store");

        let products = CatalogRepository::new(JsonFile::new(config.products_path()));
        if !products.exists() {
            warn!(path = %config.products_path().display(), "No products file, catalog is empty");
        }
        let catalog = products.load()?;

        info!(items = catalog.len(), "Catalog loaded");

        Ok(Store {
            inventory: InventoryRepository::new(JsonFile::new(config.inventory_path())),
            ledger: LedgerRepository::new(JsonFile::new(config.orders_path())),
            catalog,
            checkout_lock: Mutex::new(()),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inventory(&self) -> &InventoryRepository {
        &self.inventory
    }

    pub fn ledger(&self) -> &LedgerRepository {
        &self.ledger
    }

    /// Items that can be sold against the current inventory.
    pub fn available_items(&self) -> StoreResult<Vec<AvailableItem>> {
        let snapshot = self.inventory.snapshot()?;
        Ok(list_available_items(&self.catalog, &snapshot))
    }

    /// Prices, reserves and records one order.
    ///
    /// ## Errors
    /// - `Core(Validation)` - empty selection or a malformed customer name
    /// - `Core(UnknownItem)` - selection names an item not on the catalog
    /// - `Core(InsufficientStock | ComponentShortfall | InvalidQuantity)` -
    ///   inventory changed since the menu was shown, or a bad quantity
    /// - `Io` / `Parse` / `Serialize` - file trouble; inventory is restored
    pub fn checkout(
        &self,
        request: &CheckoutRequest,
        policy: &DiscountPolicy,
    ) -> StoreResult<Order> {
        let _guard = self
            .checkout_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if request.selection.is_empty() {
            return Err(CoreError::from(ValidationError::Required {
                field: "items".to_string(),
            })
            .into());
        }

        let customer_name =
            normalize_customer_name(&request.customer_name).map_err(CoreError::from)?;
        let prior_orders = self.ledger.count_by_customer(&customer_name)?;
        let quote = compute_order(
            &self.catalog,
            policy,
            &request.selection,
            request.payment_method,
            prior_orders,
        )?;
        if quote.is_inverted() {
            warn!(
                discount_bps = quote.discount_rate.bps(),
                net_cents = quote.net.cents(),
                "Discount rate exceeds 100%, net is negative"
            );
        }

        let (snapshot, _) = self
            .inventory
            .update(|snapshot| reserve(&self.catalog, snapshot, &request.selection))?;

        let order = Order::new(
            Uuid::new_v4().to_string(),
            customer_name,
            &request.selection,
            request.payment_method,
            &quote,
            Utc::now(),
        );

        if let Err(err) = self.ledger.append(&order) {
            warn!(error = %err, "Ledger write failed, restoring inventory");
            if let Err(restore_err) = self.inventory.replace(&snapshot) {
                error!(error = %restore_err, "Inventory restore failed");
            }
            return Err(err);
        }

        info!(
            order_id = %order.id,
            customer = %order.customer_name,
            units = order.items.len(),
            prior_orders,
            discount_bps = order.discount_bps,
            net_cents = order.net_cents,
            "Order completed"
        );

        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::fs;
    use tempfile::TempDir;
    use till_core::{CatalogItem, DiscountRate, ErrorKind, Inventory, Money};

    fn seeded(dir: &TempDir) -> Store {
        let config = StoreConfig::new(dir.path());
        let catalog = Catalog::new()
            .with_item(
                "Burger",
                CatalogItem::new(Money::from_cents(10000))
                    .with_discount(DiscountRate::from_bps(1000))
                    .with_component("bun", 1)
                    .with_component("patty", 1),
            )
            .with_item(
                "Wrap",
                CatalogItem::new(Money::from_cents(8000))
                    .with_component("bun", 1)
                    .with_component("lettuce", 2),
            );
        CatalogRepository::new(JsonFile::new(config.products_path()))
            .save(&catalog)
            .unwrap();
        InventoryRepository::new(JsonFile::new(config.inventory_path()))
            .replace(&Inventory::new().with("bun", 5).with("patty", 3).with("lettuce", 10))
            .unwrap();
        Store::open(config).unwrap()
    }

    fn request(name: &str, selection: Selection, method: PaymentMethod) -> CheckoutRequest {
        CheckoutRequest {
            customer_name: name.to_string(),
            selection,
            payment_method: method,
        }
    }

    #[test]
    fn test_config_paths() {
        let config = StoreConfig::new("/srv/till").inventory_file("stock.json");
        assert_eq!(config.products_path(), PathBuf::from("/srv/till/products.json"));
        assert_eq!(config.inventory_path(), PathBuf::from("/srv/till/stock.json"));
        assert_eq!(config.orders_path(), PathBuf::from("/srv/till/orders.json"));
    }

    #[test]
    fn test_first_card_checkout() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);

        let order = store
            .checkout(
                &request("JANE DOE", Selection::new().with("Burger", 2), PaymentMethod::Card),
                &DiscountPolicy::default(),
            )
            .unwrap();

        assert_eq!(order.gross_cents, 18000);
        assert_eq!(order.discount_bps, 500);
        assert_eq!(order.net_cents, 17100);
        assert_eq!(order.items, vec!["Burger", "Burger"]);

        let inventory = store.inventory().snapshot().unwrap();
        assert_eq!(inventory.count("bun"), 3);
        assert_eq!(inventory.count("patty"), 1);
        assert_eq!(store.ledger().count_by_customer("JANE DOE").unwrap(), 1);
    }

    #[test]
    fn test_returning_customer_gets_returning_rate() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        let policy = DiscountPolicy::default();

        store
            .checkout(&request("ALI", Selection::new().with("Wrap", 1), PaymentMethod::Cash), &policy)
            .unwrap();
        let second = store
            .checkout(&request("ALI", Selection::new().with("Wrap", 1), PaymentMethod::Cash), &policy)
            .unwrap();

        assert_eq!(second.discount_bps, 270);
    }

    #[test]
    fn test_customer_name_is_stored_canonical() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        let policy = DiscountPolicy::default();

        let first = store
            .checkout(&request("Ali", Selection::new().with("Wrap", 1), PaymentMethod::Cash), &policy)
            .unwrap();
        let second = store
            .checkout(&request(" ali ", Selection::new().with("Wrap", 1), PaymentMethod::Cash), &policy)
            .unwrap();

        assert_eq!(first.customer_name, "ALI");
        assert_eq!(second.discount_bps, 270);
        assert_eq!(store.ledger().count_by_customer("Ali").unwrap(), 2);
    }

    #[test]
    fn test_malformed_customer_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        let before = store.inventory().snapshot().unwrap();

        let err = store
            .checkout(
                &request("R2D2", Selection::new().with("Wrap", 1), PaymentMethod::Cash),
                &DiscountPolicy::default(),
            )
            .unwrap_err();

        assert_eq!(err.as_core().map(CoreError::kind), Some(ErrorKind::Validation));
        assert_eq!(store.inventory().snapshot().unwrap(), before);
    }

    #[test]
    fn test_over_request_leaves_files_untouched() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        let before = store.inventory().snapshot().unwrap();

        let err = store
            .checkout(
                &request("JANE DOE", Selection::new().with("Burger", 4), PaymentMethod::Card),
                &DiscountPolicy::default(),
            )
            .unwrap_err();

        assert_eq!(err.as_core().map(CoreError::kind), Some(ErrorKind::InsufficientStock));
        assert_eq!(store.inventory().snapshot().unwrap(), before);
        assert!(store.ledger().all().unwrap().is_empty());
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);

        let err = store
            .checkout(
                &request("JANE DOE", Selection::new(), PaymentMethod::Cash),
                &DiscountPolicy::default(),
            )
            .unwrap_err();

        assert_eq!(err.as_core().map(CoreError::kind), Some(ErrorKind::Validation));
    }

    #[test]
    fn test_ledger_failure_restores_inventory() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        let before = store.inventory().snapshot().unwrap();

        // a directory where the ledger's staging file should go makes the write fail
        fs::create_dir(dir.path().join("orders.json.tmp")).unwrap();

        let err = store
            .checkout(
                &request("JANE DOE", Selection::new().with("Burger", 1), PaymentMethod::Card),
                &DiscountPolicy::default(),
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.inventory().snapshot().unwrap(), before);
        assert!(store.ledger().all().unwrap().is_empty());
    }

    #[test]
    fn test_available_items_follow_inventory() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        assert_eq!(store.available_items().unwrap().len(), 2);

        store
            .checkout(
                &request("JANE DOE", Selection::new().with("Burger", 3), PaymentMethod::Card),
                &DiscountPolicy::default(),
            )
            .unwrap();

        let names: Vec<String> = store
            .available_items()
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["Wrap"]);
    }

    #[test]
    fn test_invalid_catalog_fails_open() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("products.json"),
            r#"{ "Burger": { "price_cents": -5 } }"#,
        )
        .unwrap();

        let err = Store::open(StoreConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, StoreError::InvalidCatalog { .. }));
    }
}
