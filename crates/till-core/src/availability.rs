//! # Availability Resolver
//!
//! Decides which catalog items the kitchen can still assemble from the
//! current inventory, and how many of each.
//!
//! ## Max Purchasable
//! ```text
//! Recipe:    {bun: 1, patty: 2}
//! Inventory: {bun: 5, patty: 7}
//!
//!   bun   → 5 / 1 = 5
//!   patty → 7 / 2 = 3   ◄── the tightest component wins
//!
//! max_purchasable = 3
//! ```
//!
//! An item with an empty recipe consumes nothing, so its maximum is
//! unbounded (`None`). Callers that need a number cap it with
//! [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY).
//!
//! Everything here is read-only over the catalog and the inventory.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{Catalog, DiscountRate, Inventory};
use crate::MAX_ITEM_QUANTITY;

/// An item that can be sold right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableItem {
    pub name: String,
    pub price: Money,
    pub discount: Option<DiscountRate>,
    /// `None` when the recipe is empty.
    pub max_quantity: Option<u32>,
}

impl AvailableItem {
    /// Maximum a customer may order in one go.
    pub fn quantity_cap(&self) -> u32 {
        self.max_quantity
            .map_or(MAX_ITEM_QUANTITY, |max| max.min(MAX_ITEM_QUANTITY))
    }
}

/// True iff every component of the item's recipe is in stock in the required
/// amount. Unknown items are never available.
pub fn is_available(catalog: &Catalog, inventory: &Inventory, item: &str) -> bool {
    match catalog.get(item) {
        Some(entry) => entry
            .components
            .iter()
            .all(|(component, &required)| inventory.count(component) >= required),
        None => false,
    }
}

/// Largest quantity of `item` the inventory can cover.
///
/// Returns `Some(0)` for unknown items and `None` for an empty recipe.
pub fn max_purchasable(catalog: &Catalog, inventory: &Inventory, item: &str) -> Option<u32> {
    match catalog.get(item) {
        Some(entry) => recipe_max(&entry.components, inventory),
        None => Some(0),
    }
}

/// Minimum of `count / required` over the recipe. Zero-count entries
/// consume nothing and do not constrain.
pub(crate) fn recipe_max(components: &BTreeMap<String, u32>, inventory: &Inventory) -> Option<u32> {
    components
        .iter()
        .filter(|(_, &required)| required > 0)
        .map(|(component, &required)| inventory.count(component) / required)
        .min()
}

/// The subset of the catalog that is available, in catalog (name) order.
pub fn list_available_items(catalog: &Catalog, inventory: &Inventory) -> Vec<AvailableItem> {
    catalog
        .iter()
        .filter(|(name, _)| is_available(catalog, inventory, name))
        .map(|(name, entry)| AvailableItem {
            name: name.clone(),
            price: entry.price(),
            discount: entry.discount(),
            max_quantity: recipe_max(&entry.components, inventory),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogItem;

    fn burger_catalog() -> Catalog {
        Catalog::new()
            .with_item(
                "Burger",
                CatalogItem::new(Money::from_cents(10000))
                    .with_discount(DiscountRate::from_bps(1000))
                    .with_component("bun", 1)
                    .with_component("patty", 1),
            )
            .with_item(
                "Double",
                CatalogItem::new(Money::from_cents(15000))
                    .with_component("bun", 1)
                    .with_component("patty", 2),
            )
            .with_item("Water", CatalogItem::new(Money::from_cents(5000)))
    }

    #[test]
    fn test_max_purchasable_is_tightest_component() {
        let catalog = burger_catalog();
        let inventory = Inventory::new().with("bun", 5).with("patty", 3);

        assert_eq!(max_purchasable(&catalog, &inventory, "Burger"), Some(3));
        assert_eq!(max_purchasable(&catalog, &inventory, "Double"), Some(1));
    }

    #[test]
    fn test_missing_component_blocks_item() {
        let catalog = burger_catalog();
        let inventory = Inventory::new().with("bun", 5);

        assert!(!is_available(&catalog, &inventory, "Burger"));
        assert_eq!(max_purchasable(&catalog, &inventory, "Burger"), Some(0));
    }

    #[test]
    fn test_unknown_item() {
        let catalog = burger_catalog();
        let inventory = Inventory::new().with("bun", 5).with("patty", 3);

        assert!(!is_available(&catalog, &inventory, "Pizza"));
        assert_eq!(max_purchasable(&catalog, &inventory, "Pizza"), Some(0));
    }

    #[test]
    fn test_empty_recipe_is_unbounded() {
        let catalog = burger_catalog();
        let inventory = Inventory::new();

        assert!(is_available(&catalog, &inventory, "Water"));
        assert_eq!(max_purchasable(&catalog, &inventory, "Water"), None);
    }

    #[test]
    fn test_available_iff_max_at_least_one() {
        let catalog = burger_catalog();
        for buns in 0..4 {
            for patties in 0..5 {
                let inventory = Inventory::new().with("bun", buns).with("patty", patties);
                for (name, _) in catalog.iter() {
                    let max = max_purchasable(&catalog, &inventory, name);
                    let enough = max.map_or(true, |m| m >= 1);
                    assert_eq!(
                        is_available(&catalog, &inventory, name),
                        enough,
                        "{name} with bun={buns} patty={patties}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_list_available_items() {
        let catalog = burger_catalog();
        let inventory = Inventory::new().with("bun", 5).with("patty", 1);

        let available = list_available_items(&catalog, &inventory);
        let names: Vec<&str> = available.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Burger", "Water"]);

        assert_eq!(available[0].max_quantity, Some(1));
        assert_eq!(available[0].discount, Some(DiscountRate::from_bps(1000)));
        assert_eq!(available[1].quantity_cap(), MAX_ITEM_QUANTITY);
    }
}
