//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Catalog      │   │   Inventory     │   │   Selection     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name → item    │   │  component →    │   │  (item, qty)    │       │
//! │  │  price_cents    │   │    count        │   │  lines          │       │
//! │  │  discount_bps   │   │                 │   │                 │       │
//! │  │  components     │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │  PaymentMethod  │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Card           │   │  id, customer   │       │
//! │  │  500 = 5%       │   │  Cash           │   │  items, totals  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Maps are `BTreeMap` so menus are numbered the same way on every run and
//! the JSON files diff cleanly.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::Money;
use crate::pricing::Quote;
use crate::BPS_SCALE;

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount rate in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. The loyalty rate of 2.7% is exactly 270 bps, which
/// a float cannot promise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True when the rate takes away more than the whole amount.
    #[inline]
    pub const fn exceeds_full(&self) -> bool {
        self.0 > BPS_SCALE
    }
}

/// Independent discount components are summed; saturating so that a silly
/// configuration cannot wrap around to a tiny rate.
impl Add for DiscountRate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DiscountRate(self.0.saturating_add(other.0))
    }
}

/// `14.7%`, `5%`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// One sellable item: its price, an optional fixed discount and the recipe of
/// components it consumes per unit.
///
/// The item's name is its key in the [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Price in minor units.
    pub price_cents: i64,

    /// Per-unit discount baked into the gross total (1000 = 10%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_bps: Option<u32>,

    /// Component name → quantity consumed per unit sold.
    #[serde(default)]
    pub components: BTreeMap<String, u32>,
}

impl CatalogItem {
    /// Creates an item with no discount and an empty recipe.
    pub fn new(price: Money) -> Self {
        CatalogItem {
            price_cents: price.cents(),
            discount_bps: None,
            components: BTreeMap::new(),
        }
    }

    /// Sets the per-unit discount.
    pub fn with_discount(mut self, rate: DiscountRate) -> Self {
        self.discount_bps = Some(rate.bps());
        self
    }

    /// Adds a component to the recipe.
    pub fn with_component(mut self, component: impl Into<String>, count: u32) -> Self {
        self.components.insert(component.into(), count);
        self
    }

    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the configured per-unit discount, if any.
    #[inline]
    pub fn discount(&self) -> Option<DiscountRate> {
        self.discount_bps.map(DiscountRate::from_bps)
    }
}

/// The menu: item name → [`CatalogItem`]. Read-only during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: BTreeMap<String, CatalogItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an item.
    pub fn insert(&mut self, name: impl Into<String>, item: CatalogItem) {
        self.items.insert(name.into(), item);
    }

    /// Builder form of [`Catalog::insert`].
    pub fn with_item(mut self, name: impl Into<String>, item: CatalogItem) -> Self {
        self.insert(name, item);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.items.get(name)
    }

    /// Looks up an item or fails with [`CoreError::UnknownItem`].
    pub fn require(&self, name: &str) -> Result<&CatalogItem, CoreError> {
        self.get(name)
            .ok_or_else(|| CoreError::UnknownItem(name.to_string()))
    }

    /// Items in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, CatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Component name → available count.
///
/// A component that is absent counts as zero. Counts are unsigned: the
/// reservation path refuses anything that would take one below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and the seed tool.
    pub fn with(mut self, component: impl Into<String>, count: u32) -> Self {
        self.set(component, count);
        self
    }

    /// Current count, zero when the component is unknown.
    pub fn count(&self, component: &str) -> u32 {
        self.counts.get(component).copied().unwrap_or(0)
    }

    pub fn set(&mut self, component: impl Into<String>, count: u32) {
        self.counts.insert(component.into(), count);
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, u32> {
        self.counts.iter()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// =============================================================================
// Selection
// =============================================================================

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLine {
    pub item: String,
    pub quantity: u32,
}

/// A customer's cart.
///
/// ## Invariants
/// - Lines are unique by item (adding the same item increases its quantity)
/// - Lines keep the order in which items were first picked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    lines: Vec<SelectionLine>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from one name per unit, e.g. `["Burger", "Burger"]`.
    pub fn from_units<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Selection::new();
        for unit in units {
            selection.add(unit.as_ref(), 1);
        }
        selection
    }

    /// Adds `quantity` units of `item`, merging with an existing line.
    pub fn add(&mut self, item: &str, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item == item) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }
        self.lines.push(SelectionLine {
            item: item.to_string(),
            quantity,
        });
    }

    /// Builder form of [`Selection::add`].
    pub fn with(mut self, item: &str, quantity: u32) -> Self {
        self.add(item, quantity);
        self
    }

    pub fn lines(&self) -> &[SelectionLine] {
        &self.lines
    }

    /// Quantity of `item` already in the cart.
    pub fn quantity_of(&self, item: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item == item)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Expands to one entry per unit, the form stored on an [`Order`].
    pub fn units(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|l| std::iter::repeat(l.item.clone()).take(l.quantity as usize))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.quantity == 0)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment on the counter terminal.
    Card,
    /// Physical cash payment.
    Cash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Cash => write!(f, "cash"),
        }
    }
}

/// Accepts the name in any case or the menu number (`1` card, `2` cash).
impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" | "1" => Ok(PaymentMethod::Card),
            "cash" | "2" => Ok(PaymentMethod::Cash),
            other => Err(CoreError::InvalidPaymentMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed transaction as recorded in the ledger.
///
/// Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Uppercased customer name, the key for loyalty counting.
    pub customer_name: String,
    /// One entry per unit purchased.
    pub items: Vec<String>,
    pub payment_method: PaymentMethod,
    /// Gross after per-item discounts, before the rate discount.
    pub gross_cents: i64,
    /// Summed rate discount in basis points.
    pub discount_bps: u32,
    /// Amount paid.
    pub net_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Freezes a priced selection into an order.
    ///
    /// The id and timestamp come from the caller so this stays pure.
    pub fn new(
        id: impl Into<String>,
        customer_name: impl Into<String>,
        selection: &Selection,
        payment_method: PaymentMethod,
        quote: &Quote,
        created_at: DateTime<Utc>,
    ) -> Self {
        Order {
            id: id.into(),
            customer_name: customer_name.into(),
            items: selection.units(),
            payment_method,
            gross_cents: quote.gross.cents(),
            discount_bps: quote.discount_rate.bps(),
            net_cents: quote.net.cents(),
            created_at,
        }
    }

    #[inline]
    pub fn gross(&self) -> Money {
        Money::from_cents(self.gross_cents)
    }

    #[inline]
    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }

    #[inline]
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }

    /// `(item, count)` pairs in first-purchased order.
    pub fn item_summary(&self) -> Vec<(String, usize)> {
        let mut summary: Vec<(String, usize)> = Vec::new();
        for item in &self.items {
            match summary.iter_mut().find(|(name, _)| name == item) {
                Some((_, count)) => *count += 1,
                None => summary.push((item.clone(), 1)),
            }
        }
        summary
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_display() {
        let rate = DiscountRate::from_bps(1470);
        assert_eq!(rate.to_string(), "14.7%");
        assert_eq!(DiscountRate::from_bps(500).to_string(), "5%");
    }

    #[test]
    fn test_discount_rate_sum_is_not_clamped() {
        let sum = DiscountRate::from_bps(9000) + DiscountRate::from_bps(2000);
        assert_eq!(sum.bps(), 11000);
        assert!(sum.exceeds_full());
    }

    #[test]
    fn test_inventory_missing_component_is_zero() {
        let inventory = Inventory::new().with("bun", 5);
        assert_eq!(inventory.count("bun"), 5);
        assert_eq!(inventory.count("patty"), 0);
    }

    #[test]
    fn test_selection_merges_lines() {
        let mut selection = Selection::new();
        selection.add("Burger", 2);
        selection.add("Fries", 1);
        selection.add("Burger", 1);

        assert_eq!(selection.lines().len(), 2);
        assert_eq!(selection.quantity_of("Burger"), 3);
        assert_eq!(selection.units(), vec!["Burger", "Burger", "Burger", "Fries"]);
    }

    #[test]
    fn test_selection_from_units() {
        let selection = Selection::from_units(["Burger", "Fries", "Burger"]);
        assert_eq!(selection.quantity_of("Burger"), 2);
        assert_eq!(selection.quantity_of("Fries"), 1);
        assert_eq!(selection.lines()[0].item, "Burger");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("Card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(" cash ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("1".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("2".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!(matches!(
            "cheque".parse::<PaymentMethod>(),
            Err(CoreError::InvalidPaymentMethod(_))
        ));
    }

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"{
            "Burger": { "price_cents": 10000, "discount_bps": 1000, "components": { "bun": 1, "patty": 1 } },
            "Water": { "price_cents": 5000 }
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();

        let burger = catalog.get("Burger").unwrap();
        assert_eq!(burger.price(), Money::from_cents(10000));
        assert_eq!(burger.discount(), Some(DiscountRate::from_bps(1000)));
        assert_eq!(burger.components.get("patty"), Some(&1));

        let water = catalog.get("Water").unwrap();
        assert!(water.discount().is_none());
        assert!(water.components.is_empty());
    }

    #[test]
    fn test_order_item_summary_keeps_first_seen_order() {
        let order = Order {
            id: "1".to_string(),
            customer_name: "JANE DOE".to_string(),
            items: vec![
                "Fries".to_string(),
                "Burger".to_string(),
                "Fries".to_string(),
            ],
            payment_method: PaymentMethod::Cash,
            gross_cents: 0,
            discount_bps: 0,
            net_cents: 0,
            created_at: Utc::now(),
        };
        assert_eq!(
            order.item_summary(),
            vec![("Fries".to_string(), 2), ("Burger".to_string(), 1)]
        );
    }
}
