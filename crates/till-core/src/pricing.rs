//! # Pricing & Discount Engine
//!
//! Turns a selection into a gross total, a discount rate and a net total.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. GROSS                                                               │
//! │     Σ price × qty  −  Σ (price × item discount) × qty                  │
//! │     (the fixed per-item discount is baked into gross, not the rate)    │
//! │                                                                         │
//! │  2. RATE (basis points, summed, NOT clamped)                           │
//! │     card ........................................ +500                  │
//! │     cash ........................................ +0                    │
//! │     prior orders > 0 ............................ +270                  │
//! │     prior orders > 10 (stacked) ................. +1200                 │
//! │     prior orders > 10 (top-up) .................. +(1200 − 270)         │
//! │                                                                         │
//! │  3. NET = GROSS × (10000 − RATE) / 10000                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use till_core::money::Money;
//! use till_core::pricing::{compute_order, DiscountPolicy};
//! use till_core::types::{Catalog, CatalogItem, DiscountRate, PaymentMethod, Selection};
//!
//! let catalog = Catalog::new().with_item(
//!     "Burger",
//!     CatalogItem::new(Money::from_cents(10000)).with_discount(DiscountRate::from_bps(1000)),
//! );
//! let selection = Selection::new().with("Burger", 2);
//!
//! let quote = compute_order(&catalog, &DiscountPolicy::default(), &selection, PaymentMethod::Card, 0)?;
//! assert_eq!(quote.gross, Money::from_cents(18000));
//! assert_eq!(quote.discount_rate.bps(), 500);
//! assert_eq!(quote.net, Money::from_cents(17100));
//! # Ok::<(), till_core::CoreError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Catalog, DiscountRate, PaymentMethod, Selection};

// =============================================================================
// Policy
// =============================================================================

/// How the loyalty tier combines with the returning-customer rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyMode {
    /// Loyalty rate is added on top of the returning rate (2.7% + 12%).
    #[default]
    Stacked,

    /// Loyalty rate replaces the returning rate (12% in total).
    TopUp,
}

impl std::str::FromStr for LoyaltyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stacked" => Ok(LoyaltyMode::Stacked),
            "top_up" | "topup" | "top-up" => Ok(LoyaltyMode::TopUp),
            other => Err(format!(
                "Unknown loyalty mode: '{}'. Valid options: stacked, top_up",
                other
            )),
        }
    }
}

/// The discount rules, all in basis points.
///
/// Defaults reproduce the outlet's house rules. Every field can be overridden
/// from the `[discounts]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Rate for paying by card.
    #[serde(default = "default_card_bps")]
    pub card_bps: u32,

    /// Rate for paying cash.
    #[serde(default)]
    pub cash_bps: u32,

    /// Rate once the customer has at least one earlier order.
    #[serde(default = "default_returning_bps")]
    pub returning_customer_bps: u32,

    /// Loyalty applies when the prior order count is strictly above this.
    #[serde(default = "default_loyalty_after")]
    pub loyalty_after_orders: usize,

    /// Loyalty rate.
    #[serde(default = "default_loyalty_bps")]
    pub loyalty_bps: u32,

    #[serde(default)]
    pub loyalty_mode: LoyaltyMode,

    /// Per-item discounts that replace the catalog's own `discount_bps`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub item_overrides: BTreeMap<String, u32>,
}

fn default_card_bps() -> u32 {
    500
}

fn default_returning_bps() -> u32 {
    270
}

fn default_loyalty_after() -> usize {
    10
}

fn default_loyalty_bps() -> u32 {
    1200
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy {
            card_bps: default_card_bps(),
            cash_bps: 0,
            returning_customer_bps: default_returning_bps(),
            loyalty_after_orders: default_loyalty_after(),
            loyalty_bps: default_loyalty_bps(),
            loyalty_mode: LoyaltyMode::default(),
            item_overrides: BTreeMap::new(),
        }
    }
}

impl DiscountPolicy {
    /// Rate contributed by the payment method.
    pub fn payment_rate(&self, method: PaymentMethod) -> DiscountRate {
        match method {
            PaymentMethod::Card => DiscountRate::from_bps(self.card_bps),
            PaymentMethod::Cash => DiscountRate::from_bps(self.cash_bps),
        }
    }

    /// Rate contributed by the customer's order history.
    pub fn loyalty_rate(&self, prior_order_count: usize) -> DiscountRate {
        if prior_order_count == 0 {
            return DiscountRate::zero();
        }

        let mut bps = self.returning_customer_bps;
        if prior_order_count > self.loyalty_after_orders {
            bps = match self.loyalty_mode {
                LoyaltyMode::Stacked => bps.saturating_add(self.loyalty_bps),
                LoyaltyMode::TopUp => bps.max(self.loyalty_bps),
            };
        }
        DiscountRate::from_bps(bps)
    }

    /// Summed rate for one order. Deliberately unclamped.
    pub fn rate_for(&self, method: PaymentMethod, prior_order_count: usize) -> DiscountRate {
        self.payment_rate(method) + self.loyalty_rate(prior_order_count)
    }

    /// Per-unit discount for an item: the override if set, else the catalog's.
    pub fn item_rate(&self, item: &str, catalog_rate: Option<DiscountRate>) -> Option<DiscountRate> {
        self.item_overrides
            .get(item)
            .copied()
            .map(DiscountRate::from_bps)
            .or(catalog_rate)
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The priced result for one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// List price minus per-item discounts.
    pub gross: Money,
    /// Sum of the per-item discounts already taken out of `gross`.
    pub item_discount: Money,
    pub discount_rate: DiscountRate,
    /// Amount to pay.
    pub net: Money,
}

impl Quote {
    /// True when the summed rate exceeds 100% and the net went below zero.
    pub fn is_inverted(&self) -> bool {
        self.discount_rate.exceeds_full() || self.net.is_negative()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices a selection.
///
/// Pure: reads the catalog and policy, touches nothing else. Fails with
/// `UnknownItem` before computing anything if a line is not on the catalog,
/// and with a `Validation` error if a total does not fit in `Money`.
pub fn compute_order(
    catalog: &Catalog,
    policy: &DiscountPolicy,
    selection: &Selection,
    payment_method: PaymentMethod,
    prior_order_count: usize,
) -> CoreResult<Quote> {
    let entries = selection
        .lines()
        .iter()
        .map(|line| Ok((line, catalog.require(&line.item)?)))
        .collect::<CoreResult<Vec<_>>>()?;

    let mut list_total = Money::zero();
    let mut item_discount = Money::zero();
    for (line, entry) in entries {
        let line_total = entry.price().checked_mul(line.quantity).ok_or_else(overflow)?;
        list_total = list_total.checked_add(line_total).ok_or_else(overflow)?;

        if let Some(rate) = policy.item_rate(&line.item, entry.discount()) {
            let line_discount = entry
                .price()
                .checked_portion_bps(rate.bps())
                .and_then(|per_unit| per_unit.checked_mul(line.quantity))
                .ok_or_else(overflow)?;
            item_discount = item_discount.checked_add(line_discount).ok_or_else(overflow)?;
        }
    }

    let gross = list_total.checked_sub(item_discount).ok_or_else(overflow)?;
    let discount_rate = policy.rate_for(payment_method, prior_order_count);
    let net = gross.checked_discount(discount_rate.bps()).ok_or_else(overflow)?;

    Ok(Quote {
        gross,
        item_discount,
        discount_rate,
        net,
    })
}

fn overflow() -> CoreError {
    ValidationError::OutOfRange {
        field: "order total".to_string(),
        min: i64::MIN,
        max: i64::MAX,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::CatalogItem;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_item(
                "Burger",
                CatalogItem::new(Money::from_cents(10000))
                    .with_discount(DiscountRate::from_bps(1000))
                    .with_component("bun", 1)
                    .with_component("patty", 1),
            )
            .with_item(
                "Fries",
                CatalogItem::new(Money::from_cents(4000)).with_component("potato", 1),
            )
    }

    fn quote(selection: &Selection, method: PaymentMethod, prior: usize) -> Quote {
        compute_order(&catalog(), &DiscountPolicy::default(), selection, method, prior).unwrap()
    }

    #[test]
    fn test_two_burgers_by_card_first_order() {
        let q = quote(&Selection::new().with("Burger", 2), PaymentMethod::Card, 0);

        assert_eq!(q.gross, Money::from_cents(18000));
        assert_eq!(q.item_discount, Money::from_cents(2000));
        assert_eq!(q.discount_rate.bps(), 500);
        assert_eq!(q.net, Money::from_cents(17100));
    }

    #[test]
    fn test_loyal_cash_customer_stacks_rates() {
        let q = quote(&Selection::new().with("Burger", 2), PaymentMethod::Cash, 11);

        assert_eq!(q.discount_rate.bps(), 1470);
        // 180.00 × (1 − 0.147)
        assert_eq!(q.net, Money::from_cents(15354));
    }

    #[test]
    fn test_top_up_mode_caps_loyalty_at_twelve_percent() {
        let policy = DiscountPolicy {
            loyalty_mode: LoyaltyMode::TopUp,
            ..DiscountPolicy::default()
        };
        assert_eq!(policy.rate_for(PaymentMethod::Cash, 11).bps(), 1200);
        assert_eq!(policy.rate_for(PaymentMethod::Card, 11).bps(), 1700);
        assert_eq!(policy.rate_for(PaymentMethod::Cash, 1).bps(), 270);
    }

    #[test]
    fn test_loyalty_thresholds() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.loyalty_rate(0).bps(), 0);
        assert_eq!(policy.loyalty_rate(1).bps(), 270);
        assert_eq!(policy.loyalty_rate(10).bps(), 270);
        assert_eq!(policy.loyalty_rate(11).bps(), 1470);
    }

    #[test]
    fn test_net_is_monotone_in_order_history() {
        let selection = Selection::new().with("Burger", 1).with("Fries", 3);
        for method in [PaymentMethod::Card, PaymentMethod::Cash] {
            let first = quote(&selection, method, 0).net;
            let returning = quote(&selection, method, 1).net;
            let loyal = quote(&selection, method, 11).net;
            assert!(loyal <= returning, "{method}");
            assert!(returning <= first, "{method}");
        }
    }

    #[test]
    fn test_unknown_item_aborts() {
        let selection = Selection::new().with("Burger", 1).with("Pizza", 1);
        let err = compute_order(
            &catalog(),
            &DiscountPolicy::default(),
            &selection,
            PaymentMethod::Cash,
            0,
        )
        .unwrap_err();
        assert_eq!(err, CoreError::UnknownItem("Pizza".to_string()));
    }

    #[test]
    fn test_total_that_does_not_fit_is_rejected() {
        let catalog = Catalog::new()
            .with_item("Gold Burger", CatalogItem::new(Money::from_cents(i64::MAX / 2)))
            .with_item("Silver Burger", CatalogItem::new(Money::from_cents(i64::MAX / 3)));
        let selection = Selection::new().with("Gold Burger", 3);

        let err = compute_order(
            &catalog,
            &DiscountPolicy::default(),
            &selection,
            PaymentMethod::Cash,
            0,
        )
        .unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);

        // each line fits on its own, the sum does not
        let split = Selection::new().with("Gold Burger", 1).with("Silver Burger", 2);
        let err =
            compute_order(&catalog, &DiscountPolicy::default(), &split, PaymentMethod::Cash, 0)
                .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_item_override_replaces_catalog_discount() {
        let mut policy = DiscountPolicy::default();
        policy.item_overrides.insert("Burger".to_string(), 2500);
        policy.item_overrides.insert("Fries".to_string(), 1000);

        let selection = Selection::new().with("Burger", 1).with("Fries", 1);
        let q = compute_order(&catalog(), &policy, &selection, PaymentMethod::Cash, 0).unwrap();

        // 100.00 − 25.00 + 40.00 − 4.00
        assert_eq!(q.gross, Money::from_cents(11100));
        assert_eq!(q.net, q.gross);
    }

    #[test]
    fn test_unclamped_rate_inverts_the_total() {
        let policy = DiscountPolicy {
            card_bps: 9500,
            ..DiscountPolicy::default()
        };
        let selection = Selection::new().with("Fries", 1);
        let q = compute_order(&catalog(), &policy, &selection, PaymentMethod::Card, 11).unwrap();

        assert_eq!(q.discount_rate.bps(), 10970);
        assert!(q.net.is_negative());
        assert!(q.is_inverted());
    }

    #[test]
    fn test_selection_from_units_prices_the_same() {
        let by_units = quote(
            &Selection::from_units(["Burger", "Fries", "Burger"]),
            PaymentMethod::Card,
            0,
        );
        let by_lines = quote(
            &Selection::new().with("Burger", 2).with("Fries", 1),
            PaymentMethod::Card,
            0,
        );
        assert_eq!(by_units, by_lines);
    }

    #[test]
    fn test_policy_fills_missing_fields_with_defaults() {
        let policy: DiscountPolicy =
            serde_json::from_str(r#"{ "card_bps": 300, "loyalty_mode": "top_up" }"#).unwrap();
        assert_eq!(policy.card_bps, 300);
        assert_eq!(policy.returning_customer_bps, 270);
        assert_eq!(policy.loyalty_mode, LoyaltyMode::TopUp);
    }
}
