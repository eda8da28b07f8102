//! # Receipt
//!
//! ```text
//! ========================================
//! Receipt - Till Fast Food
//! ========================================
//! Customer: JANE DOE
//! Items:
//!   Burger x 2
//! Payment method: card
//! Bill: Rs.180.00
//! Discount: 5%
//! Amount to pay: Rs.171.00
//! Date: 2026-10-17
//! Time: 14:03:11
//! ========================================
//! ```

use std::fmt::Display;

use chrono::{Local, TimeZone};
use till_core::Order;

use crate::config::TillConfig;

pub const RULE: &str = "========================================";

/// Receipt lines with the timestamp in local time.
pub fn render_receipt(order: &Order, config: &TillConfig) -> Vec<String> {
    render_receipt_in(order, config, &Local)
}

/// Receipt lines with the timestamp shown in `tz`.
pub fn render_receipt_in<Tz>(order: &Order, config: &TillConfig, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let at = order.created_at.with_timezone(tz);

    let mut lines = vec![
        RULE.to_string(),
        format!("Receipt - {}", config.store.name),
        RULE.to_string(),
        format!("Customer: {}", order.customer_name),
        "Items:".to_string(),
    ];
    lines.extend(
        order
            .item_summary()
            .into_iter()
            .map(|(item, count)| format!("  {} x {}", item, count)),
    );
    lines.extend([
        format!("Payment method: {}", order.payment_method),
        format!("Bill: {}", config.format_currency(order.gross())),
        format!("Discount: {}", order.discount_rate()),
        format!("Amount to pay: {}", config.format_currency(order.net())),
        format!("Date: {}", at.format("%Y-%m-%d")),
        format!("Time: {}", at.format("%H:%M:%S")),
        RULE.to_string(),
    ]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use till_core::{
        compute_order, Catalog, CatalogItem, DiscountPolicy, DiscountRate, Money, PaymentMethod,
        Selection,
    };

    #[test]
    fn test_receipt_lines() {
        let catalog = Catalog::new()
            .with_item(
                "Burger",
                CatalogItem::new(Money::from_cents(10000)).with_discount(DiscountRate::from_bps(1000)),
            )
            .with_item("Pepsi", CatalogItem::new(Money::from_cents(1500)));
        let selection = Selection::from_units(["Burger", "Pepsi", "Burger"]);
        let quote = compute_order(
            &catalog,
            &DiscountPolicy::default(),
            &selection,
            PaymentMethod::Card,
            0,
        )
        .unwrap();
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 14, 3, 11).unwrap();
        let order = Order::new("o-1", "JANE DOE", &selection, PaymentMethod::Card, &quote, at);

        let lines = render_receipt_in(&order, &TillConfig::default(), &Utc);

        assert_eq!(
            lines,
            vec![
                RULE,
                "Receipt - Till Fast Food",
                RULE,
                "Customer: JANE DOE",
                "Items:",
                "  Burger x 2",
                "  Pepsi x 1",
                "Payment method: card",
                "Bill: Rs.195.00",
                "Discount: 5%",
                "Amount to pay: Rs.185.25",
                "Date: 2026-10-17",
                "Time: 14:03:11",
                RULE,
            ]
        );
    }
}
