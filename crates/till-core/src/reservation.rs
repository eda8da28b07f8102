//! # Inventory Reservation
//!
//! Computes the inventory left after a selection is fulfilled.
//!
//! ## Snapshot Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every check runs against the PRE-transaction snapshot:                 │
//! │                                                                         │
//! │   snapshot ──┬──► per-item:  qty ≤ max_purchasable(snapshot)           │
//! │              │                                                          │
//! │              └──► per-component: Σ consumption ≤ snapshot count        │
//! │                        │                                                │
//! │                        ▼                                                │
//! │              all pass? ──► new Inventory (snapshot − consumption)      │
//! │                 │                                                       │
//! │                 └── no ──► InsufficientStock, snapshot untouched       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The component check matters when two items share a component: a Burger
//! and a Wrap may each fit on one remaining bun, both together do not.
//!
//! Nothing here writes; persisting the result belongs to the store.

use std::collections::BTreeMap;

use crate::availability::max_purchasable;
use crate::error::{CoreError, CoreResult};
use crate::types::{Catalog, Inventory, Selection};
use crate::MAX_ITEM_QUANTITY;

/// Summed component consumption of a selection.
pub fn consumption(catalog: &Catalog, selection: &Selection) -> CoreResult<BTreeMap<String, u64>> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for line in selection.lines() {
        let entry = catalog.require(&line.item)?;
        for (component, &per_unit) in &entry.components {
            *totals.entry(component.clone()).or_insert(0) += per_unit as u64 * line.quantity as u64;
        }
    }
    Ok(totals)
}

/// Validates `selection` against `snapshot` and returns the decremented
/// inventory. The snapshot itself is never modified.
pub fn reserve(catalog: &Catalog, snapshot: &Inventory, selection: &Selection) -> CoreResult<Inventory> {
    for line in selection.lines() {
        catalog.require(&line.item)?;

        if line.quantity == 0 {
            return Err(CoreError::InvalidQuantity {
                requested: 0,
                max: max_purchasable(catalog, snapshot, &line.item).unwrap_or(MAX_ITEM_QUANTITY),
            });
        }

        if let Some(available) = max_purchasable(catalog, snapshot, &line.item) {
            if line.quantity > available {
                return Err(CoreError::InsufficientStock {
                    item: line.item.clone(),
                    available,
                    requested: line.quantity,
                });
            }
        }
    }

    let needed = consumption(catalog, selection)?;
    let mut reserved = snapshot.clone();
    for (component, required) in needed {
        let available = snapshot.count(&component);
        if required > available as u64 {
            return Err(CoreError::ComponentShortfall {
                component,
                available,
                required,
            });
        }
        // required ≤ available, so it fits in u32
        reserved.set(component, available - required as u32);
    }

    Ok(reserved)
}

/// Inventory that would remain after `selection`, floored at zero.
///
/// For display while the cart is still being filled; the real check is
/// [`reserve`].
pub fn remaining_after(catalog: &Catalog, snapshot: &Inventory, selection: &Selection) -> CoreResult<Inventory> {
    let needed = consumption(catalog, selection)?;
    let mut remaining = snapshot.clone();
    for (component, required) in needed {
        let left = (snapshot.count(&component) as u64).saturating_sub(required);
        remaining.set(component, left as u32);
    }
    Ok(remaining)
}
