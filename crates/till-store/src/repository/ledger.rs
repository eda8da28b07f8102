//! # Order Ledger
//!
//! orders.json is an append-only JSON array of completed orders.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. count_by_customer(name)   ← BEFORE the new order, drives loyalty   │
//! │  2. append(order)             ← load all, push, overwrite the file     │
//! │  3. list_* / all              ← reporting, never mutates               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::debug;

use till_core::Order;

use crate::error::StoreResult;
use crate::json_file::JsonFile;

/// Repository for completed orders.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    file: JsonFile,
}

impl LedgerRepository {
    pub fn new(file: JsonFile) -> Self {
        LedgerRepository { file }
    }

    /// Every order, oldest first.
    pub fn all(&self) -> StoreResult<Vec<Order>> {
        self.file.load_or_default()
    }

    /// Appends `order` and returns its id.
    pub fn append(&self, order: &Order) -> StoreResult<String> {
        let mut orders = self.all()?;
        orders.push(order.clone());
        self.file.save(&orders)?;

        debug!(order_id = %order.id, total_orders = orders.len(), "Order appended");
        Ok(order.id.clone())
    }

    /// Number of orders recorded for `customer_name`.
    ///
    /// Both sides are compared in their canonical (trimmed, uppercased) form.
    pub fn count_by_customer(&self, customer_name: &str) -> StoreResult<usize> {
        let key = canonical(customer_name);
        Ok(self
            .all()?
            .iter()
            .filter(|order| canonical(&order.customer_name) == key)
            .count())
    }

    /// Orders for `customer_name`, oldest first.
    pub fn list_by_customer(&self, customer_name: &str) -> StoreResult<Vec<Order>> {
        let key = canonical(customer_name);
        Ok(self
            .all()?
            .into_iter()
            .filter(|order| canonical(&order.customer_name) == key)
            .collect())
    }

    /// Orders created in `[from, to)`.
    pub fn list_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Order>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|order| order.created_at >= from && order.created_at < to)
            .collect())
    }
}

fn canonical(name: &str) -> String {
    name.trim().to_uppercase()
}
