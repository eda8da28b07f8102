//! # Validation Module
//!
//! Input validation for everything a customer types and everything the
//! catalog file declares.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console session                                              │
//! │  └── parse_* functions here, re-prompt on error                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Core operations                                              │
//! │  └── reserve() re-checks quantities against the snapshot               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store load                                                   │
//! │  └── validate_catalog_item() rejects a broken products file            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{normalize_customer_name, parse_quantity};
//!
//! assert_eq!(normalize_customer_name("  jane doe ").unwrap(), "JANE DOE");
//! assert_eq!(parse_quantity("2", 3).unwrap(), 2);
//! assert!(parse_quantity("4", 3).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CatalogItem, PaymentMethod};
use crate::{BPS_SCALE, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_ITEM_NAME_LEN: usize = 200;

// =============================================================================
// Customer Input
// =============================================================================

/// Validates a customer's full name and returns its canonical form.
///
/// ## Rules
/// - Trimmed, then uppercased (the ledger key for loyalty counting)
/// - Must not be empty
/// - Letters and spaces only
/// - At most 100 characters
pub fn normalize_customer_name(input: &str) -> ValidationResult<String> {
    let name = input.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    if !name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must contain only letters and spaces".to_string(),
        });
    }

    Ok(name.to_uppercase())
}

/// Parses a 1-based menu choice out of `option_count` entries.
pub fn parse_menu_choice(input: &str, option_count: usize) -> ValidationResult<usize> {
    let choice: usize = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "choice".to_string(),
            reason: "must be a number".to_string(),
        })?;

    if choice < 1 || choice > option_count {
        return Err(ValidationError::OutOfRange {
            field: "choice".to_string(),
            min: 1,
            max: option_count as i64,
        });
    }

    Ok(choice)
}

/// Validates a quantity against the current maximum.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Enter quantity for Burger (Max: 3): 5                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5, 3) ← THIS FUNCTION                               │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → InvalidQuantity                                 │
/// │       ├── qty > max? → InvalidQuantity                                 │
/// │       └── OK → added to cart                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64, max: u32) -> CoreResult<u32> {
    let max = max.min(MAX_ITEM_QUANTITY);
    if qty <= 0 || qty > max as i64 {
        return Err(CoreError::InvalidQuantity {
            requested: qty,
            max,
        });
    }
    Ok(qty as u32)
}

/// Parses then validates a typed quantity.
pub fn parse_quantity(input: &str, max: u32) -> CoreResult<u32> {
    let qty: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        })?;
    validate_quantity(qty, max)
}

/// Parses a payment method (`card`, `cash`, `1`, `2`).
pub fn parse_payment_method(input: &str) -> CoreResult<PaymentMethod> {
    input.parse()
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a discount in basis points (0% to 100%).
pub fn validate_discount_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > BPS_SCALE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: BPS_SCALE as i64,
        });
    }
    Ok(())
}

/// Validates one catalog entry.
///
/// ## Rules
/// - Name non-empty, at most 200 characters
/// - Price between 0 and `MAX_PRICE_CENTS`
/// - Discount, if present, 0-10000 bps
/// - Every recipe count positive (a zero would divide the resolver by zero)
pub fn validate_catalog_item(name: &str, item: &CatalogItem) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    if !(0..=MAX_PRICE_CENTS).contains(&item.price_cents) {
        return Err(ValidationError::OutOfRange {
            field: format!("{name} price"),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    if let Some(bps) = item.discount_bps {
        validate_discount_bps(&format!("{name} discount"), bps)?;
    }

    for (component, &count) in &item.components {
        if count == 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("{name} component {component}"),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
