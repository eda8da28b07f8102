//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Pricing / reservation failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-store errors (separate crate)                                    │
//! │  └── StoreError       - File read/write failures                       │
//! │                                                                         │
//! │  till-console errors (app)                                             │
//! │  └── AppError         - What ends a run                                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → AppError             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` is recoverable at the caller: the console re-prompts,
//! nothing persisted has been touched yet.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The selection names an item that is not on the catalog.
    ///
    /// A correct resolver never offers such an item, so this points at stale
    /// or hand-edited data rather than at the customer.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// More units of an item were requested than the inventory snapshot can
    /// assemble.
    ///
    /// ## User Workflow
    /// ```text
    /// Burger recipe {bun: 1, patty: 1}, inventory {bun: 5, patty: 3}
    ///      │
    ///      ▼
    /// max purchasable = min(5/1, 3/1) = 3
    ///      │
    ///      ▼
    /// Request 4 → InsufficientStock { item: "Burger", available: 3, requested: 4 }
    /// ```
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: u32,
        requested: u32,
    },

    /// Several lines each fit on their own but together need more of a shared
    /// component than the snapshot holds.
    #[error("Not enough {component}: available {available}, required {required}")]
    ComponentShortfall {
        component: String,
        available: u32,
        required: u64,
    },

    /// Payment method outside {card, cash}.
    #[error("Invalid payment method: '{0}' (expected card or cash)")]
    InvalidPaymentMethod(String),

    /// Quantity is non-positive or above what can be sold.
    #[error("Invalid quantity {requested}: must be between 1 and {max}")]
    InvalidQuantity { requested: i64, max: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Coarse classification of a [`CoreError`].
///
/// Callers branch on the kind, not on the variant: both stock variants are
/// `InsufficientStock` to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownItem,
    InsufficientStock,
    InvalidPaymentMethod,
    InvalidQuantity,
    Validation,
}

impl CoreError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::UnknownItem(_) => ErrorKind::UnknownItem,
            CoreError::InsufficientStock { .. } | CoreError::ComponentShortfall { .. } => {
                ErrorKind::InsufficientStock
            }
            CoreError::InvalidPaymentMethod(_) => ErrorKind::InvalidPaymentMethod,
            CoreError::InvalidQuantity { .. } => ErrorKind::InvalidQuantity,
            CoreError::Validation(_) => ErrorKind::Validation,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic runs, mostly while reading the console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. letters where a number was expected).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            item: "Burger".to_string(),
            available: 3,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Burger: available 3, requested 4"
        );

        let err = CoreError::InvalidQuantity {
            requested: 0,
            max: 3,
        };
        assert_eq!(err.to_string(), "Invalid quantity 0: must be between 1 and 3");
    }

    #[test]
    fn test_stock_errors_share_a_kind() {
        let item = CoreError::InsufficientStock {
            item: "Burger".to_string(),
            available: 0,
            requested: 1,
        };
        let component = CoreError::ComponentShortfall {
            component: "bun".to_string(),
            available: 1,
            required: 2,
        };
        assert_eq!(item.kind(), ErrorKind::InsufficientStock);
        assert_eq!(component.kind(), ErrorKind::InsufficientStock);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert_eq!(core_err.kind(), ErrorKind::Validation);
    }
}
