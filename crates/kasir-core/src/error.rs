//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Sale rejected before anything is written       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  kasir-checkout errors                                                 │
//! │  └── CheckoutError / LedgerError / HistoryError                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → caller            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Both variants are raised before any record is written, so a caller
/// seeing one of them knows the store is untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The sale cannot be priced or recorded as given.
    ///
    /// ## When This Occurs
    /// - Empty cart
    /// - A line with quantity or unit price ≤ 0
    /// - No cashier identity
    /// - Totals that overflow the money range
    #[error("Invalid cart: {reason}")]
    InvalidCart { reason: String },

    /// Cash handed over does not cover the total.
    #[error("Insufficient payment: total {total}, tendered {tendered}")]
    InsufficientPayment { total: Money, tendered: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidCart`].
    pub fn invalid_cart(reason: impl Into<String>) -> Self {
        CoreError::InvalidCart {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
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

    /// Invalid format (e.g., invalid UUID, invalid month).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            total: Money::new(100_000),
            tendered: Money::new(50_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: total Rp 100.000, tendered Rp 50.000"
        );

        let err = CoreError::invalid_cart("cart is empty");
        assert_eq!(err.to_string(), "Invalid cart: cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
