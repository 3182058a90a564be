//! # Checkout Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ──► CoreError ──► CheckoutError::InvalidCart           │
//! │                                ──► CheckoutError::InsufficientPayment   │
//! │  DbError ─────────────────────► CheckoutError::Persistence              │
//! │                                 CheckoutError::ItemsNotRecorded         │
//! │                                                                         │
//! │  LedgerError ──► StockWarning (inside checkout, never returned)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use kasir_core::{CoreError, Money, ValidationError};
use kasir_db::DbError;

// =============================================================================
// Checkout
// =============================================================================

/// Why a checkout did not produce a receipt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request was rejected before anything was written.
    #[error("Invalid cart: {reason}")]
    InvalidCart { reason: String },

    /// Cash does not cover the total. Nothing was written.
    #[error("Insufficient payment: total {total}, tendered {tendered}")]
    InsufficientPayment { total: Money, tendered: Money },

    /// The sale was not recorded. Safe to retry.
    #[error("Failed to record sale: {0}")]
    Persistence(#[source] DbError),

    /// The header was written but its lines were not.
    ///
    /// Only reachable through a store that records in two steps. The
    /// header stays in place and is not retried.
    #[error("Transaction {transaction_id} recorded without its items: {source}")]
    ItemsNotRecorded {
        transaction_id: String,
        #[source]
        source: DbError,
    },
}

impl From<CoreError> for CheckoutError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCart { reason } => CheckoutError::InvalidCart { reason },
            CoreError::InsufficientPayment { total, tendered } => {
                CheckoutError::InsufficientPayment { total, tendered }
            }
            CoreError::Validation(e) => CheckoutError::InvalidCart {
                reason: e.to_string(),
            },
        }
    }
}

// =============================================================================
// Stock Ledger
// =============================================================================

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Stock update failed: {0}")]
    Persistence(#[from] DbError),

    #[error("Invalid stock change: {0}")]
    Validation(#[from] ValidationError),
}

/// A stock problem found after the sale was recorded.
///
/// The sale stands either way; these are reported next to the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StockWarning {
    /// The decrement did not happen.
    #[error("Stock for {product_id} not reduced by {quantity}: {reason}")]
    UpdateFailed {
        product_id: String,
        quantity: i64,
        reason: String,
    },

    /// More was sold than was on the shelf; stock was set to zero.
    #[error("Sold {requested} of {product_id} with only {available} in stock")]
    Oversold {
        product_id: String,
        requested: i64,
        available: i64,
    },
}

impl StockWarning {
    pub fn product_id(&self) -> &str {
        match self {
            StockWarning::UpdateFailed { product_id, .. } => product_id,
            StockWarning::Oversold { product_id, .. } => product_id,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StockWarning::UpdateFailed { .. })
    }
}

// =============================================================================
// History
// =============================================================================

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Invalid history query: {0}")]
    Invalid(#[from] ValidationError),

    #[error("History read failed: {0}")]
    Persistence(#[from] DbError),
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
