//! # Stock Ledger
//!
//! The only writer of `products.stock` outside catalog edits.
//!
//! ## Concurrent Decrements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register A: apply_delta("p1", -3)     register B: apply_delta("p1", -2)│
//! │        │                                       │                        │
//! │        ▼                                       ▼                        │
//! │  adjust_stock ──► write lock ◄──────────── adjust_stock (waits)         │
//! │    previous 10, new 7                                                   │
//! │  commit ───────────────────────────────────► previous 7, new 5          │
//! │                                                                         │
//! │  A: StockChange { previous: 10, requested_delta: -3, new_stock: 7 }     │
//! │  B: StockChange { previous: 7,  requested_delta: -2, new_stock: 5 }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Each change is applied by the store in one atomic write, so no decrement
//! is computed from a stale read and the value each write replaced is exact.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use kasir_core::validation::validate_restock_quantity;

use crate::error::LedgerError;
use crate::store::StockStore;

/// The result of one applied stock change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockChange {
    pub product_id: String,
    /// Stock the write replaced.
    pub previous: i64,
    pub requested_delta: i64,
    pub new_stock: i64,
}

impl StockChange {
    /// True when the delta would have gone below zero and stock was set to 0.
    pub fn clamped(&self) -> bool {
        self.previous.saturating_add(self.requested_delta) < 0
    }
}

#[derive(Debug, Clone)]
pub struct StockLedger<S> {
    store: S,
}

impl<S: StockStore> StockLedger<S> {
    pub fn new(store: S) -> Self {
        StockLedger { store }
    }

    /// Adds `delta` to a product's stock, clamping at zero.
    ///
    /// ## Errors
    /// * `LedgerError::ProductNotFound` - no such product
    /// * `LedgerError::Persistence` - the store failed
    pub async fn apply_delta(&self, product_id: &str, delta: i64) -> Result<StockChange, LedgerError> {
        let adjusted = self
            .store
            .adjust_stock(product_id, delta, Utc::now())
            .await?
            .ok_or_else(|| LedgerError::ProductNotFound(product_id.to_string()))?;

        debug!(
            product_id = %product_id,
            previous = adjusted.previous,
            delta,
            new_stock = adjusted.new_stock,
            "Stock updated"
        );
        Ok(StockChange {
            product_id: product_id.to_string(),
            previous: adjusted.previous,
            requested_delta: delta,
            new_stock: adjusted.new_stock,
        })
    }

    /// Adds received goods to stock.
    ///
    /// ## Errors
    /// * `LedgerError::Validation` - `quantity` is not positive
    pub async fn restock(&self, product_id: &str, quantity: i64) -> Result<StockChange, LedgerError> {
        validate_restock_quantity(quantity)?;
        self.apply_delta(product_id, quantity).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
