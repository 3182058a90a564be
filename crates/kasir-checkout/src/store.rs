//! # Storage Traits
//!
//! The checkout, ledger and history components only see these traits.
//! [`kasir_db::Database`] implements all of them (see [`crate::sqlite`]);
//! tests wrap it to inject failures.
//!
//! ```text
//! ┌──────────────────┬──────────────────────────────────────────────────┐
//! │ SaleStore        │ header + lines of a new sale                     │
//! │ StockStore       │ atomic clamped stock adjustment                  │
//! │ HistoryStore     │ headers, lines, filtered listings                │
//! │ CashierDirectory │ cashier id → display name                        │
//! └──────────────────┴──────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

use kasir_core::{Transaction, TransactionItem};
use kasir_db::{DbError, DbResult, StockAdjustment, TransactionListing};

/// How far a sale got before recording failed.
#[derive(Debug, Error)]
pub enum RecordSaleError {
    /// Nothing was written.
    #[error("sale not recorded: {0}")]
    NothingRecorded(#[source] DbError),

    /// The header was written, the lines were not.
    #[error("sale lines not recorded: {0}")]
    ItemsMissing(#[source] DbError),
}

pub trait SaleStore: Send + Sync {
    fn insert_transaction(&self, header: &Transaction) -> impl Future<Output = DbResult<()>> + Send;

    fn insert_items(&self, items: &[TransactionItem]) -> impl Future<Output = DbResult<()>> + Send;

    /// Records header and lines.
    ///
    /// The default writes them in two calls, so a failure in the second
    /// leaves the header behind ([`RecordSaleError::ItemsMissing`]). Stores
    /// that can write both atomically should override it.
    fn record_sale(
        &self,
        header: &Transaction,
        items: &[TransactionItem],
    ) -> impl Future<Output = Result<(), RecordSaleError>> + Send {
        async move {
            self.insert_transaction(header)
                .await
                .map_err(RecordSaleError::NothingRecorded)?;
            self.insert_items(items)
                .await
                .map_err(RecordSaleError::ItemsMissing)
        }
    }
}

pub trait StockStore: Send + Sync {
    /// Adds `delta` to stock, clamping at zero, as one atomic write.
    /// `None` when the product does not exist.
    fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
        at: DateTime<Utc>,
    ) -> impl Future<Output = DbResult<Option<StockAdjustment>>> + Send;
}

pub trait HistoryStore: Send + Sync {
    fn find_transaction(&self, id: &str) -> impl Future<Output = DbResult<Option<Transaction>>> + Send;

    fn transaction_items(
        &self,
        transaction_id: &str,
    ) -> impl Future<Output = DbResult<Vec<TransactionItem>>> + Send;

    /// Newest first, within `[from, until)` when a range is given.
    fn list_transactions(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        limit: Option<u32>,
    ) -> impl Future<Output = DbResult<Vec<TransactionListing>>> + Send;
}

pub trait CashierDirectory: Send + Sync {
    fn cashier_name(&self, cashier_id: &str) -> impl Future<Output = DbResult<Option<String>>> + Send;
}
