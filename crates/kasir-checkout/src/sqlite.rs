//! Store traits for the SQLite [`Database`].

use chrono::{DateTime, Utc};

use kasir_core::{Transaction, TransactionItem};
use kasir_db::{Database, DbResult, StockAdjustment, TransactionListing};

use crate::store::{CashierDirectory, HistoryStore, RecordSaleError, SaleStore, StockStore};

impl SaleStore for Database {
    async fn insert_transaction(&self, header: &Transaction) -> DbResult<()> {
        self.transactions().insert_header(header).await
    }

    async fn insert_items(&self, items: &[TransactionItem]) -> DbResult<()> {
        self.transactions().insert_items(items).await
    }

    // One SQLite transaction: either everything is written or nothing is.
    async fn record_sale(
        &self,
        header: &Transaction,
        items: &[TransactionItem],
    ) -> Result<(), RecordSaleError> {
        self.transactions()
            .record_sale(header, items)
            .await
            .map_err(RecordSaleError::NothingRecorded)
    }
}

impl StockStore for Database {
    async fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
        at: DateTime<Utc>,
    ) -> DbResult<Option<StockAdjustment>> {
        self.products().adjust_stock(product_id, delta, at).await
    }
}

impl HistoryStore for Database {
    async fn find_transaction(&self, id: &str) -> DbResult<Option<Transaction>> {
        self.transactions().get_by_id(id).await
    }

    async fn transaction_items(&self, transaction_id: &str) -> DbResult<Vec<TransactionItem>> {
        self.transactions().get_items(transaction_id).await
    }

    async fn list_transactions(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        limit: Option<u32>,
    ) -> DbResult<Vec<TransactionListing>> {
        self.transactions().list(range, limit).await
    }
}

impl CashierDirectory for Database {
    async fn cashier_name(&self, cashier_id: &str) -> DbResult<Option<String>> {
        self.users().display_name(cashier_id).await
    }
}
