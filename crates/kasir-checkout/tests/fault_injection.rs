//! Partial failures, injected through the store traits.

mod common;

use chrono::{DateTime, Utc};

use common::{cashier, config, memory_db, product, request, stock_of};
use kasir_checkout::{
    CashierDirectory, Checkout, CheckoutError, HistoryReader, RecordSaleError, SaleStore,
    StockStore, StockWarning,
};
use kasir_core::{Money, Transaction, TransactionItem};
use kasir_db::{Database, DbError, DbResult, StockAdjustment};

/// Stock writes fail for one product.
#[derive(Clone)]
struct BrokenShelf {
    db: Database,
    broken_product: String,
}

impl SaleStore for BrokenShelf {
    async fn insert_transaction(&self, header: &Transaction) -> DbResult<()> {
        self.db.insert_transaction(header).await
    }

    async fn insert_items(&self, items: &[TransactionItem]) -> DbResult<()> {
        self.db.insert_items(items).await
    }

    async fn record_sale(
        &self,
        header: &Transaction,
        items: &[TransactionItem],
    ) -> Result<(), RecordSaleError> {
        self.db.record_sale(header, items).await
    }
}

impl StockStore for BrokenShelf {
    async fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
        at: DateTime<Utc>,
    ) -> DbResult<Option<StockAdjustment>> {
        if product_id == self.broken_product {
            return Err(DbError::QueryFailed("disk I/O error".to_string()));
        }
        self.db.adjust_stock(product_id, delta, at).await
    }
}

impl CashierDirectory for BrokenShelf {
    async fn cashier_name(&self, cashier_id: &str) -> DbResult<Option<String>> {
        self.db.cashier_name(cashier_id).await
    }
}

/// Records in two calls and loses every item batch.
#[derive(Clone)]
struct LosesItems {
    db: Database,
}

impl SaleStore for LosesItems {
    async fn insert_transaction(&self, header: &Transaction) -> DbResult<()> {
        self.db.insert_transaction(header).await
    }

    async fn insert_items(&self, _items: &[TransactionItem]) -> DbResult<()> {
        Err(DbError::TransactionFailed("connection reset".to_string()))
    }
}

impl StockStore for LosesItems {
    async fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
        at: DateTime<Utc>,
    ) -> DbResult<Option<StockAdjustment>> {
        self.db.adjust_stock(product_id, delta, at).await
    }
}

impl CashierDirectory for LosesItems {
    async fn cashier_name(&self, cashier_id: &str) -> DbResult<Option<String>> {
        self.db.cashier_name(cashier_id).await
    }
}

#[tokio::test]
async fn test_stock_failure_keeps_the_sale() {
    let db = memory_db().await;
    let kasir = cashier(&db, "kasir1").await;
    let kaos = product(&db, "Kaos Polos", 10, 50_000).await;
    let rok = product(&db, "Rok Plisket", 10, 80_000).await;

    let store = BrokenShelf {
        db: db.clone(),
        broken_product: rok.id.clone(),
    };
    let checkout = Checkout::new(store, &config());

    let outcome = checkout
        .checkout(request(&kasir, &[(&kaos, 1), (&rok, 2)], None, 300_000))
        .await
        .unwrap();

    assert_eq!(outcome.stock_failures(), 1);
    assert!(matches!(
        &outcome.warnings[0],
        StockWarning::UpdateFailed { product_id, quantity: 2, .. } if *product_id == rok.id
    ));
    assert_eq!(stock_of(&db, &kaos).await, 9);
    assert_eq!(stock_of(&db, &rok).await, 10);

    // the sale is intact and readable
    let history = HistoryReader::new(db.clone(), &config());
    let detail = history
        .get_transaction(&outcome.receipt.transaction_id)
        .await
        .unwrap();
    assert_eq!(detail, outcome.receipt);
    assert_eq!(detail.total, Money::new(210_000));
    assert_eq!(detail.items.len(), 2);
}

#[tokio::test]
async fn test_lost_items_are_reported_not_hidden() {
    let db = memory_db().await;
    let kasir = cashier(&db, "kasir1").await;
    let kaos = product(&db, "Kaos Polos", 10, 50_000).await;

    let checkout = Checkout::new(LosesItems { db: db.clone() }, &config());
    let err = checkout
        .checkout(request(&kasir, &[(&kaos, 1)], None, 50_000))
        .await
        .unwrap_err();

    let CheckoutError::ItemsNotRecorded { transaction_id, .. } = &err else {
        panic!("expected ItemsNotRecorded, got {err:?}");
    };

    // header stays, no lines, stock untouched
    let history = HistoryReader::new(db.clone(), &config());
    let detail = history.get_transaction(transaction_id).await.unwrap();
    assert!(detail.items.is_empty());
    assert_eq!(detail.total, Money::new(50_000));
    assert_eq!(stock_of(&db, &kaos).await, 10);
}

#[tokio::test]
async fn test_failed_header_is_plain_persistence_error() {
    let db = memory_db().await;
    let kasir = cashier(&db, "kasir1").await;
    let kaos = product(&db, "Kaos Polos", 10, 50_000).await;
    db.close().await;

    let checkout = Checkout::new(LosesItems { db: db.clone() }, &config());
    let err = checkout
        .checkout(request(&kasir, &[(&kaos, 1)], None, 50_000))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Persistence(_)));
}
