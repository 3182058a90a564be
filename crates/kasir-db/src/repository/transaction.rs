//! # Transaction Repository
//!
//! Recorded sales: headers in `transactions`, lines in `transaction_items`.
//!
//! ## Atomic Recording
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale(header, items)                                             │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO transactions ...                                         │
//! │    INSERT INTO transaction_items ...   (one per line)                   │
//! │  COMMIT        ← any failure before here rolls everything back          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! `insert_header` and `insert_items` remain available separately for
//! callers that record in two steps.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{Transaction, TransactionItem};

const TRANSACTION_COLUMNS: &str = "t.id AS id, t.user_id AS user_id, \
     t.subtotal_amount AS subtotal_amount, t.discount_amount AS discount_amount, \
     t.discount_kind AS discount_kind, t.discount_value AS discount_value, \
     t.total_amount AS total_amount, t.cash_tendered AS cash_tendered, \
     t.change_amount AS change_amount, t.created_at AS created_at";

const ITEM_COLUMNS: &str =
    "id, transaction_id, product_id, product_name, quantity, price, created_at";

/// A header joined with what the history list shows beside it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TransactionListing {
    #[sqlx(flatten)]
    pub transaction: Transaction,
    /// `None` when the cashier is not in the user table.
    pub cashier_name: Option<String>,
    pub item_count: i64,
}

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Writes header and lines in one database transaction.
    pub async fn record_sale(
        &self,
        header: &Transaction,
        items: &[TransactionItem],
    ) -> DbResult<()> {
        debug!(id = %header.id, items = items.len(), "Recording sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        insert_header_with(&mut *tx, header).await?;
        for item in items {
            insert_item_with(&mut *tx, item).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Inserts a header on its own.
    pub async fn insert_header(&self, header: &Transaction) -> DbResult<()> {
        debug!(id = %header.id, "Inserting transaction header");
        insert_header_with(&self.pool, header).await
    }

    /// Inserts a batch of lines; the batch is all-or-nothing.
    pub async fn insert_items(&self, items: &[TransactionItem]) -> DbResult<()> {
        debug!(count = items.len(), "Inserting transaction items");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        for item in items {
            insert_item_with(&mut *tx, item).await?;
        }
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions t WHERE t.id = ?1");
        let header = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(header)
    }

    /// Lines of a sale in the order they were rung up.
    pub async fn get_items(&self, transaction_id: &str) -> DbResult<Vec<TransactionItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM transaction_items WHERE transaction_id = ?1 ORDER BY rowid"
        );
        let items = sqlx::query_as::<_, TransactionItem>(&sql)
            .bind(transaction_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Headers newest first, optionally within `[from, until)` and capped at
    /// `limit`.
    pub async fn list(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        limit: Option<u32>,
    ) -> DbResult<Vec<TransactionListing>> {
        debug!(?range, ?limit, "Listing transactions");

        let (from, until) = match range {
            Some((from, until)) => (Some(from), Some(until)),
            None => (None, None),
        };
        // LIMIT -1 is SQLite for "no limit"
        let limit = limit.map(i64::from).unwrap_or(-1);

        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}, u.username AS cashier_name, \
               (SELECT COUNT(*) FROM transaction_items i WHERE i.transaction_id = t.id) AS item_count \
             FROM transactions t \
             LEFT JOIN users u ON u.id = t.user_id \
             WHERE (?1 IS NULL OR t.created_at >= ?1) \
               AND (?2 IS NULL OR t.created_at < ?2) \
             ORDER BY t.created_at DESC, t.rowid DESC \
             LIMIT ?3"
        );
        let rows = sqlx::query_as::<_, TransactionListing>(&sql)
            .bind(from)
            .bind(until)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listing returned transactions");
        Ok(rows)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

async fn insert_header_with<'e, E>(executor: E, header: &Transaction) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO transactions (
            id, user_id, subtotal_amount, discount_amount, discount_kind,
            discount_value, total_amount, cash_tendered, change_amount, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(&header.id)
    .bind(&header.user_id)
    .bind(header.subtotal_amount)
    .bind(header.discount_amount)
    .bind(header.discount_kind)
    .bind(header.discount_value)
    .bind(header.total_amount)
    .bind(header.cash_tendered)
    .bind(header.change_amount)
    .bind(header.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

async fn insert_item_with<'e, E>(executor: E, item: &TransactionItem) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO transaction_items (
            id, transaction_id, product_id, product_name, quantity, price, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&item.id)
    .bind(&item.transaction_id)
    .bind(&item.product_id)
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(item.price)
    .bind(item.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
