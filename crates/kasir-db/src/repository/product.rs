//! # Product Repository
//!
//! Catalog reads and edits, plus the atomic stock adjustment the stock
//! ledger is built on.
//!
//! ## Stock Adjustment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  adjust_stock(id, -3, now)                                              │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    UPDATE products SET updated_at = now WHERE id = ?  RETURNING stock   │
//! │        │   (takes the write lock; other writers wait on busy_timeout)   │
//! │        ├── 0 rows → None  (product is gone)                             │
//! │        └── 10     → previous                                            │
//! │    UPDATE products SET stock = MAX(0, stock - 3) ...  RETURNING stock   │
//! │        └── 7      → new_stock                                           │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  StockAdjustment { previous: 10, new_stock: 7 }                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Concurrent adjustments queue on SQLite's write lock instead of retrying,
//! so none of them can be lost and none can give up.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::validation::{validate_price, validate_product_name, validate_stock};
use kasir_core::Product;

const PRODUCT_COLUMNS: &str = "id, name, stock, price, image_url, created_at, updated_at";

/// Stock before and after one [`ProductRepository::adjust_stock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub previous: i64,
    pub new_stock: i64,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let results = repo.list("daster", 20).await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products whose name contains `query` (case-insensitive for
    /// ASCII), ordered by name. An empty query lists everything.
    pub async fn list(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();
        debug!(query = %query, limit = %limit, "Listing products");

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ?1 = '' OR name LIKE '%' || ?1 || '%' \
             ORDER BY name LIMIT ?2"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product (id generated by the caller).
    ///
    /// ## Errors
    /// * `DbError::Invalid` - empty name, negative stock or price
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");
        validate_catalog_fields(product)?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, stock, price, image_url, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.stock)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Catalog edit: name, price, stock and image.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Product doesn't exist
    /// * `DbError::Invalid` - empty name, negative stock or price
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");
        validate_catalog_fields(product)?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                stock = ?3,
                price = ?4,
                image_url = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.stock)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product. Past sale lines keep their snapshots and lose the
    /// product reference.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Current stock, or `None` when the product does not exist.
    pub async fn current_stock(&self, id: &str) -> DbResult<Option<i64>> {
        let stock: Option<i64> = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stock)
    }

    /// Adds `delta` to a product's stock, clamping at zero.
    ///
    /// ## Returns
    /// * `Ok(Some(_))` - stock before and after the write
    /// * `Ok(None)` - the product does not exist
    pub async fn adjust_stock(
        &self,
        id: &str,
        delta: i64,
        at: DateTime<Utc>,
    ) -> DbResult<Option<StockAdjustment>> {
        debug!(id = %id, delta, "Adjusting stock");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        // Writing first takes the write lock: `previous` cannot move before commit.
        let previous: Option<i64> = sqlx::query_scalar(
            "UPDATE products SET updated_at = ?2 WHERE id = ?1 RETURNING stock",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(previous) = previous else {
            return Ok(None);
        };

        let new_stock: i64 = sqlx::query_scalar(
            "UPDATE products SET stock = MAX(0, stock + ?2) WHERE id = ?1 RETURNING stock",
        )
        .bind(id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(Some(StockAdjustment {
            previous,
            new_stock,
        }))
    }
}

fn validate_catalog_fields(product: &Product) -> DbResult<()> {
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
