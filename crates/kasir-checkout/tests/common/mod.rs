//! Shared setup for the integration tests.

#![allow(dead_code)]

use chrono::Utc;
use uuid::Uuid;

use kasir_checkout::CheckoutConfig;
use kasir_core::{CartItem, CheckoutRequest, Discount, Money, Product};
use kasir_db::{Database, DbConfig};

pub async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

pub fn config() -> CheckoutConfig {
    CheckoutConfig::default().database_path(":memory:")
}

pub async fn cashier(db: &Database, username: &str) -> String {
    db.users().insert(username).await.unwrap().id
}

pub async fn product(db: &Database, name: &str, stock: i64, price: i64) -> Product {
    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        stock,
        price,
        image_url: None,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await.unwrap()
}

pub fn request(
    cashier_id: &str,
    lines: &[(&Product, i64)],
    discount: Option<Discount>,
    cash: i64,
) -> CheckoutRequest {
    CheckoutRequest {
        items: lines
            .iter()
            .map(|(p, qty)| CartItem::from_product(p, *qty))
            .collect(),
        discount,
        cash_tendered: Money::new(cash),
        cashier_id: cashier_id.to_string(),
    }
}

pub async fn stock_of(db: &Database, product: &Product) -> i64 {
    db.products().current_stock(&product.id).await.unwrap().unwrap()
}
