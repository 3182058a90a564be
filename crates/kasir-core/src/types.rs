//! # Domain Types
//!
//! Persisted records, one struct per table.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │ TransactionItem │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  transaction_id │       │
//! │  │  name           │   │  user_id ───────┼─► │  product_id?    │       │
//! │  │  stock ≥ 0      │   │  subtotal       │   │  product_name   │       │
//! │  │  price          │   │  discount_*     │   │  quantity       │       │
//! │  └─────────────────┘   │  total, cash    │   │  price          │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │  ┌─────────────────┐                                                    │
//! │  │      User       │   cashier directory only (no credentials)         │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money columns are stored as raw `i64`; accessors wrap them in [`Money`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::{Discount, DiscountKind};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Units on hand. Never negative at rest.
    pub stock: i64,

    /// Unit price in minor units.
    pub price: i64,

    /// Opaque image reference, carried but never interpreted.
    pub image_url: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::new(self.price)
    }
}

// =============================================================================
// User
// =============================================================================

/// A cashier as seen by history: an id and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Transaction
// =============================================================================

/// The header of a completed sale. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Cashier who rang up the sale.
    pub user_id: String,
    pub subtotal_amount: i64,
    pub discount_amount: i64,
    pub discount_kind: Option<DiscountKind>,
    /// Basis points for a percentage, minor units for a fixed amount.
    pub discount_value: Option<i64>,
    pub total_amount: i64,
    pub cash_tendered: i64,
    pub change_amount: i64,
    /// The transaction date.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::new(self.subtotal_amount)
    }

    #[inline]
    pub fn discount_amount(&self) -> Money {
        Money::new(self.discount_amount)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::new(self.total_amount)
    }

    #[inline]
    pub fn cash_tendered(&self) -> Money {
        Money::new(self.cash_tendered)
    }

    #[inline]
    pub fn change(&self) -> Money {
        Money::new(self.change_amount)
    }

    /// The discount as the cashier entered it.
    ///
    /// Rows written without a kind but with a discount amount are read back
    /// as a fixed discount of that amount.
    pub fn discount(&self) -> Option<Discount> {
        match (self.discount_kind, self.discount_value) {
            (Some(kind), Some(value)) => Some(Discount::from_stored(kind, value)),
            _ if self.discount_amount > 0 => Some(Discount::fixed(self.discount_amount())),
            _ => None,
        }
    }
}

// =============================================================================
// Transaction Item
// =============================================================================

/// A line of a completed sale. Name and price are snapshots taken at sale
/// time; the product may since have changed or been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: String,
    pub transaction_id: String,
    /// `None` once the product has been deleted from the catalog.
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at sale time.
    pub price: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl TransactionItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::new(self.price)
    }

    /// Unit price × quantity, saturating on overflow.
    pub fn line_total(&self) -> Money {
        Money::new(self.price.saturating_mul(self.quantity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn header(kind: Option<DiscountKind>, value: Option<i64>, amount: i64) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            subtotal_amount: 100_000,
            discount_amount: amount,
            discount_kind: kind,
            discount_value: value,
            total_amount: 100_000 - amount,
            cash_tendered: 100_000,
            change_amount: amount,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount_reconstruction() {
        let t = header(Some(DiscountKind::Percentage), Some(1000), 10_000);
        assert_eq!(t.discount(), Some(Discount::percentage(10)));

        let t = header(None, None, 0);
        assert_eq!(t.discount(), None);

        let t = header(None, None, 5_000);
        assert_eq!(t.discount(), Some(Discount::fixed(Money::new(5_000))));
    }

    #[test]
    fn test_item_line_total() {
        let item = TransactionItem {
            id: "i1".to_string(),
            transaction_id: "t1".to_string(),
            product_id: None,
            product_name: "Daster".to_string(),
            quantity: 3,
            price: 90_000,
            created_at: Utc::now(),
        };
        assert_eq!(item.line_total(), Money::new(270_000));
        assert_eq!(item.unit_price(), Money::new(90_000));
    }
}
