//! # Receipts and History Views
//!
//! Read models assembled from persisted records. Assembly is pure: the same
//! header, items and cashier name always produce the same receipt, which is
//! what lets a reprint match the original slip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::ResolvedDiscount;
use crate::money::Money;
use crate::types::{Transaction, TransactionItem};

/// One printed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub product_id: Option<String>,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl From<&TransactionItem> for ReceiptLine {
    fn from(item: &TransactionItem) -> Self {
        ReceiptLine {
            product_id: item.product_id.clone(),
            name: item.product_name.clone(),
            unit_price: item.unit_price(),
            quantity: item.quantity,
            line_total: item.line_total(),
        }
    }
}

/// A completed sale, ready for display or printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub discount: Option<ResolvedDiscount>,
    pub discount_amount: Money,
    pub total: Money,
    pub cash_tendered: Money,
    pub change: Money,
    pub cashier_id: String,
    pub cashier_name: String,
}

/// Full view of a stored transaction. Same shape as the checkout receipt.
pub type TransactionDetail = Receipt;

impl Receipt {
    pub fn assemble(
        header: &Transaction,
        items: &[TransactionItem],
        cashier_name: impl Into<String>,
    ) -> Self {
        let discount = header.discount().map(|discount| ResolvedDiscount {
            discount,
            amount: header.discount_amount(),
        });

        Receipt {
            transaction_id: header.id.clone(),
            date: header.created_at,
            items: items.iter().map(ReceiptLine::from).collect(),
            subtotal: header.subtotal(),
            discount,
            discount_amount: header.discount_amount(),
            total: header.total(),
            cash_tendered: header.cash_tendered(),
            change: header.change(),
            cashier_id: header.user_id.clone(),
            cashier_name: cashier_name.into(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// One row of the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub total: Money,
    pub cashier_name: String,
    /// Number of lines on the sale.
    pub item_count: i64,
}

impl TransactionSummary {
    pub fn from_header(header: &Transaction, cashier_name: impl Into<String>, item_count: i64) -> Self {
        TransactionSummary {
            id: header.id.clone(),
            date: header.created_at,
            subtotal: header.subtotal(),
            discount_amount: header.discount_amount(),
            total: header.total(),
            cashier_name: cashier_name.into(),
            item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::{Discount, DiscountKind};

    fn header() -> Transaction {
        Transaction {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            subtotal_amount: 265_000,
            discount_amount: 26_500,
            discount_kind: Some(DiscountKind::Percentage),
            discount_value: Some(1000),
            total_amount: 238_500,
            cash_tendered: 300_000,
            change_amount: 61_500,
            created_at: Utc::now(),
        }
    }

    fn item(id: &str, name: &str, qty: i64, price: i64) -> TransactionItem {
        TransactionItem {
            id: id.to_string(),
            transaction_id: "t1".to_string(),
            product_id: Some(format!("p-{}", id)),
            product_name: name.to_string(),
            quantity: qty,
            price,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_assemble_receipt() {
        let items = vec![
            item("1", "Daster Anaya Pink", 1, 85_000),
            item("2", "Daster Dibyo", 2, 90_000),
        ];
        let receipt = Receipt::assemble(&header(), &items, "kasir1");

        assert_eq!(receipt.transaction_id, "t1");
        assert_eq!(receipt.item_count(), 2);
        assert_eq!(receipt.items[1].line_total, Money::new(180_000));
        assert_eq!(receipt.subtotal, Money::new(265_000));
        assert_eq!(
            receipt.discount,
            Some(ResolvedDiscount {
                discount: Discount::percentage(10),
                amount: Money::new(26_500),
            })
        );
        assert_eq!(receipt.total, Money::new(238_500));
        assert_eq!(receipt.change, Money::new(61_500));
        assert_eq!(receipt.cashier_name, "kasir1");
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let h = header();
        let items = vec![item("1", "Daster", 1, 85_000)];
        assert_eq!(
            Receipt::assemble(&h, &items, "kasir1"),
            Receipt::assemble(&h, &items, "kasir1")
        );
    }

    #[test]
    fn test_summary_from_header() {
        let summary = TransactionSummary::from_header(&header(), "Admin", 2);
        assert_eq!(summary.total, Money::new(238_500));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.cashier_name, "Admin");
    }

    #[test]
    fn test_receipt_json_is_camel_case() {
        let receipt = Receipt::assemble(&header(), &[], "kasir1");
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["transactionId"], "t1");
        assert_eq!(json["cashTendered"], 300_000);
        assert_eq!(json["discount"]["discount"]["kind"], "percentage");
    }
}
