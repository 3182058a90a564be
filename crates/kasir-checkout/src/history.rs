//! # History / Receipt Reader
//!
//! Read-only views over recorded sales. Nothing here writes, so calling any
//! of these twice returns the same data as long as no new sale lands in
//! between.
//!
//! ## Month Windows
//! ```text
//! 2024-12  →  [2024-12-01T00:00:00Z, 2025-01-01T00:00:00Z)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use kasir_core::report::summarize;
use kasir_core::{
    Receipt, SalesSummary, TransactionDetail, TransactionSummary, ValidationError, YearMonth,
};

use crate::config::CheckoutConfig;
use crate::error::HistoryError;
use crate::store::{CashierDirectory, HistoryStore};

/// Which transactions to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    /// Only this calendar month (UTC).
    pub year_month: Option<YearMonth>,
    /// At most this many, newest first.
    pub limit: Option<u32>,
}

impl TransactionFilter {
    pub fn month(year_month: YearMonth) -> Self {
        TransactionFilter {
            year_month: Some(year_month),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone)]
pub struct HistoryReader<S> {
    store: S,
    history_limit: u32,
    fallback_cashier_name: String,
}

impl<S> HistoryReader<S>
where
    S: HistoryStore + CashierDirectory,
{
    pub fn new(store: S, config: &CheckoutConfig) -> Self {
        HistoryReader {
            store,
            history_limit: config.history_limit,
            fallback_cashier_name: config.fallback_cashier_name.clone(),
        }
    }

    /// Header, lines, cashier and payment of one sale.
    ///
    /// ## Errors
    /// * `HistoryError::NotFound` - no transaction with this id
    /// * `HistoryError::Invalid` - empty id
    pub async fn get_transaction(&self, id: &str) -> Result<TransactionDetail, HistoryError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::Required {
                field: "transaction id".to_string(),
            }
            .into());
        }

        let header = self
            .store
            .find_transaction(id)
            .await?
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        let items = self.store.transaction_items(id).await?;
        let cashier_name = self.cashier_name(&header.user_id).await?;

        Ok(Receipt::assemble(&header, &items, cashier_name))
    }

    /// Transactions matching `filter`, newest first.
    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<TransactionSummary>, HistoryError> {
        debug!(?filter, "Listing transactions");

        let range = filter.year_month.map(|ym| (ym.start(), ym.end()));
        let listings = self.store.list_transactions(range, filter.limit).await?;

        Ok(listings
            .into_iter()
            .map(|listing| {
                let name = listing
                    .cashier_name
                    .unwrap_or_else(|| self.fallback_cashier_name.clone());
                TransactionSummary::from_header(&listing.transaction, name, listing.item_count)
            })
            .collect())
    }

    /// The latest sales in full, newest first. `None` uses the configured
    /// history limit.
    pub async fn recent_transactions(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<TransactionDetail>, HistoryError> {
        let limit = limit.unwrap_or(self.history_limit);
        let listings = self.store.list_transactions(None, Some(limit)).await?;

        let mut details = Vec::with_capacity(listings.len());
        for listing in listings {
            let header = listing.transaction;
            let items = self.store.transaction_items(&header.id).await?;
            let name = listing
                .cashier_name
                .unwrap_or_else(|| self.fallback_cashier_name.clone());
            details.push(Receipt::assemble(&header, &items, name));
        }
        Ok(details)
    }

    /// Totals for one month with a per-day breakdown.
    pub async fn sales_summary(&self, year_month: YearMonth) -> Result<SalesSummary, HistoryError> {
        let transactions = self
            .list_transactions(TransactionFilter::month(year_month))
            .await?;
        Ok(summarize(year_month, &transactions))
    }

    async fn cashier_name(&self, cashier_id: &str) -> Result<String, HistoryError> {
        match self.store.cashier_name(cashier_id).await? {
            Some(name) => Ok(name),
            None => {
                warn!(cashier_id = %cashier_id, "Cashier not in user table, using fallback name");
                Ok(self.fallback_cashier_name.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use kasir_core::{Money, Transaction, TransactionItem};
    use kasir_db::{Database, DbConfig};
    use uuid::Uuid;

    async fn reader() -> (Database, HistoryReader<Database>, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cashier = db.users().insert("kasir1").await.unwrap();
        let reader = HistoryReader::new(db.clone(), &CheckoutConfig::default());
        (db, reader, cashier.id)
    }

    async fn record(db: &Database, user_id: &str, at: DateTime<Utc>, total: i64) -> Transaction {
        let header = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            subtotal_amount: total,
            discount_amount: 0,
            discount_kind: None,
            discount_value: None,
            total_amount: total,
            cash_tendered: total,
            change_amount: 0,
            created_at: at,
        };
        let item = TransactionItem {
            id: Uuid::new_v4().to_string(),
            transaction_id: header.id.clone(),
            product_id: None,
            product_name: "Kaos Polos".to_string(),
            quantity: 1,
            price: total,
            created_at: at,
        };
        db.transactions().record_sale(&header, &[item]).await.unwrap();
        header
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_get_transaction_is_repeatable() {
        let (db, reader, cashier) = reader().await;
        let header = record(&db, &cashier, at(2024, 5, 1), 90_000).await;

        let first = reader.get_transaction(&header.id).await.unwrap();
        let second = reader.get_transaction(&header.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.cashier_name, "kasir1");
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.total, Money::new(90_000));
    }

    #[tokio::test]
    async fn test_get_transaction_errors() {
        let (_db, reader, _) = reader().await;
        assert!(matches!(reader.get_transaction("nope").await, Err(HistoryError::NotFound(id)) if id == "nope"));
        assert!(matches!(reader.get_transaction("  ").await, Err(HistoryError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_missing_cashier_uses_fallback() {
        let (db, reader, _) = reader().await;
        let header = record(&db, "gone", at(2024, 5, 1), 1_000).await;

        assert_eq!(reader.get_transaction(&header.id).await.unwrap().cashier_name, "Admin");
        let list = reader.list_transactions(TransactionFilter::default()).await.unwrap();
        assert_eq!(list[0].cashier_name, "Admin");
    }

    #[tokio::test]
    async fn test_december_rolls_into_next_year() {
        let (db, reader, cashier) = reader().await;
        let nov = record(&db, &cashier, at(2024, 11, 30), 1).await;
        let dec = record(&db, &cashier, at(2024, 12, 31), 2).await;
        let jan = record(&db, &cashier, at(2025, 1, 1), 3).await;

        let december = YearMonth::new(2024, 12).unwrap();
        let list = reader.list_transactions(TransactionFilter::month(december)).await.unwrap();
        let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![dec.id.as_str()]);

        let all = reader.list_transactions(TransactionFilter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![jan.id.as_str(), dec.id.as_str(), nov.id.as_str()]);

        let latest = reader.list_transactions(TransactionFilter::default().limit(1)).await.unwrap();
        assert_eq!(latest.len(), 1);
    }

    #[tokio::test]
    async fn test_recent_transactions_default_limit() {
        let (db, _, cashier) = reader().await;
        let config = CheckoutConfig {
            history_limit: 2,
            ..CheckoutConfig::default()
        };
        let reader = HistoryReader::new(db.clone(), &config);
        for day in 1..=3 {
            record(&db, &cashier, at(2024, 6, day), 1_000).await;
        }

        let recent = reader.recent_transactions(None).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].date > recent[1].date);
        assert_eq!(recent[0].items.len(), 1);
        assert_eq!(reader.recent_transactions(Some(10)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_sales_summary() {
        let (db, reader, cashier) = reader().await;
        record(&db, &cashier, at(2024, 2, 1), 100_000).await;
        record(&db, &cashier, at(2024, 2, 1), 50_001).await;
        record(&db, &cashier, at(2024, 2, 20), 30_000).await;
        record(&db, &cashier, at(2024, 3, 1), 999_999).await;

        let summary = reader.sales_summary(YearMonth::new(2024, 2).unwrap()).await.unwrap();
        assert_eq!(summary.total_sales, Money::new(180_001));
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.average_transaction, Money::new(60_000));
        assert_eq!(summary.days.len(), 2);
        assert_eq!(summary.days[0].transaction_count, 2);
        assert_eq!(summary.days[0].average_transaction, Money::new(75_001));
    }
}
