//! # Monthly Sales Report
//!
//! Aggregates a month's transactions into totals and a per-day breakdown.
//! Days are UTC calendar days; days without sales are omitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::period::YearMonth;
use crate::receipt::TransactionSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub total_sales: Money,
    pub transaction_count: i64,
    pub average_transaction: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    #[ts(as = "String")]
    pub year_month: YearMonth,
    pub total_sales: Money,
    pub transaction_count: i64,
    pub average_transaction: Money,
    /// Ascending by date.
    pub days: Vec<DailySales>,
}

/// `total / count` rounded half up; zero when there are no transactions.
pub fn average(total: Money, count: i64) -> Money {
    if count <= 0 {
        return Money::zero();
    }
    let total = total.amount() as i128;
    let count = count as i128;
    let rounded = if total >= 0 {
        (total + count / 2) / count
    } else {
        (total - count / 2) / count
    };
    Money::new(rounded as i64)
}

/// Builds the summary for `year_month`. Transactions dated outside the month
/// are ignored.
pub fn summarize(year_month: YearMonth, transactions: &[TransactionSummary]) -> SalesSummary {
    let mut per_day: BTreeMap<NaiveDate, (Money, i64)> = BTreeMap::new();
    let mut total_sales = Money::zero();
    let mut transaction_count = 0i64;

    for t in transactions.iter().filter(|t| year_month.contains(t.date)) {
        let entry = per_day
            .entry(t.date.date_naive())
            .or_insert((Money::zero(), 0));
        entry.0 += t.total;
        entry.1 += 1;
        total_sales += t.total;
        transaction_count += 1;
    }

    let days = per_day
        .into_iter()
        .map(|(date, (total, count))| DailySales {
            date,
            total_sales: total,
            transaction_count: count,
            average_transaction: average(total, count),
        })
        .collect();

    SalesSummary {
        year_month,
        total_sales,
        transaction_count,
        average_transaction: average(total_sales, transaction_count),
        days,
    }
}
