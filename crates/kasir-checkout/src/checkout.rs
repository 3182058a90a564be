//! # Checkout Orchestrator
//!
//! Validates and prices a request, records the sale, then brings stock in
//! line with it.
//!
//! ## Failure Semantics
//! ```text
//! ┌──────────────────────────┬──────────────────────┬──────────────────────┐
//! │ Step                     │ On failure           │ Store afterwards     │
//! ├──────────────────────────┼──────────────────────┼──────────────────────┤
//! │ validate / price         │ InvalidCart          │ untouched            │
//! │ settle cash              │ InsufficientPayment  │ untouched            │
//! │ record header + lines    │ Persistence          │ untouched            │
//! │   (two-step store only)  │ ItemsNotRecorded     │ header without lines │
//! │ stock decrements         │ StockWarning         │ sale stands          │
//! └──────────────────────────┴──────────────────────┴──────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use kasir_core::{CartItem, CheckoutRequest, Receipt, SaleTotals, Transaction, TransactionItem};

use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, StockWarning};
use crate::ledger::StockLedger;
use crate::store::{CashierDirectory, RecordSaleError, SaleStore, StockStore};

/// A recorded sale and any stock problems found after recording it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub receipt: Receipt,
    pub warnings: Vec<StockWarning>,
}

impl CheckoutOutcome {
    /// Products whose stock was not reduced.
    pub fn stock_failures(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_failure()).count()
    }
}

#[derive(Debug, Clone)]
pub struct Checkout<S> {
    store: S,
    ledger: StockLedger<S>,
    stock_concurrency: usize,
    fallback_cashier_name: String,
}

impl<S> Checkout<S>
where
    S: SaleStore + StockStore + CashierDirectory + Clone,
{
    pub fn new(store: S, config: &CheckoutConfig) -> Self {
        Checkout {
            ledger: StockLedger::new(store.clone()),
            store,
            stock_concurrency: config.stock_concurrency.max(1),
            fallback_cashier_name: config.fallback_cashier_name.clone(),
        }
    }

    /// Runs a checkout.
    ///
    /// ## Errors
    /// * `CheckoutError::InvalidCart` - empty cart, bad line, no cashier
    /// * `CheckoutError::InsufficientPayment` - cash below the total
    /// * `CheckoutError::Persistence` - the sale was not recorded
    /// * `CheckoutError::ItemsNotRecorded` - header recorded, lines lost
    ///
    /// Stock problems never fail a checkout; they come back as warnings.
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, CheckoutError> {
        debug!(
            cashier_id = %request.cashier_id,
            lines = request.items.len(),
            "Checkout requested"
        );

        request.validate()?;

        let discount = request.discount.filter(|d| !d.is_zero());
        let totals = SaleTotals::compute(&request.items, discount.as_ref())?;
        let change = totals.settle(request.cash_tendered)?;

        let now = Utc::now();
        let header = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: request.cashier_id.trim().to_string(),
            subtotal_amount: totals.subtotal.amount(),
            discount_amount: totals.discount_amount.amount(),
            discount_kind: totals.discount.map(|d| d.discount.kind()),
            discount_value: totals.discount.map(|d| d.discount.stored_value()),
            total_amount: totals.total.amount(),
            cash_tendered: request.cash_tendered.amount(),
            change_amount: change.amount(),
            created_at: now,
        };
        let items: Vec<TransactionItem> = request
            .items
            .iter()
            .map(|item| TransactionItem {
                id: Uuid::new_v4().to_string(),
                transaction_id: header.id.clone(),
                product_id: Some(item.product_id.clone()),
                product_name: item.name.clone(),
                quantity: item.quantity,
                price: item.unit_price.amount(),
                created_at: now,
            })
            .collect();

        self.store
            .record_sale(&header, &items)
            .await
            .map_err(|e| match e {
                RecordSaleError::NothingRecorded(source) => CheckoutError::Persistence(source),
                RecordSaleError::ItemsMissing(source) => {
                    error!(
                        transaction_id = %header.id,
                        error = %source,
                        "Transaction recorded without its items"
                    );
                    CheckoutError::ItemsNotRecorded {
                        transaction_id: header.id.clone(),
                        source,
                    }
                }
            })?;

        let warnings = self.decrement_stock(&request.items).await;

        let cashier_name = match self.store.cashier_name(&header.user_id).await {
            Ok(Some(name)) => name,
            Ok(None) => self.fallback_cashier_name.clone(),
            Err(e) => {
                warn!(cashier_id = %header.user_id, error = %e, "Cashier lookup failed");
                self.fallback_cashier_name.clone()
            }
        };

        let receipt = Receipt::assemble(&header, &items, cashier_name);

        info!(
            transaction_id = %receipt.transaction_id,
            total = %receipt.total,
            items = receipt.item_count(),
            warnings = warnings.len(),
            "Checkout completed"
        );

        Ok(CheckoutOutcome { receipt, warnings })
    }

    /// One decrement per distinct product, at most `stock_concurrency` at a
    /// time. Warnings come back in cart order.
    async fn decrement_stock(&self, items: &[CartItem]) -> Vec<StockWarning> {
        let ledger = &self.ledger;

        stream::iter(quantities_by_product(items))
            .map(|(product_id, quantity)| async move {
                let result = ledger.apply_delta(&product_id, -quantity).await;
                (product_id, quantity, result)
            })
            .buffered(self.stock_concurrency)
            .filter_map(|(product_id, quantity, result)| async move {
                match result {
                    Ok(change) if change.clamped() => {
                        warn!(
                            product_id = %product_id,
                            requested = quantity,
                            available = change.previous,
                            "Sold more than was in stock"
                        );
                        Some(StockWarning::Oversold {
                            product_id,
                            requested: quantity,
                            available: change.previous,
                        })
                    }
                    Ok(_) => None,
                    Err(e) => {
                        warn!(product_id = %product_id, quantity, error = %e, "Stock update failed");
                        Some(StockWarning::UpdateFailed {
                            product_id,
                            quantity,
                            reason: e.to_string(),
                        })
                    }
                }
            })
            .collect()
            .await
    }
}

/// Sums quantities per product id, keeping first-appearance order.
fn quantities_by_product(items: &[CartItem]) -> Vec<(String, i64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, i64)> = Vec::new();

    for item in items {
        match index.get(item.product_id.as_str()) {
            Some(&i) => totals[i].1 = totals[i].1.saturating_add(item.quantity),
            None => {
                index.insert(item.product_id.as_str(), totals.len());
                totals.push((item.product_id.clone(), item.quantity));
            }
        }
    }

    totals
}

// =============================================================================
// Unit Tests
// =============================================================================
