//! # POS Service
//!
//! The library boundary: one handle for checkout, restock and history.
//!
//! ## Usage
//! ```rust,ignore
//! let service = PosService::open(CheckoutConfig::from_env()?).await?;
//! let outcome = service.checkout(request).await?;
//! let receipt = service.get_transaction(&outcome.receipt.transaction_id).await?;
//! ```

use tracing::info;

use kasir_core::{CheckoutRequest, SalesSummary, TransactionDetail, TransactionSummary, YearMonth};
use kasir_db::{Database, DbConfig, DbError, DbResult};

use crate::checkout::{Checkout, CheckoutOutcome};
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, HistoryError, LedgerError};
use crate::history::{HistoryReader, TransactionFilter};
use crate::ledger::{StockChange, StockLedger};
use crate::store::{CashierDirectory, HistoryStore, SaleStore, StockStore};

#[derive(Debug, Clone)]
pub struct PosService<S> {
    store: S,
    checkout: Checkout<S>,
    ledger: StockLedger<S>,
    history: HistoryReader<S>,
}

impl PosService<Database> {
    /// Opens (or creates) the configured SQLite database and applies
    /// migrations. `:memory:` gives a private in-memory database.
    pub async fn open(config: CheckoutConfig) -> DbResult<Self> {
        let db_config = if config.database_path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            if let Some(dir) = config.database_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
            }
            DbConfig::new(&config.database_path)
        };

        let db = Database::new(db_config).await?;
        info!(path = %config.database_path.display(), "POS service ready");
        Ok(PosService::new(db, config))
    }

    pub fn database(&self) -> &Database {
        &self.store
    }
}

impl<S> PosService<S>
where
    S: SaleStore + StockStore + HistoryStore + CashierDirectory + Clone,
{
    pub fn new(store: S, config: CheckoutConfig) -> Self {
        PosService {
            checkout: Checkout::new(store.clone(), &config),
            ledger: StockLedger::new(store.clone()),
            history: HistoryReader::new(store.clone(), &config),
            store,
        }
    }

    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, CheckoutError> {
        self.checkout.checkout(request).await
    }

    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<TransactionSummary>, HistoryError> {
        self.history.list_transactions(filter).await
    }

    pub async fn get_transaction(&self, id: &str) -> Result<TransactionDetail, HistoryError> {
        self.history.get_transaction(id).await
    }

    pub async fn recent_transactions(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<TransactionDetail>, HistoryError> {
        self.history.recent_transactions(limit).await
    }

    pub async fn restock(&self, product_id: &str, quantity: i64) -> Result<StockChange, LedgerError> {
        let change = self.ledger.restock(product_id, quantity).await?;
        info!(product_id = %product_id, quantity, new_stock = change.new_stock, "Restocked");
        Ok(change)
    }

    pub async fn sales_summary(&self, year_month: YearMonth) -> Result<SalesSummary, HistoryError> {
        self.history.sales_summary(year_month).await
    }
}
