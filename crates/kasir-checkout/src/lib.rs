//! # kasir-checkout: Checkout Orchestration for Kasir
//!
//! Records sales, keeps stock in step with them, and reads them back as
//! receipts and monthly summaries.
//!
//! ## Checkout Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutRequest                                                        │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  1. validate ──────────► InvalidCart            (nothing written)       │
//! │  2. price + discount                                                    │
//! │  3. settle cash ───────► InsufficientPayment    (nothing written)       │
//! │  4. SaleStore::record_sale ──► Persistence / ItemsNotRecorded           │
//! │      │                                                                  │
//! │      ▼  sale is now final                                               │
//! │  5. StockLedger::apply_delta per product (bounded, concurrent)          │
//! │      └── failures become StockWarning, never errors                     │
//! │  6. Receipt                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`service`] - `PosService`, the library boundary
//! - [`checkout`] - The checkout orchestrator
//! - [`ledger`] - Compare-and-swap stock updates
//! - [`history`] - Transaction detail, history lists, monthly summary
//! - [`store`] - Storage traits the components are written against
//! - [`sqlite`] - Store implementations for [`kasir_db::Database`]
//! - [`config`] - Environment configuration
//! - [`error`] - Error and warning types
//! - [`telemetry`] - Tracing setup for binaries

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod history;
pub mod ledger;
pub mod service;
pub mod sqlite;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{Checkout, CheckoutOutcome};
pub use config::CheckoutConfig;
pub use error::{CheckoutError, ConfigError, HistoryError, LedgerError, StockWarning};
pub use history::{HistoryReader, TransactionFilter};
pub use ledger::{StockChange, StockLedger};
pub use service::PosService;
pub use store::{CashierDirectory, HistoryStore, RecordSaleError, SaleStore, StockStore};
