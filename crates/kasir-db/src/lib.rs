//! # kasir-db: Database Layer for Kasir
//!
//! SQLite storage for the catalog, cashiers and recorded sales, using sqlx
//! for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kasir-checkout (checkout, stock ledger, history)                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ★ kasir-db (THIS CRATE) ★                                             │
//! │    Database ──► products()      ProductRepository                      │
//! │             ──► transactions()  TransactionRepository                  │
//! │             ──► users()         UserRepository                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  SQLite file (WAL)  ◄── migrations/sqlite/*.sql embedded at build time │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasir_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./kasir.db")).await?;
//! let products = db.products().list("daster", 20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::{ProductRepository, StockAdjustment};
pub use repository::transaction::{TransactionListing, TransactionRepository};
pub use repository::user::UserRepository;
