//! # Repository Module
//!
//! Database repository implementations for Kasir.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kasir-checkout                                                        │
//! │       │  db.transactions().record_sale(&header, &items)                │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── record_sale(&self, header, items)   one SQLite transaction        │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── list(&self, range, limit)                                         │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD, search, atomic stock adjustment
//! - [`TransactionRepository`](transaction::TransactionRepository) - Sales headers and lines
//! - [`UserRepository`](user::UserRepository) - Cashier directory

pub mod product;
pub mod transaction;
pub mod user;
