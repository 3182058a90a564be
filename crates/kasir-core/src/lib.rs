//! # kasir-core: Pure Business Logic for Kasir
//!
//! Everything about a sale that can be decided without touching storage:
//! line math, discounts, cart editing, receipt assembly and monthly
//! sales aggregation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            kasir-checkout (PosService, kasir CLI)               │   │
//! │  │   checkout ──► stock ledger ──► history / receipt reader        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  money  │ │ discount │ │ pricing │ │ receipt │ │ report │  │   │
//! │  │   │  Money  │ │ Discount │ │ Totals  │ │ Receipt │ │Summary │  │   │
//! │  │   └─────────┘ └──────────┘ └─────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer Rupiah amounts
//! - [`discount`] - Percentage / fixed discounts and the cashier's draft
//! - [`pricing`] - Line totals, subtotal, and sale totals
//! - [`cart`] - The in-progress cart a cashier edits
//! - [`sale`] - Checkout request and its validation
//! - [`types`] - Persisted records (Product, Transaction, TransactionItem, User)
//! - [`receipt`] - Read models built from persisted records
//! - [`period`] - Calendar month windows for history queries
//! - [`report`] - Monthly sales aggregation
//! - [`validation`] - Field-level rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::{CartItem, Discount, Money, SaleTotals};
//!
//! let items = vec![
//!     CartItem::new("p1", "Daster Anaya Pink", Money::new(85_000), 1),
//!     CartItem::new("p2", "Daster Dibyo", Money::new(90_000), 2),
//! ];
//! let discount = Discount::percentage(10);
//!
//! let totals = SaleTotals::compute(&items, Some(&discount)).unwrap();
//! assert_eq!(totals.subtotal, Money::new(265_000));
//! assert_eq!(totals.discount_amount, Money::new(26_500));
//! assert_eq!(totals.total, Money::new(238_500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod period;
pub mod pricing;
pub mod receipt;
pub mod report;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use discount::{Discount, DiscountDraft, DiscountKind, DiscountRate, ResolvedDiscount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use period::YearMonth;
pub use pricing::SaleTotals;
pub use receipt::{Receipt, ReceiptLine, TransactionDetail, TransactionSummary};
pub use report::{DailySales, SalesSummary};
pub use sale::CheckoutRequest;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single sale.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Catches typos at the register (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Cashier name shown when a transaction's user cannot be resolved.
pub const FALLBACK_CASHIER_NAME: &str = "Admin";
