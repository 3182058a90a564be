//! # Pricing Calculator
//!
//! Exact integer totals for a list of cart lines.
//!
//! ```text
//! line_total = unit_price × quantity
//! subtotal   = Σ line_total
//! total      = subtotal − discount amount      (never below zero)
//! change     = cash tendered − total           (must not be negative)
//! ```
//!
//! Every multiplication and addition is checked; a cart whose totals would
//! leave the i64 range is rejected as an invalid cart instead of wrapping.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::discount::{Discount, ResolvedDiscount};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Total for one line.
pub fn line_total(item: &CartItem) -> CoreResult<Money> {
    item.unit_price
        .checked_mul_quantity(item.quantity)
        .ok_or_else(|| {
            CoreError::invalid_cart(format!("line total overflows for {}", item.product_id))
        })
}

/// Sum of all line totals.
///
/// ## Example
/// ```rust
/// use kasir_core::{CartItem, Money};
/// use kasir_core::pricing::subtotal;
///
/// let items = vec![CartItem::new("p1", "Kaos", Money::new(50_000), 2)];
/// assert_eq!(subtotal(&items).unwrap(), Money::new(100_000));
/// ```
pub fn subtotal(items: &[CartItem]) -> CoreResult<Money> {
    items.iter().try_fold(Money::zero(), |acc, item| {
        acc.checked_add(line_total(item)?)
            .ok_or_else(|| CoreError::invalid_cart("subtotal overflows"))
    })
}

// =============================================================================
// Cart Pricing
// =============================================================================

/// Summary shown next to the cart while the cashier edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartPricing {
    /// Per-line totals, in cart order.
    pub line_totals: Vec<Money>,
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

pub fn price_cart(items: &[CartItem]) -> CoreResult<CartPricing> {
    let line_totals = items.iter().map(line_total).collect::<CoreResult<Vec<_>>>()?;
    let subtotal = line_totals.iter().try_fold(Money::zero(), |acc, line| {
        acc.checked_add(*line)
            .ok_or_else(|| CoreError::invalid_cart("subtotal overflows"))
    })?;

    Ok(CartPricing {
        line_totals,
        item_count: items.len(),
        total_quantity: items.iter().map(|i| i.quantity).sum(),
        subtotal,
    })
}

// =============================================================================
// Sale Totals
// =============================================================================

/// Subtotal, discount and total for a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotals {
    pub subtotal: Money,
    pub discount: Option<ResolvedDiscount>,
    pub discount_amount: Money,
    pub total: Money,
}

impl SaleTotals {
    /// Prices `items` and applies `discount`, if any.
    pub fn compute(items: &[CartItem], discount: Option<&Discount>) -> CoreResult<Self> {
        let subtotal = subtotal(items)?;
        let discount = discount.map(|d| d.resolve(subtotal));
        let discount_amount = discount.map(|d| d.amount).unwrap_or_default();
        let total = (subtotal - discount_amount).max(Money::zero());

        Ok(SaleTotals {
            subtotal,
            discount,
            discount_amount,
            total,
        })
    }

    /// Change owed for `cash_tendered`.
    ///
    /// ## Errors
    /// [`CoreError::InsufficientPayment`] when the cash does not cover the total.
    pub fn settle(&self, cash_tendered: Money) -> CoreResult<Money> {
        if cash_tendered < self.total {
            return Err(CoreError::InsufficientPayment {
                total: self.total,
                tendered: cash_tendered,
            });
        }
        Ok(cash_tendered - self.total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, qty: i64) -> CartItem {
        CartItem::new(id, format!("Item {}", id), Money::new(price), qty)
    }

    #[test]
    fn test_single_line_no_discount() {
        let items = vec![item("a", 50_000, 2)];
        let totals = SaleTotals::compute(&items, None).unwrap();

        assert_eq!(totals.subtotal, Money::new(100_000));
        assert_eq!(totals.discount, None);
        assert_eq!(totals.discount_amount, Money::zero());
        assert_eq!(totals.total, Money::new(100_000));
        assert_eq!(totals.settle(Money::new(150_000)).unwrap(), Money::new(50_000));
    }

    #[test]
    fn test_percentage_discount_scenario() {
        let items = vec![item("a", 85_000, 1), item("b", 90_000, 2)];
        let totals = SaleTotals::compute(&items, Some(&Discount::percentage(10))).unwrap();

        assert_eq!(totals.subtotal, Money::new(265_000));
        assert_eq!(totals.discount_amount, Money::new(26_500));
        assert_eq!(totals.total, Money::new(238_500));
        assert_eq!(totals.settle(Money::new(300_000)).unwrap(), Money::new(61_500));
    }

    #[test]
    fn test_fixed_discount_larger_than_subtotal() {
        let items = vec![item("a", 100_000, 1)];
        let totals =
            SaleTotals::compute(&items, Some(&Discount::fixed(Money::new(500_000)))).unwrap();

        assert_eq!(totals.discount_amount, Money::new(100_000));
        assert_eq!(totals.total, Money::zero());
        assert_eq!(totals.settle(Money::zero()).unwrap(), Money::zero());
    }

    #[test]
    fn test_insufficient_payment() {
        let items = vec![item("a", 100_000, 1)];
        let totals = SaleTotals::compute(&items, None).unwrap();

        let err = totals.settle(Money::new(99_999)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientPayment { total, tendered }
                if total == Money::new(100_000) && tendered == Money::new(99_999)
        ));
    }

    #[test]
    fn test_cart_pricing_summary() {
        let items = vec![item("a", 1_000, 3), item("b", 2_500, 2)];
        let pricing = price_cart(&items).unwrap();

        assert_eq!(pricing.line_totals, vec![Money::new(3_000), Money::new(5_000)]);
        assert_eq!(pricing.item_count, 2);
        assert_eq!(pricing.total_quantity, 5);
        assert_eq!(pricing.subtotal, Money::new(8_000));
    }

    #[test]
    fn test_overflow_is_invalid_cart() {
        let items = vec![item("a", i64::MAX, 2)];
        assert!(matches!(subtotal(&items), Err(CoreError::InvalidCart { .. })));

        let items = vec![item("a", i64::MAX, 1), item("b", 1, 1)];
        assert!(matches!(subtotal(&items), Err(CoreError::InvalidCart { .. })));
    }

    #[test]
    fn test_empty_subtotal_is_zero() {
        assert_eq!(subtotal(&[]).unwrap(), Money::zero());
    }
}
