//! # Checkout Request
//!
//! What the register hands over when the cashier presses "Bayar".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::discount::Discount;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub discount: Option<Discount>,
    pub cash_tendered: Money,
    /// User id of the cashier ringing up the sale.
    pub cashier_id: String,
}

impl CheckoutRequest {
    /// Rejects a request that must not reach storage.
    ///
    /// ## Rules
    /// - At least one line, at most [`MAX_CART_ITEMS`]
    /// - Every line: quantity in `1..=MAX_ITEM_QUANTITY`, unit price > 0,
    ///   non-empty product id
    /// - Non-empty cashier id
    pub fn validate(&self) -> CoreResult<()> {
        if self.items.is_empty() {
            return Err(CoreError::invalid_cart("cart is empty"));
        }
        if self.items.len() > MAX_CART_ITEMS {
            return Err(CoreError::invalid_cart(format!(
                "cart has {} lines, maximum is {}",
                self.items.len(),
                MAX_CART_ITEMS
            )));
        }
        if self.cashier_id.trim().is_empty() {
            return Err(CoreError::invalid_cart("cashier id is required"));
        }

        for item in &self.items {
            if item.product_id.trim().is_empty() {
                return Err(CoreError::invalid_cart("a line has no product id"));
            }
            if item.quantity <= 0 {
                return Err(CoreError::invalid_cart(format!(
                    "quantity for {} must be positive, got {}",
                    item.product_id, item.quantity
                )));
            }
            if item.quantity > MAX_ITEM_QUANTITY {
                return Err(CoreError::invalid_cart(format!(
                    "quantity for {} exceeds maximum of {}",
                    item.product_id, MAX_ITEM_QUANTITY
                )));
            }
            if !item.unit_price.is_positive() {
                return Err(CoreError::invalid_cart(format!(
                    "unit price for {} must be positive, got {}",
                    item.product_id, item.unit_price
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: Vec<CartItem>) -> CheckoutRequest {
        CheckoutRequest {
            items,
            discount: None,
            cash_tendered: Money::new(100_000),
            cashier_id: "cashier-1".to_string(),
        }
    }

    fn line(qty: i64, price: i64) -> CartItem {
        CartItem::new("p1", "Kaos Polos", Money::new(price), qty)
    }

    #[test]
    fn test_valid_request() {
        assert!(request(vec![line(2, 50_000)]).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_cart() {
        let err = request(vec![]).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCart { .. }));
    }

    #[test]
    fn test_rejects_non_positive_quantity_and_price() {
        assert!(request(vec![line(0, 50_000)]).validate().is_err());
        assert!(request(vec![line(-1, 50_000)]).validate().is_err());
        assert!(request(vec![line(1, 0)]).validate().is_err());
        assert!(request(vec![line(1, -10)]).validate().is_err());
        assert!(request(vec![line(MAX_ITEM_QUANTITY + 1, 10)]).validate().is_err());
    }

    #[test]
    fn test_rejects_missing_cashier() {
        let mut req = request(vec![line(1, 50_000)]);
        req.cashier_id = "  ".to_string();
        assert!(matches!(req.validate(), Err(CoreError::InvalidCart { .. })));
    }

    #[test]
    fn test_deserialize_without_discount() {
        let req: CheckoutRequest = serde_json::from_str(
            r#"{"items":[{"productId":"p1","name":"Kaos","unitPrice":50000,"quantity":2}],
                "cashTendered":150000,"cashierId":"u1"}"#,
        )
        .unwrap();
        assert_eq!(req.discount, None);
        assert_eq!(req.items[0].unit_price, Money::new(50_000));
    }
}
