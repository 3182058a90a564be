//! # Cart
//!
//! The cashier's in-progress list of lines. Products are snapshotted into
//! the cart when added, so a later catalog price change does not move the
//! sale's total under the cashier's feet.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product(p, 2)   ──► new line, or existing line quantity += 2      │
//! │  set_quantity(id, 0) ──► line removed                                   │
//! │  set_quantity(id, 5) ──► line quantity = 5                              │
//! │  remove(id)          ──► line removed                                   │
//! │  clear()             ──► empty cart (after a completed checkout)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::Discount;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{self, CartPricing};
use crate::sale::CheckoutRequest;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// One line of a sale: a product snapshot and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,

    /// Product name at the time it was added (frozen).
    pub name: String,

    /// Unit price at the time it was added (frozen).
    pub unit_price: Money,

    pub quantity: i64,
}

impl CartItem {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        CartItem {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Snapshots a catalog product into a cart line.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price(),
            quantity,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product, merging into an existing line for the same product.
    ///
    /// ## Errors
    /// - Quantity ≤ 0 or above [`MAX_ITEM_QUANTITY`]
    /// - Merged quantity above [`MAX_ITEM_QUANTITY`]
    /// - A new line when the cart already holds [`MAX_CART_ITEMS`] lines
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        self.add_item(CartItem::from_product(product, quantity))
    }

    /// Adds an already-built line, merging by product id.
    pub fn add_item(&mut self, item: CartItem) -> CoreResult<()> {
        validate_quantity(item.quantity)?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            let merged = existing.quantity + item.quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_ITEM_QUANTITY,
                }
                .into());
            }
            existing.quantity = merged;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::invalid_cart(format!(
                "cart cannot have more than {} lines",
                MAX_CART_ITEMS
            )));
        }

        self.items.push(item);
        Ok(())
    }

    /// Sets a line's quantity. A quantity of zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        validate_quantity(quantity)?;

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::invalid_cart(format!(
                "product {} is not in the cart",
                product_id
            ))),
        }
    }

    /// Removes a line. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn pricing(&self) -> CoreResult<CartPricing> {
        pricing::price_cart(&self.items)
    }

    /// Hands the cart over to checkout.
    pub fn into_request(
        self,
        discount: Option<Discount>,
        cash_tendered: Money,
        cashier_id: impl Into<String>,
    ) -> CheckoutRequest {
        CheckoutRequest {
            items: self.items,
            discount,
            cash_tendered,
            cashier_id: cashier_id.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            stock: 10,
            price,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cart_add_product() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 50_000), 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.pricing().unwrap().subtotal, Money::new(100_000));
    }

    #[test]
    fn test_cart_add_same_product_merges() {
        let mut cart = Cart::new();
        let product = test_product("1", 50_000);

        cart.add_product(&product, 2).unwrap();
        cart.add_product(&product, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_cart_snapshot_is_frozen() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 50_000);
        cart.add_product(&product, 1).unwrap();

        product.price = 75_000;
        product.name = "Renamed".to_string();

        assert_eq!(cart.items()[0].unit_price, Money::new(50_000));
        assert_eq!(cart.items()[0].name, "Product 1");
    }

    #[test]
    fn test_cart_set_quantity() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1_000), 1).unwrap();
        cart.add_product(&test_product("2", 2_000), 1).unwrap();

        cart.set_quantity("1", 4).unwrap();
        assert_eq!(cart.items()[0].quantity, 4);

        cart.set_quantity("2", 0).unwrap();
        assert_eq!(cart.len(), 1);

        cart.set_quantity("1", -3).unwrap();
        assert!(cart.is_empty());

        assert!(cart.set_quantity("missing", 2).is_err());
    }

    #[test]
    fn test_cart_rejects_bad_quantities() {
        let mut cart = Cart::new();
        let product = test_product("1", 1_000);

        assert!(cart.add_product(&product, 0).is_err());
        assert!(cart.add_product(&product, MAX_ITEM_QUANTITY + 1).is_err());

        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();
        assert!(cart.add_product(&product, 1).is_err());
        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_product(&test_product(&i.to_string(), 1_000), 1).unwrap();
        }
        let err = cart.add_product(&test_product("extra", 1_000), 1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCart { .. }));
    }

    #[test]
    fn test_cart_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1_000), 1).unwrap();
        assert!(!cart.remove("2"));
        assert!(cart.remove("1"));

        cart.add_product(&test_product("1", 1_000), 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_into_request() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 50_000), 2).unwrap();

        let request = cart.into_request(None, Money::new(150_000), "cashier-1");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.cashier_id, "cashier-1");
    }
}
