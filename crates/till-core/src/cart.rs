//! # Cart
//!
//! The active shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Store Operation         Cart Change          │
//! │  ─────────                 ───────────────         ───────────          │
//! │                                                                         │
//! │  Click Product ──────────► add_to_cart() ────────► push or qty += n    │
//! │                                                                         │
//! │  +/- Buttons ────────────► update_cart_quantity()► qty = n (≤0 drops)  │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ───► retain others       │
//! │                                                                         │
//! │  Clear / Checkout ───────► clear_cart() ─────────► items.clear()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never consults stock. The UI disables "+" once a line reaches
//! the product's stock ([`Cart::can_increment`]), but nothing here enforces it.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartItem, Product};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product increases quantity)
/// - No line is left with a quantity of zero or less
/// - Lines keep the order in which products were first added
///
/// Serializes as a bare array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart or increases its quantity if already present.
    ///
    /// A line whose quantity ends up at zero or below is dropped. Merged
    /// quantities saturate at `i64::MAX`.
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
            self.items.retain(|i| i.quantity > 0);
            return;
        }

        if quantity > 0 {
            self.items.push(CartItem {
                product: product.clone(),
                quantity,
            });
        }
    }

    /// Sets the quantity of a line. A quantity of zero or less removes it.
    ///
    /// Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
        self.items.retain(|i| i.quantity > 0);
    }

    /// Removes the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().fold(0, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of line totals at the prices recorded on each line.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the UI should still allow "+" on this product's line.
    ///
    /// Products not in the cart can be incremented while `stock` is positive.
    pub fn can_increment(&self, product_id: &str, stock: i64) -> bool {
        let in_cart = self.get(product_id).map_or(0, |i| i.quantity);
        in_cart < stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price_cents,
            category: "Test".to_string(),
            description: String::new(),
            image: String::new(),
            stock_quantity: 5,
            barcode: format!("BC-{id}"),
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999), 2);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total().cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 1);
        cart.add_item(&product, 2);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get("1").map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_cart_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("b", 100), 1);
        cart.add_item(&test_product("a", 100), 1);
        cart.add_item(&test_product("b", 100), 1);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_update_quantity_to_zero_or_below_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2);
        cart.add_item(&test_product("2", 100), 2);

        cart.update_quantity("1", 0);
        assert!(cart.get("1").is_none());

        cart.update_quantity("2", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2);
        cart.update_quantity("1", 7);
        assert_eq!(cart.total_quantity(), 7);

        // unknown id: nothing happens
        cart.update_quantity("nope", 3);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 1);

        cart.remove_item("missing");
        assert_eq!(cart.item_count(), 1);

        cart.remove_item("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999), 2);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_add_ignores_stock() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 50);
        assert_eq!(cart.total_quantity(), 50);
    }

    #[test]
    fn test_add_non_positive_quantity_never_leaves_empty_line() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 0);
        assert!(cart.is_empty());

        cart.add_item(&test_product("1", 100), 2);
        cart.add_item(&test_product("1", 100), -2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_saturates_instead_of_overflowing() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);

        cart.add_item(&product, i64::MAX);
        cart.add_item(&product, 1);
        cart.add_item(&test_product("2", 100), i64::MAX);

        assert_eq!(cart.get("1").map(|i| i.quantity), Some(i64::MAX));
        assert_eq!(cart.total_quantity(), i64::MAX);
        assert_eq!(cart.total().cents(), i64::MAX);
    }

    #[test]
    fn test_can_increment() {
        let mut cart = Cart::new();
        assert!(cart.can_increment("1", 5));
        assert!(!cart.can_increment("1", 0));

        cart.add_item(&test_product("1", 100), 5);
        assert!(!cart.can_increment("1", 5));
        assert!(cart.can_increment("1", 6));
    }
}
