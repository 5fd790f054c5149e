//! # Store
//!
//! `PosStore` owns the complete application state and exposes every
//! operation the front end performs on it.
//!
//! ## State Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PosStore                                        │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │ Snapshot                                                          │ │
//! │  │   products ─────── catalog.rs   (add / update / delete / search)  │ │
//! │  │   cart ─────────── this file    (add / quantity / remove / clear) │ │
//! │  │   transactions ─── this file    (complete_transaction)            │ │
//! │  │   users ────────── accounts.rs  (register / admin CRUD)           │ │
//! │  │   current_user ─── accounts.rs  (login / logout)                  │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │                                                                         │
//! │  Every method runs to completion synchronously. Callers observe the   │
//! │  post-mutation snapshot as soon as the call returns.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store has no opinion on persistence. `till-persist` wraps it and
//! writes [`PosStore::snapshot`] out after every mutating call.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::money::Money;
use crate::seed;
use crate::types::{CartItem, LineItem, PaymentMethod, Product, Transaction, User};

// =============================================================================
// Snapshot
// =============================================================================

/// The complete in-memory state at a point in time.
///
/// This is exactly what gets persisted. Missing fields deserialize to empty
/// collections so that older saved snapshots still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Snapshot {
    pub products: Vec<Product>,

    #[ts(as = "Vec<CartItem>")]
    pub cart: Cart,

    /// Newest first.
    pub transactions: Vec<Transaction>,

    pub users: Vec<User>,

    /// Copy of the signed-in account, refreshed when that account is edited.
    pub current_user: Option<User>,
}

// =============================================================================
// PosStore
// =============================================================================

/// The application state object, owned by whatever hosts the front end.
#[derive(Debug, Clone, Default)]
pub struct PosStore {
    pub(crate) state: Snapshot,
}

impl PosStore {
    /// Creates a store with no products, users or history.
    pub fn new() -> Self {
        PosStore::default()
    }

    /// Creates a store holding the first-run demo data.
    pub fn seeded() -> Self {
        PosStore::from_snapshot(seed::snapshot())
    }

    /// Restores a store from a previously saved snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        PosStore { state: snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.state
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.state.cart
    }

    /// Amount the customer will be charged for the current cart.
    pub fn cart_total(&self) -> Money {
        self.state.cart.total()
    }

    /// Adds `quantity` of `product` to the cart, merging with an existing line.
    ///
    /// Stock is not checked.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) {
        debug!(product_id = %product.id, quantity, "Adding to cart");
        self.state.cart.add_item(product, quantity);
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn update_cart_quantity(&mut self, product_id: &str, quantity: i64) {
        debug!(product_id = %product_id, quantity, "Updating cart quantity");
        self.state.cart.update_quantity(product_id, quantity);
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        debug!(product_id = %product_id, "Removing from cart");
        self.state.cart.remove_item(product_id);
    }

    pub fn clear_cart(&mut self) {
        debug!("Clearing cart");
        self.state.cart.clear();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Completes the sale of everything in the cart.
    ///
    /// ## Flow
    /// ```text
    /// cart empty? ──yes──► no-op, None
    ///      │
    /// signed in? ───no───► no-op, None
    ///      │
    ///      ▼
    /// build Transaction (prices frozen from the cart lines)
    ///      │
    ///      ▼
    /// prepend to history, empty the cart
    ///      │
    ///      ▼
    /// deduct stock per line, floored at zero
    /// ```
    ///
    /// Unmet preconditions are not errors: nothing changes and `None` comes
    /// back. On success the recorded transaction is returned as a receipt.
    pub fn complete_transaction(&mut self, payment_method: PaymentMethod) -> Option<Transaction> {
        if self.state.cart.is_empty() {
            debug!("Checkout ignored: cart is empty");
            return None;
        }
        let Some(cashier) = self.state.current_user.as_ref() else {
            debug!("Checkout ignored: nobody is signed in");
            return None;
        };

        let transaction = Transaction {
            id: new_transaction_id(),
            timestamp: Utc::now(),
            total_cents: self.state.cart.total().cents(),
            payment_method,
            cashier_id: cashier.id.clone(),
            cashier_name: cashier.name.clone(),
            items: self.state.cart.items().iter().map(line_item).collect(),
        };

        self.state.transactions.insert(0, transaction.clone());
        let sold = std::mem::take(&mut self.state.cart);

        self.deduct_stock(&sold);

        info!(
            transaction_id = %transaction.id,
            total = %transaction.total(),
            method = %payment_method,
            "Transaction completed"
        );
        Some(transaction)
    }

    /// Lowers each sold product's stock, never below zero.
    fn deduct_stock(&mut self, sold: &Cart) {
        for product in &mut self.state.products {
            if let Some(line) = sold.get(&product.id) {
                product.stock_quantity =
                    product.stock_quantity.saturating_sub(line.quantity).max(0);
            }
        }
    }

    /// Transaction history, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.state.transactions.iter().find(|t| t.id == id)
    }
}

fn line_item(item: &CartItem) -> LineItem {
    LineItem {
        product_id: item.product.id.clone(),
        product_name: item.product.name.clone(),
        quantity: item.quantity,
        price_at_time_of_sale_cents: item.product.price_cents,
    }
}

fn new_transaction_id() -> String {
    format!("tr-{}", Uuid::new_v4().simple())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in_store() -> PosStore {
        let mut store = PosStore::seeded();
        store.login("cashier@example.com", "cashier123").unwrap();
        store
    }

    fn coffee(store: &PosStore) -> Product {
        store.product("1").cloned().unwrap()
    }

    #[test]
    fn test_add_twice_merges_lines() {
        let mut store = PosStore::seeded();
        let p = coffee(&store);

        store.add_to_cart(&p, 1);
        store.add_to_cart(&p, 2);

        assert_eq!(store.cart().item_count(), 1);
        assert_eq!(store.cart().get("1").map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut store = PosStore::seeded();
        let p = coffee(&store);

        store.add_to_cart(&p, 2);
        store.update_cart_quantity("1", 0);

        assert!(store.cart().get("1").is_none());
    }

    #[test]
    fn test_checkout_records_frozen_transaction() {
        let mut store = signed_in_store();
        let p = coffee(&store);
        store.add_to_cart(&p, 2);

        let tx = store.complete_transaction(PaymentMethod::Cash).unwrap();

        assert_eq!(tx.total_cents, 798);
        assert_eq!(tx.items.len(), 1);
        assert_eq!(tx.items[0].product_id, "1");
        assert_eq!(tx.items[0].product_name, "Coffee");
        assert_eq!(tx.items[0].quantity, 2);
        assert_eq!(tx.items[0].price_at_time_of_sale_cents, 399);
        assert_eq!(tx.cashier_id, "2");
        assert_eq!(tx.cashier_name, "Cashier User");
        assert_eq!(tx.payment_method, PaymentMethod::Cash);
        assert!(tx.id.starts_with("tr-"));

        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.product("1").unwrap().stock_quantity, 98);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_checkout_with_empty_cart_is_noop() {
        let mut store = signed_in_store();
        let before = store.snapshot().clone();

        assert!(store.complete_transaction(PaymentMethod::Card).is_none());
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_checkout_without_session_is_noop() {
        let mut store = PosStore::seeded();
        let p = coffee(&store);
        store.add_to_cart(&p, 1);
        let before = store.snapshot().clone();

        assert!(store.complete_transaction(PaymentMethod::Cash).is_none());
        assert_eq!(store.snapshot(), &before);
        assert_eq!(store.cart().item_count(), 1);
    }

    #[test]
    fn test_stock_is_floored_at_zero() {
        let mut store = signed_in_store();
        let salad = store.product("5").cloned().unwrap();
        assert_eq!(salad.stock_quantity, 15);

        store.add_to_cart(&salad, 40);
        store.complete_transaction(PaymentMethod::Mobile).unwrap();

        assert_eq!(store.product("5").unwrap().stock_quantity, 0);
        assert!(store.products().iter().all(|p| p.stock_quantity >= 0));
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut store = signed_in_store();
        let p = coffee(&store);

        store.add_to_cart(&p, i64::MAX);
        store.add_to_cart(&p, i64::MAX);
        assert_eq!(store.cart().get("1").map(|i| i.quantity), Some(i64::MAX));
        assert_eq!(store.cart_total().cents(), i64::MAX);

        store.update_cart_quantity("1", i64::MAX / 100);
        let tx = store.complete_transaction(PaymentMethod::Cash).unwrap();

        assert_eq!(tx.total_cents, i64::MAX);
        assert_eq!(tx.item_count(), i64::MAX / 100);
        assert_eq!(store.product("1").unwrap().stock_quantity, 0);
        assert_eq!(store.sales_summary().total_sales.cents(), i64::MAX);
    }

    #[test]
    fn test_recorded_prices_survive_price_edits() {
        let mut store = signed_in_store();
        let p = coffee(&store);
        store.add_to_cart(&p, 1);
        let tx = store.complete_transaction(PaymentMethod::Cash).unwrap();

        let mut repriced = p.clone();
        repriced.price_cents = 499;
        store.update_product(repriced);

        let recorded = store.transaction(&tx.id).unwrap();
        assert_eq!(recorded.items[0].price_at_time_of_sale_cents, 399);
        assert_eq!(recorded.total_cents, 399);
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut store = signed_in_store();
        let p = coffee(&store);

        store.add_to_cart(&p, 1);
        let first = store.complete_transaction(PaymentMethod::Cash).unwrap();
        store.add_to_cart(&p, 1);
        let second = store.complete_transaction(PaymentMethod::Card).unwrap();

        assert_ne!(first.id, second.id);
        let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, [second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn test_checkout_only_touches_sold_products() {
        let mut store = signed_in_store();
        let tea = store.product("4").cloned().unwrap();
        let muffin = store.product("3").cloned().unwrap();
        store.add_to_cart(&tea, 3);
        store.add_to_cart(&muffin, 1);

        let tx = store.complete_transaction(PaymentMethod::Card).unwrap();

        assert_eq!(tx.total_cents, 3 * 249 + 299);
        assert_eq!(store.product("4").unwrap().stock_quantity, 77);
        assert_eq!(store.product("3").unwrap().stock_quantity, 29);
        assert_eq!(store.product("1").unwrap().stock_quantity, 100);
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut store = signed_in_store();
        let p = coffee(&store);
        store.add_to_cart(&p, 2);

        let json = serde_json::to_string(store.snapshot()).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, store.snapshot());
    }

    #[test]
    fn test_snapshot_tolerates_missing_fields() {
        let restored: Snapshot = serde_json::from_str(r#"{"products":[]}"#).unwrap();
        assert!(restored.users.is_empty());
        assert!(restored.current_user.is_none());
        assert!(restored.cart.is_empty());
    }
}
