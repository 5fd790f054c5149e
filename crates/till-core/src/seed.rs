//! # Seed Data
//!
//! The state a brand-new till starts from when nothing has been saved yet.
//!
//! ## Contents
//! - Five demo products across three categories
//! - Two demo accounts with known credentials:
//!
//! | Email                 | Password     | Role    |
//! |-----------------------|--------------|---------|
//! | `admin@example.com`   | `admin123`   | admin   |
//! | `cashier@example.com` | `cashier123` | cashier |

use chrono::Utc;

use crate::cart::Cart;
use crate::store::Snapshot;
use crate::types::{Product, Role, User};

/// (id, name, price cents, category, description, image, stock, barcode)
const PRODUCTS: &[(&str, &str, i64, &str, &str, &str, i64, &str)] = &[
    ("1", "Coffee", 399, "Beverages", "Fresh brewed coffee", "/images/coffee.jpg", 100, "123456789"),
    ("2", "Sandwich", 599, "Food", "Chicken sandwich", "/images/sandwich.jpg", 20, "987654321"),
    ("3", "Muffin", 299, "Bakery", "Blueberry muffin", "/images/muffin.jpg", 30, "456789123"),
    ("4", "Tea", 249, "Beverages", "Herbal tea", "/images/tea.jpg", 80, "789123456"),
    ("5", "Salad", 699, "Food", "Fresh garden salad", "/images/salad.jpg", 15, "321654987"),
];

/// (id, name, email, password, role)
const USERS: &[(&str, &str, &str, &str, Role)] = &[
    ("1", "Admin User", "admin@example.com", "admin123", Role::Admin),
    ("2", "Cashier User", "cashier@example.com", "cashier123", Role::Cashier),
];

pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(
            |&(id, name, price_cents, category, description, image, stock_quantity, barcode)| Product {
                id: id.to_string(),
                name: name.to_string(),
                price_cents,
                category: category.to_string(),
                description: description.to_string(),
                image: image.to_string(),
                stock_quantity,
                barcode: barcode.to_string(),
            },
        )
        .collect()
}

pub fn users() -> Vec<User> {
    let now = Utc::now();
    USERS
        .iter()
        .map(|&(id, name, email, password, role)| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            created_at: now,
        })
        .collect()
}

/// First-run snapshot: demo catalog and accounts, empty cart and history,
/// nobody signed in.
pub fn snapshot() -> Snapshot {
    Snapshot {
        products: products(),
        cart: Cart::new(),
        transactions: Vec::new(),
        users: users(),
        current_user: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_contents() {
        let snapshot = snapshot();

        assert_eq!(snapshot.products.len(), 5);
        assert_eq!(snapshot.users.len(), 2);
        assert!(snapshot.cart.is_empty());
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.current_user.is_none());
    }

    #[test]
    fn test_seed_has_one_admin_and_one_cashier() {
        let users = users();
        assert_eq!(users.iter().filter(|u| u.role == Role::Admin).count(), 1);
        assert_eq!(users.iter().filter(|u| u.role == Role::Cashier).count(), 1);
    }

    #[test]
    fn test_seed_products_are_valid() {
        for product in products() {
            assert!(crate::validation::validate_product(&product).is_ok(), "{}", product.name);
        }
    }
}
