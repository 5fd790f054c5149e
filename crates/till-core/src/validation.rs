//! # Validation Module
//!
//! Form checks for Till POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (front end)                                             │
//! │  ├── THIS MODULE: required fields, ranges, password rules              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store operation (PosStore)                                   │
//! │  ├── Catalog / cart: accepts what it is given                          │
//! │  └── Accounts: duplicate email at registration, credential checks      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog operations never call into this module themselves; the product
//! dialog runs [`validate_product`] before `add_product` / `update_product`.
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_password, validate_quantity};
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_password("abc").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewUser, Product, UserEdit};
use crate::MIN_PASSWORD_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

// =============================================================================
// Catalog
// =============================================================================

/// Validates the product dialog.
///
/// ## Rules
/// - Name and category are required
/// - Price must be greater than zero
/// - Stock quantity cannot be negative
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    require(&product.name, "Name")?;
    require(&product.category, "Category")?;

    if !product.price().is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "Price".to_string(),
        });
    }

    if product.stock_quantity < 0 {
        return Err(ValidationError::Negative {
            field: "Stock quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity typed into the cart.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Accounts
// =============================================================================

/// Validates the "Add User" / registration form: every field is required.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    require(&user.name, "Name")?;
    require(&user.email, "Email")?;
    require(&user.password, "Password")?;
    Ok(())
}

/// Validates the admin "Edit User" form. The password may be left blank.
pub fn validate_user_edit(edit: &UserEdit) -> ValidationResult<()> {
    validate_profile(&edit.name, &edit.email)
}

/// Validates the profile card on the settings screen.
pub fn validate_profile(name: &str, email: &str) -> ValidationResult<()> {
    require(name, "Name")?;
    require(email, "Email")?;
    Ok(())
}

/// Validates a new password.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LENGTH`] characters (an empty password fails too)
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "New password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn product() -> Product {
        Product {
            id: "p".to_string(),
            name: "Bagel".to_string(),
            price_cents: 199,
            category: "Bakery".to_string(),
            description: String::new(),
            image: String::new(),
            stock_quantity: 0,
            barcode: String::new(),
        }
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product()).is_ok());

        let mut p = product();
        p.name = "  ".to_string();
        assert!(matches!(validate_product(&p), Err(ValidationError::Required { .. })));

        let mut p = product();
        p.category = String::new();
        assert!(validate_product(&p).is_err());

        let mut p = product();
        p.price_cents = 0;
        assert!(matches!(validate_product(&p), Err(ValidationError::MustBePositive { .. })));

        let mut p = product();
        p.stock_quantity = -1;
        assert!(matches!(validate_product(&p), Err(ValidationError::Negative { .. })));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_new_user() {
        let mut user = NewUser {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::Cashier,
        };
        assert!(validate_new_user(&user).is_ok());

        user.password = String::new();
        let err = validate_new_user(&user).unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
    }

    #[test]
    fn test_validate_user_edit_allows_blank_password() {
        let edit = UserEdit {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            role: Role::Admin,
            password: None,
        };
        assert!(validate_user_edit(&edit).is_ok());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("").is_err());

        let err = validate_password("short").unwrap_err();
        assert_eq!(err.to_string(), "New password must be at least 6 characters");
    }
}
