//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id ("tr-...")  │   │  id             │       │
//! │  │  name, category │   │  timestamp      │   │  name, email    │       │
//! │  │  price_cents    │   │  total_cents    │   │  password       │       │
//! │  │  stock_quantity │   │  cashier        │   │  role           │       │
//! │  │  barcode        │   │  items (frozen) │   │  created_at     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │    LineItem     │   │ PaymentMethod   │       │
//! │  │  product        │   │  product_id     │   │  Cash           │       │
//! │  │  quantity       │   │  product_name   │   │  Card           │       │
//! │  └─────────────────┘   │  quantity       │   │  Mobile         │       │
//! │                        │  price at sale  │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON field names are camelCase: the browser front end reads the persisted
//! snapshot and the generated TypeScript bindings directly.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,

    /// Display name shown on the POS grid and receipts.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Free-text category; the POS screen groups products by it.
    pub category: String,

    pub description: String,

    /// Image URL or path.
    pub image: String,

    /// Units on hand. Never negative.
    pub stock_quantity: i64,

    /// Scannable code, searched by substring.
    pub barcode: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One line of the active cart.
///
/// The line carries the product record as it was when it was added; checkout
/// prices the sale from this copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash payment.
    #[default]
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Phone wallet / QR payment.
    Mobile,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Mobile];

    /// The label stored in the snapshot and shown in transaction lists.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Mobile => "mobile",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.label() == wanted)
            .ok_or_else(|| format!("Unknown payment method: {wanted}"))
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A line of a completed sale, frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub price_at_time_of_sale_cents: i64,
}

impl LineItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_at_time_of_sale_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// A completed sale. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    pub id: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    /// Sum of line totals at the recorded prices.
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    /// Account that rang the sale up.
    pub cashier_id: String,
    /// Cashier name at time of sale (frozen).
    pub cashier_name: String,
    pub items: Vec<LineItem>,
}

impl Transaction {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Number of units sold across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().fold(0, |acc, i| acc.saturating_add(i.quantity))
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    #[default]
    Cashier,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An account that can sign in to the till.
///
/// ## Security
/// The password is stored and compared in plain text. This is a known
/// limitation of the product: there is no hashing and the snapshot should be
/// treated as sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique at registration time only; admin edits are not re-checked.
    pub email: String,
    pub password: String,
    pub role: Role,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Data for a new account (registration or admin "Add User").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Changes submitted from the admin "Edit User" dialog.
///
/// An empty or missing `password` keeps the existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserEdit {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub password: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
