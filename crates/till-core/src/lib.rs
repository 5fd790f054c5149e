//! # till-core: Pure State Store for Till POS
//!
//! This crate is the **heart** of Till POS. It holds the whole application
//! state (catalog, cart, transaction history, accounts, session) and every
//! operation the front end performs on it, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Front End                            │   │
//! │  │   Products ──► POS / Cart ──► Checkout ──► Transactions         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ store operations                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │   cart    │  │ accounts  │  │  reports  │  │   │
//! │  │   │ Snapshot  │  │   Cart    │  │  login    │  │ summary   │  │   │
//! │  │   │ checkout  │  │ CartItem  │  │ register  │  │ low stock │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • SYNCHRONOUS                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Snapshot (serde)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              till-persist (save / restore)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart lines and their quantity rules
//! - [`store`] - `PosStore` and the `Snapshot` it owns
//! - [`reports`] - Dashboard and history views derived from a snapshot
//! - [`seed`] - First-run demo data
//! - [`validation`] - Form checks the UI runs before calling the store
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{PaymentMethod, PosStore};
//!
//! let mut store = PosStore::seeded();
//! store.login("cashier@example.com", "cashier123").unwrap();
//!
//! let coffee = store.product("1").cloned().unwrap();
//! store.add_to_cart(&coffee, 2);
//!
//! let receipt = store.complete_transaction(PaymentMethod::Cash).unwrap();
//! assert_eq!(receipt.total().cents(), 798);
//! assert!(store.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod reports;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{AdminError, AuthError, ValidationError};
pub use money::Money;
pub use reports::SalesSummary;
pub use store::{PosStore, Snapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products with stock strictly below this level are reported as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Minimum length for a password set through the change-password form.
pub const MIN_PASSWORD_LENGTH: usize = 6;
