//! # Reports
//!
//! Read-only views over the snapshot for the dashboard and the
//! transactions screen. Nothing here mutates state.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Total Sales  │ Products Sold│  Products    │ Transactions │  ◄── SalesSummary
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//! ┌─────────────────────────────┐ ┌─────────────────────────────┐
//! │ Recent sales (chart)        │ │ Low stock                   │
//! │ recent_sales(7)             │ │ low_stock(10)               │
//! └─────────────────────────────┘ └─────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::store::PosStore;
use crate::types::{Product, Transaction};

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    /// Lifetime sales amount.
    pub total_sales: Money,
    /// Units sold across every transaction.
    pub items_sold: i64,
    pub product_count: usize,
    pub transaction_count: usize,
}

impl PosStore {
    pub fn sales_summary(&self) -> SalesSummary {
        let transactions = self.transactions();
        SalesSummary {
            total_sales: transactions.iter().map(Transaction::total).sum(),
            items_sold: transactions
                .iter()
                .fold(0, |acc: i64, t| acc.saturating_add(t.item_count())),
            product_count: self.products().len(),
            transaction_count: transactions.len(),
        }
    }

    /// Products whose stock is strictly below `threshold`.
    ///
    /// The dashboard uses [`crate::LOW_STOCK_THRESHOLD`].
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.stock_quantity < threshold)
            .collect()
    }

    /// The `n` most recent transactions, oldest first (chart order).
    pub fn recent_sales(&self, n: usize) -> Vec<&Transaction> {
        let mut recent: Vec<&Transaction> = self.transactions().iter().take(n).collect();
        recent.reverse();
        recent
    }

    /// Case-insensitive match on transaction id, payment method or cashier name.
    pub fn search_transactions(&self, term: &str) -> Vec<&Transaction> {
        let needle = term.trim().to_lowercase();
        self.transactions()
            .iter()
            .filter(|t| {
                t.id.to_lowercase().contains(&needle)
                    || t.payment_method.label().contains(&needle)
                    || t.cashier_name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
