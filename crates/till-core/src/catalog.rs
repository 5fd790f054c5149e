//! # Catalog Operations
//!
//! Product CRUD and the lookups behind the POS product grid.
//!
//! Update and delete on an unknown id do nothing. Field rules (price > 0,
//! stock >= 0, required name/category) are the product form's job, see
//! [`crate::validation::validate_product`].

use tracing::debug;

use crate::store::PosStore;
use crate::types::Product;

impl PosStore {
    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.state.products.iter().find(|p| p.id == id)
    }

    /// Appends a product to the catalog as given.
    pub fn add_product(&mut self, product: Product) {
        debug!(product_id = %product.id, name = %product.name, "Adding product");
        self.state.products.push(product);
    }

    /// Replaces the product with the same id. Unknown ids are ignored.
    pub fn update_product(&mut self, product: Product) {
        match self.state.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                debug!(product_id = %product.id, "Updating product");
                *existing = product;
            }
            None => debug!(product_id = %product.id, "Update ignored: unknown product"),
        }
    }

    /// Removes a product from the catalog. Unknown ids are ignored.
    ///
    /// Cart lines and past transactions that mention the product keep
    /// their own copies and are left alone.
    pub fn delete_product(&mut self, product_id: &str) {
        let before = self.state.products.len();
        self.state.products.retain(|p| p.id != product_id);

        if self.state.products.len() == before {
            debug!(product_id = %product_id, "Delete ignored: unknown product");
        } else {
            debug!(product_id = %product_id, "Deleted product");
        }
    }

    /// Products matching the POS search box and category tab.
    ///
    /// ## Matching
    /// - `term` matches the name case-insensitively, or the barcode as a
    ///   plain substring (scanner input). It is used as typed, untrimmed.
    /// - an empty `term` matches everything
    /// - `category`, when given, must match exactly
    pub fn search_products(&self, term: &str, category: Option<&str>) -> Vec<&Product> {
        let needle = term.to_lowercase();

        self.state
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle) || p.barcode.contains(term))
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect()
    }

    /// Distinct categories in first-seen order (the POS tab strip).
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.state.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }
}
