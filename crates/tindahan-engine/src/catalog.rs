//! # Catalog Engine
//!
//! The authoritative product collection.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Operations                                   │
//! │                                                                         │
//! │  Shell Action             Catalog Method          Collection Change     │
//! │  ────────────             ──────────────          ─────────────────     │
//! │                                                                         │
//! │  Save new product ───────► add_product() ───────► products.push(p)     │
//! │                                                                         │
//! │  Save edited product ────► update_product() ────► products[i] = p'     │
//! │                                                                         │
//! │  Confirm delete ─────────► delete_product() ────► products.remove(i)   │
//! │                                                                         │
//! │  Type in search box ─────► query() ─────────────► (read only)          │
//! │  Tap sort chip                                                         │
//! │                                                                         │
//! │  Stat cards ─────────────► aggregate_stats() ───► (read only)          │
//! │                                                                         │
//! │  NOTE: status is recomputed inside Product::create / Product::apply.   │
//! │        No method here writes it.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};

use tindahan_core::search::SearchQuery;
use tindahan_core::{CoreError, CoreResult, InventoryStats, Product, ProductInput, SortBy};

/// The product collection.
///
/// ## Invariants
/// - Ids are unique (assigned here, never taken from the caller)
/// - Every product's `status` matches its `stock`
/// - Stored order is insertion order; projections never reorder it
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            products: Vec::new(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Validates `input`, assigns an id and inserts the product.
    pub fn add_product(&mut self, input: &ProductInput) -> CoreResult<Product> {
        let product = Product::create(input, Utc::now()).inspect_err(|e| {
            warn!(error = %e, name = %input.name, "Rejected new product");
        })?;

        info!(
            product_id = %product.id(),
            name = %product.name(),
            stock = product.stock(),
            status = %product.status(),
            "Product added"
        );

        self.products.push(product.clone());
        Ok(product)
    }

    /// Replaces the editable fields of product `id`.
    ///
    /// ## Returns
    /// - `Ok(Product)` - the updated product
    /// - `Err(ProductNotFound)` - no such id
    /// - `Err(Validation)` - bad input; the product is unchanged
    pub fn update_product(&mut self, id: &str, input: &ProductInput) -> CoreResult<Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        let previous = product.status();
        product.apply(input, Utc::now()).inspect_err(|e| {
            warn!(product_id = %id, error = %e, "Rejected product update");
        })?;

        info!(
            product_id = %id,
            stock = product.stock(),
            from = %previous,
            to = %product.status(),
            "Product updated"
        );
        Ok(product.clone())
    }

    /// Removes product `id` and returns it.
    ///
    /// An unknown id is reported as `ProductNotFound`, the same as for
    /// updates, so the shell can tell a stale list from a successful delete.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        let removed = self.products.remove(index);
        info!(product_id = %id, name = %removed.name(), "Product deleted");
        Ok(removed)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Gets a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// The full collection in stored order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Products whose name or category contains `query`, ignoring case.
    ///
    /// An empty query returns every product, in stored order.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let query = SearchQuery::new(query);
        let results: Vec<Product> = self
            .products
            .iter()
            .filter(|p| query.matches(p.name()) || query.matches_opt(p.category()))
            .cloned()
            .collect();

        debug!(query = %query.as_str(), count = results.len(), "Catalog search");
        results
    }

    /// Every product ordered by `by`. The stored order is untouched.
    pub fn sort(&self, by: SortBy) -> Vec<Product> {
        let mut products = self.products.clone();
        sort_products(&mut products, by);
        products
    }

    /// Search, then sort: the list the inventory screen renders.
    pub fn query(&self, query: &str, by: SortBy) -> Vec<Product> {
        let mut products = self.search(query);
        sort_products(&mut products, by);
        products
    }

    /// Counts by stock status over the full collection.
    pub fn aggregate_stats(&self) -> InventoryStats {
        InventoryStats::collect(&self.products)
    }

    /// Products that need restocking, emptiest first.
    pub fn low_stock_alerts(&self) -> Vec<Product> {
        let mut alerts: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.status().needs_restock())
            .cloned()
            .collect();
        alerts.sort_by_key(|p| p.stock());
        alerts
    }
}

/// Orders an already-projected product list in place.
///
/// Stable, so products with equal keys keep their relative order.
pub fn sort_products(products: &mut [Product], by: SortBy) {
    products.sort_by(|a, b| by.compare(a, b));
}

// =============================================================================
// Unit Tests
// =============================================================================
