//! # Catalog State
//!
//! The product list plus everything that narrows it: active filters and
//! the search query.
//!
//! ## Load Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Status                                       │
//! │                                                                         │
//! │  ┌──────────┐   fetch ok    ┌──────────────────┐                       │
//! │  │ Loading  │──────────────►│ Loaded(products) │                       │
//! │  │          │               └──────────────────┘                       │
//! │  │          │   fetch err   ┌──────────────────┐                       │
//! │  │          │──────────────►│ Failed(ApiError) │  terminal, no retry   │
//! │  └──────────┘               └──────────────────┘                       │
//! │                                                                         │
//! │  Filters and query can change in any status; they only take effect     │
//! │  on the visible list once products are loaded.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use storefront_catalog::CatalogError;
use storefront_core::{ActiveFilterSet, FilterRegistry, Product, ProductId};

use crate::error::ApiError;

/// Where the one-shot product fetch stands.
#[derive(Debug, Clone, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Loaded(Vec<Product>),
    Failed(ApiError),
}

/// Catalog, filters and search for the product grid.
#[derive(Debug, Default)]
pub struct CatalogState {
    status: CatalogStatus,
    filters: ActiveFilterSet,
    query: String,
    registry: FilterRegistry,
}

impl CatalogState {
    /// A catalog that is still loading, with the standard filter registry.
    pub fn new() -> Self {
        CatalogState::default()
    }

    /// Uses a custom registry (extra filter groups).
    pub fn with_registry(mut self, registry: FilterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Records the outcome of the product fetch.
    ///
    /// Only the first outcome counts; later calls are ignored.
    pub fn finish_loading(&mut self, outcome: Result<Vec<Product>, CatalogError>) {
        if !matches!(self.status, CatalogStatus::Loading) {
            debug!("Ignoring catalog outcome: already settled");
            return;
        }

        self.status = match outcome {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                CatalogStatus::Loaded(products)
            }
            Err(e) => CatalogStatus::Failed(ApiError::from(&e)),
        };
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// All products, or the reason there are none to show.
    pub fn products(&self) -> Result<&[Product], ApiError> {
        match &self.status {
            CatalogStatus::Loading => Err(ApiError::catalog_loading()),
            CatalogStatus::Loaded(products) => Ok(products),
            CatalogStatus::Failed(err) => Err(err.clone()),
        }
    }

    /// Looks up a listed product by id.
    pub fn find(&self, id: ProductId) -> Result<&Product, ApiError> {
        self.products()?
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found("Product", id))
    }

    /// Products after filters and search, in catalog order.
    pub fn visible(&self) -> Result<Vec<&Product>, ApiError> {
        Ok(self
            .registry
            .apply(self.products()?, &self.filters, &self.query))
    }

    // -------------------------------------------------------------------------
    // Filters & Search
    // -------------------------------------------------------------------------

    pub fn filters(&self) -> &ActiveFilterSet {
        &self.filters
    }

    pub fn toggle_filter(&mut self, category: &str, option: &str) {
        self.filters = std::mem::take(&mut self.filters).toggle(category, option);
    }

    pub fn clear_filters(&mut self) {
        self.filters = std::mem::take(&mut self.filters).clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the search query. The text is matched exactly as typed.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::filter::CATEGORY;
    use storefront_core::Money;

    fn loaded() -> CatalogState {
        let mut catalog = CatalogState::new();
        catalog.finish_loading(Ok(vec![
            Product::new(1, "iPhone 9", Money::from_dollars(549)).with_category("smartphones"),
            Product::new(2, "MacBook Pro", Money::from_dollars(1749)).with_category("laptops"),
            Product::new(3, "Infinix INBOOK", Money::from_dollars(1099)).with_category("laptops"),
        ]));
        catalog
    }

    #[test]
    fn test_loading_state() {
        let catalog = CatalogState::new();
        assert_eq!(catalog.products().unwrap_err().code, ErrorCode::CatalogLoading);
        assert_eq!(catalog.visible().unwrap_err().code, ErrorCode::CatalogLoading);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut catalog = CatalogState::new();
        catalog.finish_loading(Err(CatalogError::HttpStatus { status: 500 }));
        catalog.finish_loading(Ok(vec![Product::new(1, "Late", Money::zero())]));

        assert!(matches!(catalog.status(), CatalogStatus::Failed(_)));
        assert_eq!(catalog.find(1).unwrap_err().code, ErrorCode::CatalogUnavailable);
    }

    #[test]
    fn test_filters_and_query() {
        let mut catalog = loaded();
        catalog.toggle_filter(CATEGORY, "laptops");
        let ids: Vec<_> = catalog.visible().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        catalog.set_query("book".to_string());
        let ids: Vec<_> = catalog.visible().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        catalog.set_query("mac".to_string());
        let ids: Vec<_> = catalog.visible().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);

        catalog.clear_filters();
        catalog.set_query(String::new());
        assert_eq!(catalog.visible().unwrap().len(), 3);
    }

    #[test]
    fn test_find() {
        let catalog = loaded();
        assert_eq!(catalog.find(2).unwrap().title, "MacBook Pro");
        assert_eq!(catalog.find(99).unwrap_err().code, ErrorCode::NotFound);
    }
}
