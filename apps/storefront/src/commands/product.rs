//! # Product Commands
//!
//! The product grid: the fetched list narrowed by the sidebar filters and
//! the header search box.

use serde::Serialize;
use tracing::debug;

use storefront_core::filter::STANDARD_FILTER_GROUPS;
use storefront_core::{ActiveFilterSet, Product};

use crate::error::ApiError;
use crate::state::{CatalogState, CatalogStatus, StorefrontConfig};

/// Catalog load phase as the grid sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogPhase {
    Loading,
    Loaded,
    Failed,
}

/// One card in the product grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub price_display: String,
    /// Pre-discount price, shown struck through.
    pub list_price_display: String,
}

impl ProductCard {
    fn new(product: &Product, config: &StorefrontConfig) -> Self {
        ProductCard {
            price_display: config.format_currency(product.price),
            list_price_display: config.format_currency(product.list_price()),
            product: product.clone(),
        }
    }
}

/// A checkbox in the filter sidebar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionView {
    pub label: &'static str,
    pub selected: bool,
}

/// A group of checkboxes in the filter sidebar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroupView {
    pub id: &'static str,
    pub name: &'static str,
    pub options: Vec<FilterOptionView>,
}

/// Everything the product page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub status: CatalogPhase,
    /// Set when the fetch failed.
    pub error: Option<ApiError>,
    pub products: Vec<ProductCard>,
    /// Number of products before filtering.
    pub catalog_size: usize,
    pub query: String,
    pub filters: ActiveFilterSet,
    pub groups: Vec<FilterGroupView>,
}

impl ProductsResponse {
    fn build(catalog: &CatalogState, config: &StorefrontConfig) -> Self {
        let (status, error) = match catalog.status() {
            CatalogStatus::Loading => (CatalogPhase::Loading, None),
            CatalogStatus::Loaded(_) => (CatalogPhase::Loaded, None),
            CatalogStatus::Failed(err) => (CatalogPhase::Failed, Some(err.clone())),
        };

        let products = catalog
            .visible()
            .map(|visible| {
                visible
                    .into_iter()
                    .map(|p| ProductCard::new(p, config))
                    .collect()
            })
            .unwrap_or_default();

        let catalog_size = catalog.products().map(|all| all.len()).unwrap_or(0);

        let groups = STANDARD_FILTER_GROUPS
            .iter()
            .map(|group| FilterGroupView {
                id: group.id,
                name: group.name,
                options: group
                    .options
                    .iter()
                    .map(|&label| FilterOptionView {
                        label,
                        selected: catalog.filters().is_selected(group.id, label),
                    })
                    .collect(),
            })
            .collect();

        ProductsResponse {
            status,
            error,
            products,
            catalog_size,
            query: catalog.query().to_string(),
            filters: catalog.filters().clone(),
            groups,
        }
    }
}

/// Returns the product grid as it currently stands.
pub fn list_products(catalog: &CatalogState, config: &StorefrontConfig) -> ProductsResponse {
    debug!("list_products command");
    ProductsResponse::build(catalog, config)
}

/// Checks or unchecks one sidebar option.
pub fn toggle_filter(
    catalog: &mut CatalogState,
    config: &StorefrontConfig,
    category: &str,
    option: &str,
) -> ProductsResponse {
    debug!(category = %category, option = %option, "toggle_filter command");
    catalog.toggle_filter(category, option);
    ProductsResponse::build(catalog, config)
}

/// Unchecks everything in the sidebar.
pub fn clear_filters(catalog: &mut CatalogState, config: &StorefrontConfig) -> ProductsResponse {
    debug!("clear_filters command");
    catalog.clear_filters();
    ProductsResponse::build(catalog, config)
}

/// Updates the search box. Only an empty query lifts the search constraint.
pub fn search_products(
    catalog: &mut CatalogState,
    config: &StorefrontConfig,
    query: &str,
) -> ProductsResponse {
    debug!(query = ?query, "search_products command");
    catalog.set_query(query.to_string());
    ProductsResponse::build(catalog, config)
}
