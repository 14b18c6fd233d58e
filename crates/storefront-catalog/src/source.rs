//! # Product Source
//!
//! The seam between the storefront and wherever its product list comes
//! from.

use async_trait::async_trait;

use storefront_core::Product;

use crate::error::CatalogResult;

/// Something that can produce the product list once.
///
/// ## Implementations
/// - [`crate::HttpCatalog`] - `GET {base_url}/products`
/// - [`crate::StaticCatalog`] - in-memory list for offline runs and tests
///
/// The storefront calls this exactly once at startup. A failure is final:
/// the caller shows the error state and does not retry.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches every listable product, in display order.
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;

    /// Short label for logs.
    fn describe(&self) -> String;
}
