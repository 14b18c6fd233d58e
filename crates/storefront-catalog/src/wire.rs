//! # Wire Format
//!
//! The product list envelope served by the catalog endpoint, and its
//! conversion into [`storefront_core::Product`].
//!
//! ## Ingest Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Ingest                                       │
//! │                                                                         │
//! │  { "products": [ {...}, {...} ], "total", "skip", "limit" }            │
//! │       │                                                                 │
//! │       ▼  envelope must decode, or the whole fetch fails                 │
//! │  each record                                                            │
//! │       │  decode as WireProduct ──── fails ──► warn!, skip               │
//! │       │  price (decimal) → Money ── fails ──► warn!, skip               │
//! │       │  validate_product ───────── fails ──► warn!, skip               │
//! │       │  id seen before ─────────────────────► warn!, skip              │
//! │       ▼                                                                 │
//! │  Vec<Product> in endpoint order                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use storefront_core::validation::validate_product;
use storefront_core::{CoreError, Money, Product, ProductId, ValidationError};

use crate::error::CatalogResult;

/// The list envelope. Records stay as raw JSON so one bad record cannot
/// fail the whole page.
#[derive(Debug, Deserialize)]
pub struct ProductPage {
    pub products: Vec<serde_json::Value>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// One product record as the endpoint sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    pub id: ProductId,
    pub title: String,
    /// Decimal major units, e.g. `549` or `12.99`.
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Converts a decimal price to cents, rounding to the nearest cent.
///
/// Returns `None` for NaN and infinities, and for values beyond what
/// `Money` can hold.
pub fn price_to_money(price: f64) -> Option<Money> {
    if !price.is_finite() {
        return None;
    }
    let cents = (price * 100.0).round();
    // i64::MAX is not exactly representable; stay strictly inside it
    if cents.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Money::from_cents(cents as i64))
}

impl WireProduct {
    /// Converts and validates the record.
    pub fn into_product(self) -> Result<Product, CoreError> {
        let price = price_to_money(self.price).ok_or_else(|| CoreError::InvalidProduct {
            id: self.id,
            source: ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: format!("{} is not a representable amount", self.price),
            },
        })?;

        let product = Product {
            id: self.id,
            title: self.title,
            price,
            thumbnail: self.thumbnail,
            rating: self.rating,
            discount_percentage: self.discount_percentage,
            category: self.category,
            brand: self.brand,
        };

        validate_product(&product).map_err(|source| CoreError::InvalidProduct {
            id: product.id,
            source,
        })?;

        Ok(product)
    }
}

/// Decodes a response body into the listable products.
///
/// Only a body that is not a product envelope at all is an error.
pub fn decode_products(body: &[u8]) -> CatalogResult<Vec<Product>> {
    let page: ProductPage = serde_json::from_slice(body)?;
    debug!(
        records = page.products.len(),
        total = page.total,
        skip = page.skip,
        limit = page.limit,
        "Decoded product page"
    );
    Ok(collect_products(page.products))
}

/// Converts raw records, skipping (and logging) every record that cannot be
/// listed.
pub fn collect_products(records: Vec<serde_json::Value>) -> Vec<Product> {
    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let wire: WireProduct = match serde_json::from_value(record) {
            Ok(wire) => wire,
            Err(e) => {
                warn!(index, error = %e, "Skipping undecodable product record");
                continue;
            }
        };

        let product = match wire.into_product() {
            Ok(product) => product,
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid product");
                continue;
            }
        };

        if !seen.insert(product.id) {
            warn!(index, id = product.id, "Skipping duplicate product id");
            continue;
        }

        products.push(product);
    }

    products
}
