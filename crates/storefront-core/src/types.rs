//! # Domain Types
//!
//! The catalog `Product` as the storefront sees it.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────┐              │
//! │  │      Product        │  add ──► │    CartLineItem     │  (cart.rs)   │
//! │  │  ─────────────────  │          │  ─────────────────  │              │
//! │  │  id (u64)           │          │  id                 │              │
//! │  │  title              │          │  title (snapshot)   │              │
//! │  │  price (Money)      │          │  price (snapshot)   │              │
//! │  │  thumbnail          │          │  image              │              │
//! │  │  rating 0.0-5.0     │          │  amount >= 1        │              │
//! │  │  discount_percentage│          └─────────────────────┘              │
//! │  │  category? brand?   │                                                │
//! │  └─────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable once fetched. The catalog crate converts the wire
//! format into this type and validates it on the way in.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Identifier of a catalog product (and of the cart line that holds it).
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,

    /// Display title, also the target of text search.
    pub title: String,

    /// Current catalog price.
    pub price: Money,

    /// Thumbnail image URI.
    pub thumbnail: String,

    /// Average rating, 0.0 to 5.0.
    pub rating: f64,

    /// Advertised discount, 0 to 100.
    pub discount_percentage: f64,

    /// Catalog category (e.g. "laptops").
    pub category: Option<String>,

    /// Brand name (e.g. "Apple").
    pub brand: Option<String>,
}

impl Product {
    /// Creates a product with the required fields and neutral defaults for
    /// everything else.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            thumbnail: String::new(),
            rating: 0.0,
            discount_percentage: 0.0,
            category: None,
            brand: None,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the thumbnail URI.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// The price before the advertised discount, shown struck through on
    /// the product card.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Money, Product};
    ///
    /// let mut p = Product::new(1, "Perfume", Money::from_cents(8000));
    /// p.discount_percentage = 20.0;
    /// assert_eq!(p.list_price().cents(), 10000);
    /// ```
    ///
    /// Returns the current price when the discount is 100% or more.
    pub fn list_price(&self) -> Money {
        let remaining = 1.0 - self.discount_percentage / 100.0;
        if remaining <= 0.0 {
            return self.price;
        }
        Money::from_cents((self.price.cents() as f64 / remaining).round() as i64)
    }

    /// Whether the title contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercased; the filter engine lowercases the
    /// query once per pass rather than once per product.
    pub fn title_contains_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
