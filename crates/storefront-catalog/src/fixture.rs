//! # Static Catalog
//!
//! An in-memory product source for running the storefront without network
//! access, and for tests that need a realistic catalog.
//!
//! The sample list mirrors the public demo catalog: phones, laptops,
//! fragrances, skincare and groceries across a spread of prices and ratings.

use async_trait::async_trait;
use tracing::debug;

use storefront_core::{Money, Product};

use crate::error::CatalogResult;
use crate::source::ProductSource;

/// (id, title, price in cents, rating, discount %, category, brand)
type SampleRow = (u64, &'static str, i64, f64, f64, &'static str, &'static str);

const SAMPLE_PRODUCTS: &[SampleRow] = &[
    (1, "iPhone 9", 54900, 4.69, 12.96, "smartphones", "Apple"),
    (2, "iPhone X", 89900, 4.44, 17.94, "smartphones", "Apple"),
    (3, "Samsung Universe 9", 124900, 4.09, 15.46, "smartphones", "Samsung"),
    (4, "OPPOF19", 28000, 4.3, 17.91, "smartphones", "OPPO"),
    (5, "Huawei P30", 49900, 4.09, 10.58, "smartphones", "Huawei"),
    (6, "MacBook Pro", 174900, 4.57, 11.02, "laptops", "Apple"),
    (7, "Samsung Galaxy Book", 149900, 4.25, 4.15, "laptops", "Samsung"),
    (8, "Microsoft Surface Laptop 4", 149900, 4.43, 10.23, "laptops", "Microsoft Surface"),
    (9, "Infinix INBOOK", 109900, 4.54, 11.83, "laptops", "Infinix"),
    (10, "HP Pavilion 15-DK1056WM", 109900, 4.43, 6.18, "laptops", "HP Pavilion"),
    (11, "perfume Oil", 1300, 4.26, 8.4, "fragrances", "Impression of Acqua Di Gio"),
    (12, "Brown Perfume", 4000, 4.0, 15.66, "fragrances", "Royal_Mirage"),
    (13, "Fog Scent Xpressio Perfume", 1300, 4.59, 8.14, "fragrances", "Fog Scent Xpressio"),
    (14, "Non-Alcoholic Concentrated Perfume Oil", 12000, 4.21, 15.6, "fragrances", "Al Munakh"),
    (15, "Eau De Perfume Spray", 3000, 4.7, 10.99, "fragrances", "Lord - Al-Rehab"),
    (16, "Hyaluronic Acid Serum", 1900, 4.83, 13.31, "skincare", "L'Oreal Paris"),
    (17, "Tree Oil 30ml", 1200, 4.52, 4.09, "skincare", "Hemani Tea"),
    (18, "Oil Free Moisturizer 100ml", 4000, 4.56, 13.1, "skincare", "Dermive"),
    (19, "Skin Beauty Serum.", 4600, 4.42, 10.68, "skincare", "ROREC White Rice"),
    (20, "Freckle Treatment Cream- 15gm", 7000, 3.5, 16.99, "skincare", "Fair & Clear"),
    (21, "- Daal Masoor 500 grams", 2000, 4.44, 4.81, "groceries", "Saaf & Khaas"),
    (22, "Elbow Macaroni - 400 gm", 1400, 4.57, 15.58, "groceries", "Bake Parlor Big"),
    (23, "Orange Essence Food Flavou", 1400, 4.85, 8.04, "groceries", "Baking Food Items"),
    (24, "cereals muesli fruit nuts", 4600, 4.94, 16.8, "groceries", "fauji"),
    (25, "Gulab Powder 50 Gram", 7000, 4.87, 13.58, "groceries", "Dry Rose"),
];

/// Product source that serves a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Serves exactly `products`.
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalog { products }
    }

    /// Serves the built-in sample catalog.
    pub fn sample() -> Self {
        let products = SAMPLE_PRODUCTS
            .iter()
            .map(|&(id, title, cents, rating, discount, category, brand)| {
                let mut product = Product::new(id, title, Money::from_cents(cents))
                    .with_rating(rating)
                    .with_category(category)
                    .with_brand(brand)
                    .with_thumbnail(format!(
                        "https://cdn.dummyjson.com/product-images/{}/thumbnail.jpg",
                        id
                    ));
                product.discount_percentage = discount;
                product
            })
            .collect();
        StaticCatalog::new(products)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductSource for StaticCatalog {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        debug!(count = self.len(), "Serving static catalog");
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} products)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use storefront_core::validation::validate_product;

    #[test]
    fn test_sample_products_are_valid_and_unique() {
        let catalog = StaticCatalog::sample();
        assert_eq!(catalog.len(), SAMPLE_PRODUCTS.len());

        let mut ids = HashSet::new();
        for product in &catalog.products {
            assert!(validate_product(product).is_ok(), "{}", product.title);
            assert!(ids.insert(product.id));
        }
    }

    #[tokio::test]
    async fn test_serves_products_in_order() {
        let products = StaticCatalog::sample().fetch_products().await.unwrap();
        assert_eq!(products[0].title, "iPhone 9");
        assert_eq!(products[5].category.as_deref(), Some("laptops"));
        assert_eq!(products[5].price.cents(), 174900);
    }

    #[tokio::test]
    async fn test_custom_list() {
        let catalog = StaticCatalog::new(vec![Product::new(7, "Only", Money::from_cents(100))]);
        assert_eq!(catalog.fetch_products().await.unwrap().len(), 1);
        assert!(StaticCatalog::default().is_empty());
    }
}
