//! # Product Filter Engine
//!
//! Narrows the full product list down to what the grid shows.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Filter + Search Pipeline                             │
//! │                                                                         │
//! │  all products ──► for each active category ──► title search ──► grid   │
//! │                   (AND across categories)      (case-insensitive)       │
//! │                   (OR within a category)                                │
//! │                                                                         │
//! │  ActiveFilterSet                                                       │
//! │  ┌──────────────┬──────────────────────────────┐                       │
//! │  │ "category"   │ { "laptops", "smartphones" } │ ─► laptops OR phones  │
//! │  │ "price"      │ { "Under $100" }             │ ─► AND price < 100    │
//! │  └──────────────┴──────────────────────────────┘                       │
//! │                                                                         │
//! │  FilterRegistry: category id ──► Box<dyn FilterMatcher>                │
//! │    "category" ─► FieldMatcher(category)                                │
//! │    "brand"    ─► FieldMatcher(brand)                                   │
//! │    "price"    ─► PriceBucketMatcher                                    │
//! │    "rating"   ─► RatingFloorMatcher                                    │
//! │    (unknown)  ─► always matches                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The filter is stable: the output keeps the catalog's relative order.
//! Category filtering and search are independent predicates, so applying
//! them in either order gives the same result.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Filter Category Ids
// =============================================================================

pub const CATEGORY: &str = "category";
pub const BRAND: &str = "brand";
pub const PRICE: &str = "price";
pub const RATING: &str = "rating";

// =============================================================================
// Filter Groups (what the sidebar renders)
// =============================================================================

/// A group of checkboxes in the filter sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterGroup {
    pub id: &'static str,
    pub name: &'static str,
    pub options: &'static [&'static str],
}

/// The filter groups the storefront offers, in sidebar order.
pub const STANDARD_FILTER_GROUPS: [FilterGroup; 4] = [
    FilterGroup {
        id: CATEGORY,
        name: "Category",
        options: &["smartphones", "laptops", "fragrances", "skincare", "groceries"],
    },
    FilterGroup {
        id: BRAND,
        name: "Brand",
        options: &["Apple", "Samsung", "OPPO", "Huawei"],
    },
    FilterGroup {
        id: PRICE,
        name: "Price",
        options: &[
            "Under $100",
            "$100 - $500",
            "$500 - $1000",
            "$1000 - $1500",
            "Over $1500",
        ],
    },
    FilterGroup {
        id: RATING,
        name: "Rating",
        options: &["4★ & above", "3★ & above", "2★ & above", "1★ & above"],
    },
];

// =============================================================================
// Active Filter Set
// =============================================================================

/// The user's current checkbox selections, keyed by filter category id.
///
/// A missing key means "no constraint". Toggling the last option of a
/// category off removes the key, so an empty selection never means
/// "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterSet {
    selections: BTreeMap<String, BTreeSet<String>>,
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        ActiveFilterSet::default()
    }

    /// Checks the option if unchecked, unchecks it if checked.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::filter::{ActiveFilterSet, CATEGORY};
    ///
    /// let filters = ActiveFilterSet::new().toggle(CATEGORY, "laptops");
    /// assert!(filters.is_selected(CATEGORY, "laptops"));
    ///
    /// let filters = filters.toggle(CATEGORY, "laptops");
    /// assert!(filters.selected(CATEGORY).is_none());
    /// ```
    pub fn toggle(mut self, category: &str, option: &str) -> Self {
        let selected = self.selections.entry(category.to_string()).or_default();
        if !selected.remove(option) {
            selected.insert(option.to_string());
        }
        if selected.is_empty() {
            self.selections.remove(category);
        }
        self
    }

    /// Drops every selection.
    pub fn clear(self) -> Self {
        ActiveFilterSet::default()
    }

    pub fn is_selected(&self, category: &str, option: &str) -> bool {
        self.selections
            .get(category)
            .is_some_and(|selected| selected.contains(option))
    }

    /// Options selected for `category`, or `None` when it is unconstrained.
    pub fn selected(&self, category: &str) -> Option<&BTreeSet<String>> {
        self.selections.get(category)
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Constrained categories and their selections.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.selections.iter().map(|(id, selected)| (id.as_str(), selected))
    }
}

// =============================================================================
// Matchers
// =============================================================================

/// Decides whether a product satisfies one filter category.
///
/// Only called with a non-empty selection; the product matches when it
/// satisfies ANY of the selected options.
pub trait FilterMatcher: Send + Sync {
    fn matches(&self, product: &Product, selected: &BTreeSet<String>) -> bool;
}

/// Exact match of a string field against the selected options.
///
/// A product without the field never matches.
pub struct FieldMatcher {
    field: fn(&Product) -> Option<&str>,
}

impl FieldMatcher {
    pub fn new(field: fn(&Product) -> Option<&str>) -> Self {
        FieldMatcher { field }
    }

    pub fn category() -> Self {
        FieldMatcher::new(|p| p.category.as_deref())
    }

    pub fn brand() -> Self {
        FieldMatcher::new(|p| p.brand.as_deref())
    }
}

impl FilterMatcher for FieldMatcher {
    fn matches(&self, product: &Product, selected: &BTreeSet<String>) -> bool {
        (self.field)(product).is_some_and(|value| selected.contains(value))
    }
}

/// Price ranges offered by the price filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBucket {
    Under100,
    From100To500,
    From500To1000,
    From1000To1500,
    Over1500,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 5] = [
        PriceBucket::Under100,
        PriceBucket::From100To500,
        PriceBucket::From500To1000,
        PriceBucket::From1000To1500,
        PriceBucket::Over1500,
    ];

    /// The checkbox label, which is also the option string stored in the
    /// active filter set.
    pub const fn label(self) -> &'static str {
        match self {
            PriceBucket::Under100 => "Under $100",
            PriceBucket::From100To500 => "$100 - $500",
            PriceBucket::From500To1000 => "$500 - $1000",
            PriceBucket::From1000To1500 => "$1000 - $1500",
            PriceBucket::Over1500 => "Over $1500",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        PriceBucket::ALL.into_iter().find(|b| b.label() == label)
    }

    /// Lower bound inclusive, upper bound exclusive.
    pub fn contains(self, price: Money) -> bool {
        let (low, high) = match self {
            PriceBucket::Under100 => (None, Some(100)),
            PriceBucket::From100To500 => (Some(100), Some(500)),
            PriceBucket::From500To1000 => (Some(500), Some(1000)),
            PriceBucket::From1000To1500 => (Some(1000), Some(1500)),
            PriceBucket::Over1500 => (Some(1500), None),
        };
        low.map_or(true, |d| price >= Money::from_dollars(d))
            && high.map_or(true, |d| price < Money::from_dollars(d))
    }
}

/// Bucket membership for the price filter. Unknown labels match nothing.
pub struct PriceBucketMatcher;

impl FilterMatcher for PriceBucketMatcher {
    fn matches(&self, product: &Product, selected: &BTreeSet<String>) -> bool {
        selected
            .iter()
            .filter_map(|label| PriceBucket::from_label(label))
            .any(|bucket| bucket.contains(product.price))
    }
}

/// Minimum-rating filter. Options start with the floor ("4★ & above").
pub struct RatingFloorMatcher;

impl RatingFloorMatcher {
    /// Reads the leading digits of an option as the rating floor.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::filter::RatingFloorMatcher;
    ///
    /// assert_eq!(RatingFloorMatcher::parse_floor("4★ & above"), Some(4));
    /// assert_eq!(RatingFloorMatcher::parse_floor("★ & above"), None);
    /// ```
    pub fn parse_floor(option: &str) -> Option<u32> {
        let option = option.trim_start();
        let digits_end = option
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(option.len());
        option[..digits_end].parse().ok()
    }
}

impl FilterMatcher for RatingFloorMatcher {
    fn matches(&self, product: &Product, selected: &BTreeSet<String>) -> bool {
        selected
            .iter()
            .filter_map(|option| RatingFloorMatcher::parse_floor(option))
            .any(|floor| product.rating >= f64::from(floor))
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Maps filter category ids to their matching strategy.
///
/// Categories with no registered matcher are unconstrained: selecting an
/// option under an unknown id filters nothing out.
pub struct FilterRegistry {
    matchers: HashMap<String, Box<dyn FilterMatcher>>,
}

impl FilterRegistry {
    /// A registry with no matchers; every filter category passes.
    pub fn empty() -> Self {
        FilterRegistry {
            matchers: HashMap::new(),
        }
    }

    /// The registry for the standard sidebar groups.
    pub fn standard() -> Self {
        FilterRegistry::empty()
            .register(CATEGORY, FieldMatcher::category())
            .register(BRAND, FieldMatcher::brand())
            .register(PRICE, PriceBucketMatcher)
            .register(RATING, RatingFloorMatcher)
    }

    /// Registers (or replaces) the matcher for `category`.
    pub fn register(mut self, category: &str, matcher: impl FilterMatcher + 'static) -> Self {
        self.matchers.insert(category.to_string(), Box::new(matcher));
        self
    }

    pub fn is_registered(&self, category: &str) -> bool {
        self.matchers.contains_key(category)
    }

    /// Whether `product` satisfies every constrained category.
    pub fn matches_filters(&self, product: &Product, filters: &ActiveFilterSet) -> bool {
        filters
            .iter()
            .filter(|(_, selected)| !selected.is_empty())
            .all(|(category, selected)| match self.matchers.get(category) {
                Some(matcher) => matcher.matches(product, selected),
                None => true,
            })
    }

    /// Filters then searches, keeping catalog order.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::filter::{ActiveFilterSet, FilterRegistry, PRICE};
    /// use storefront_core::{Money, Product};
    ///
    /// let products = vec![
    ///     Product::new(1, "Budget Phone", Money::from_dollars(99)),
    ///     Product::new(2, "Flagship Phone", Money::from_dollars(999)),
    ///     Product::new(3, "Budget Laptop", Money::from_dollars(80)),
    /// ];
    /// let filters = ActiveFilterSet::new().toggle(PRICE, "Under $100");
    ///
    /// let visible = FilterRegistry::standard().apply(&products, &filters, "PHONE");
    /// assert_eq!(visible.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    /// ```
    pub fn apply<'a>(
        &self,
        products: &'a [Product],
        filters: &ActiveFilterSet,
        query: &str,
    ) -> Vec<&'a Product> {
        let needle = query.to_lowercase();
        products
            .iter()
            .filter(|p| self.matches_filters(p, filters))
            .filter(|p| matches_search(p, &needle))
            .collect()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        FilterRegistry::standard()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.matchers.keys().collect();
        ids.sort();
        f.debug_struct("FilterRegistry").field("categories", &ids).finish()
    }
}

/// Case-insensitive title search. `needle` must be lowercased; an empty
/// needle matches everything.
pub fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty() || product.title_contains_lowercase(needle)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        let specs: [(u64, &str, i64, &str, Option<&str>, f64); 10] = [
            (1, "iPhone 9", 549, "smartphones", Some("Apple"), 4.69),
            (2, "iPhone X", 899, "smartphones", Some("Apple"), 4.44),
            (3, "Samsung Universe 9", 1249, "smartphones", Some("Samsung"), 4.09),
            (4, "OPPOF19", 280, "smartphones", Some("OPPO"), 4.3),
            (5, "Huawei P30", 499, "smartphones", Some("Huawei"), 4.09),
            (6, "MacBook Pro", 1749, "laptops", Some("Apple"), 4.57),
            (7, "Samsung Galaxy Book", 1499, "laptops", Some("Samsung"), 4.25),
            (8, "Microsoft Surface Laptop 4", 1499, "laptops", None, 4.43),
            (9, "perfume Oil", 13, "fragrances", None, 4.26),
            (10, "Phone Case", 12, "accessories", None, 2.5),
        ];
        specs
            .into_iter()
            .map(|(id, title, dollars, category, brand, rating)| {
                let p = Product::new(id, title, Money::from_dollars(dollars))
                    .with_category(category)
                    .with_rating(rating);
                match brand {
                    Some(b) => p.with_brand(b),
                    None => p,
                }
            })
            .collect()
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_no_filters_no_query_returns_everything() {
        let products = catalog();
        let visible = FilterRegistry::standard().apply(&products, &ActiveFilterSet::new(), "");
        assert_eq!(visible.len(), 10);
    }

    #[test]
    fn test_single_category_keeps_relative_order() {
        let products = catalog();
        let filters = ActiveFilterSet::new().toggle(CATEGORY, "laptops");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert_eq!(ids(&visible), vec![6, 7, 8]);
    }

    #[test]
    fn test_or_within_category() {
        let products = catalog();
        let filters = ActiveFilterSet::new()
            .toggle(CATEGORY, "laptops")
            .toggle(CATEGORY, "fragrances");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert_eq!(ids(&visible), vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_and_across_categories() {
        let products = catalog();
        let filters = ActiveFilterSet::new()
            .toggle(CATEGORY, "laptops")
            .toggle(BRAND, "Samsung");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert_eq!(ids(&visible), vec![7]);
    }

    #[test]
    fn test_missing_brand_never_matches() {
        let products = catalog();
        let filters = ActiveFilterSet::new()
            .toggle(BRAND, "Apple")
            .toggle(BRAND, "Samsung")
            .toggle(BRAND, "OPPO")
            .toggle(BRAND, "Huawei");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert!(visible.iter().all(|p| p.brand.is_some()));
        assert_eq!(visible.len(), 7);
    }

    #[test]
    fn test_price_bucket_boundaries() {
        assert!(PriceBucket::Under100.contains(Money::from_cents(9999)));
        assert!(!PriceBucket::Under100.contains(Money::from_dollars(100)));
        assert!(PriceBucket::From100To500.contains(Money::from_dollars(100)));
        assert!(!PriceBucket::From100To500.contains(Money::from_dollars(500)));
        assert!(PriceBucket::From500To1000.contains(Money::from_dollars(500)));
        assert!(PriceBucket::From1000To1500.contains(Money::from_cents(149999)));
        assert!(!PriceBucket::From1000To1500.contains(Money::from_dollars(1500)));
        assert!(PriceBucket::Over1500.contains(Money::from_dollars(1500)));
        assert!(PriceBucket::Under100.contains(Money::zero()));
    }

    #[test]
    fn test_price_labels_round_trip() {
        for bucket in PriceBucket::ALL {
            assert_eq!(PriceBucket::from_label(bucket.label()), Some(bucket));
        }
        assert_eq!(PriceBucket::from_label("Cheap"), None);
    }

    #[test]
    fn test_price_any_selected_bucket() {
        let products = catalog();
        let filters = ActiveFilterSet::new()
            .toggle(PRICE, "Under $100")
            .toggle(PRICE, "Over $1500");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert_eq!(ids(&visible), vec![6, 9, 10]);
    }

    #[test]
    fn test_unknown_price_label_matches_nothing() {
        let products = catalog();
        let filters = ActiveFilterSet::new().toggle(PRICE, "Free");
        assert!(FilterRegistry::standard().apply(&products, &filters, "").is_empty());
    }

    #[test]
    fn test_rating_floor() {
        let products = catalog();
        let filters = ActiveFilterSet::new().toggle(RATING, "4★ & above");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert_eq!(visible.len(), 9);
        assert!(!ids(&visible).contains(&10));

        let filters = filters.toggle(RATING, "2★ & above");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert_eq!(visible.len(), 10);
    }

    #[test]
    fn test_rating_option_without_digits_matches_nothing() {
        let products = catalog();
        let filters = ActiveFilterSet::new().toggle(RATING, "★ & above");
        assert!(FilterRegistry::standard().apply(&products, &filters, "").is_empty());
        assert_eq!(RatingFloorMatcher::parse_floor("12 stars"), Some(12));
    }

    #[test]
    fn test_unknown_category_is_permissive() {
        let products = catalog();
        let filters = ActiveFilterSet::new().toggle("color", "red");
        let visible = FilterRegistry::standard().apply(&products, &filters, "");
        assert_eq!(visible.len(), 10);
    }

    #[test]
    fn test_price_filter_with_search() {
        let products = catalog();
        let filters = ActiveFilterSet::new().toggle(PRICE, "Under $100");
        let visible = FilterRegistry::standard().apply(&products, &filters, "phone");
        // "Phone Case" is under $100, the iPhones are not
        assert_eq!(ids(&visible), vec![10]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let products = catalog();
        let registry = FilterRegistry::standard();
        let none = ActiveFilterSet::new();

        assert_eq!(ids(&registry.apply(&products, &none, "IPHONE")), vec![1, 2]);
        assert_eq!(ids(&registry.apply(&products, &none, "book")), vec![6, 7]);
        assert!(registry.apply(&products, &none, "tablet").is_empty());
    }

    #[test]
    fn test_filter_and_search_commute() {
        let products = catalog();
        let registry = FilterRegistry::standard();
        let filters = ActiveFilterSet::new()
            .toggle(CATEGORY, "smartphones")
            .toggle(RATING, "4★ & above");
        let needle = "samsung";

        let filter_first: Vec<u64> = products
            .iter()
            .filter(|p| registry.matches_filters(p, &filters))
            .filter(|p| matches_search(p, needle))
            .map(|p| p.id)
            .collect();
        let search_first: Vec<u64> = products
            .iter()
            .filter(|p| matches_search(p, needle))
            .filter(|p| registry.matches_filters(p, &filters))
            .map(|p| p.id)
            .collect();

        assert_eq!(filter_first, search_first);
        assert_eq!(filter_first, vec![3]);
    }

    #[test]
    fn test_toggle_removes_empty_category() {
        let filters = ActiveFilterSet::new()
            .toggle(BRAND, "Apple")
            .toggle(BRAND, "OPPO")
            .toggle(BRAND, "Apple");
        assert!(!filters.is_selected(BRAND, "Apple"));
        assert!(filters.is_selected(BRAND, "OPPO"));

        let filters = filters.toggle(BRAND, "OPPO");
        assert!(filters.selected(BRAND).is_none());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_clear_filters() {
        let filters = ActiveFilterSet::new()
            .toggle(BRAND, "Apple")
            .toggle(PRICE, "Under $100")
            .clear();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_custom_matcher_registration() {
        struct TitleLengthMatcher;
        impl FilterMatcher for TitleLengthMatcher {
            fn matches(&self, product: &Product, selected: &BTreeSet<String>) -> bool {
                selected.contains("short") && product.title.len() <= 8
            }
        }

        let products = catalog();
        let registry = FilterRegistry::standard().register("title", TitleLengthMatcher);
        let filters = ActiveFilterSet::new().toggle("title", "short");
        assert!(registry.is_registered("title"));
        assert_eq!(ids(&registry.apply(&products, &filters, "")), vec![1, 2, 4]);
    }

    #[test]
    fn test_standard_groups_cover_registry() {
        let registry = FilterRegistry::standard();
        for group in STANDARD_FILTER_GROUPS {
            assert!(registry.is_registered(group.id));
        }
        for label in STANDARD_FILTER_GROUPS[2].options {
            assert!(PriceBucket::from_label(label).is_some());
        }
    }

    #[test]
    fn test_filter_set_serializes_as_map() {
        let filters = ActiveFilterSet::new().toggle(CATEGORY, "laptops");
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["category"][0], "laptops");
    }
}
