//! # Validation Module
//!
//! Validation for catalog records entering the storefront state.
//!
//! User input needs no checks: an unknown discount code and any search text
//! are valid inputs with defined outcomes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog ingest (storefront-catalog)                                   │
//! │  ├── Wire decoding (serde)                                             │
//! │  └── validate_product ← THIS MODULE                                    │
//! │           │  rejected records are skipped, not fatal                    │
//! │           ▼                                                             │
//! │  Pure transitions (cart, filter, checkout) assume listed products       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Product;
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a catalog product before it is listed.
///
/// ## Rules
/// - Title must not be blank
/// - Price must be non-negative
/// - Rating must be within 0.0-5.0
/// - Discount percentage must be within 0-100
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product;
/// use storefront_core::{Money, Product};
///
/// assert!(validate_product(&Product::new(1, "Mascara", Money::from_cents(1399))).is_ok());
/// assert!(validate_product(&Product::new(2, "Mascara", Money::from_cents(-1))).is_err());
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    // NaN fails both comparisons, so it is rejected here too
    if !(0.0..=MAX_RATING).contains(&product.rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0.0,
            max: MAX_RATING,
        });
    }

    if !(0.0..=100.0).contains(&product.discount_percentage) {
        return Err(ValidationError::OutOfRange {
            field: "discountPercentage".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
