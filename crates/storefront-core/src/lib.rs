//! # storefront-core: Pure State Logic for the Storefront
//!
//! Every state transition the storefront performs lives here as a pure
//! function: `(current state, input) -> new state`, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI layer (out of scope)                      │   │
//! │  │   Product grid ──► Cart popover ──► Cart page ──► Payment modal │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ events                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │   cart   │ │  toggle  │ │  filter  │ │     checkout     │  │   │
//! │  │   │ CartState│ │CartToggle│ │ Registry │ │ CheckoutSummary  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │            storefront-catalog (product list fetch)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog `Product`
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart line items and the cart state transitions
//! - [`toggle`] - Cart popover open/closed flag
//! - [`filter`] - Filter registry, active filter set and search
//! - [`checkout`] - Discount codes and the checkout summary
//! - [`validation`] - Input checks for catalog records
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::CartState;
//! use storefront_core::money::Money;
//! use storefront_core::types::Product;
//!
//! let phone = Product::new(1, "iPhone 9", Money::from_cents(54900));
//!
//! let cart = CartState::new().add_item(&phone).add_item(&phone);
//!
//! assert_eq!(cart.total_amount(), 2);
//! assert_eq!(cart.total_price().cents(), 109800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod filter;
pub mod money;
pub mod toggle;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLineItem, CartState};
pub use checkout::{
    CheckoutPolicy, CheckoutSummary, DiscountCode, DiscountState, DiscountStatus, PaymentRequest,
};
pub use error::{CoreError, ValidationError};
pub use filter::{ActiveFilterSet, FilterRegistry};
pub use money::Money;
pub use toggle::CartToggle;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest rating a catalog product can carry.
pub const MAX_RATING: f64 = 5.0;
