//! # Commands Module
//!
//! Every UI event the storefront handles, as a plain function over the
//! state it touches.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Product grid: list, filter, search
//! ├── cart.rs      ◄─── Cart mutations and the popover flag
//! └── checkout.rs  ◄─── Price details, discount code, payment modal
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn search_products(catalog: &mut CatalogState, config: &StorefrontConfig, query: &str)
//!
//! // Needs catalog (to look the product up) and cart
//! fn add_to_cart(catalog: &CatalogState, cart: &mut CartSession, config: &StorefrontConfig, id)
//! ```
//!
//! Responses are plain `Serialize` structs; the shell turns them into one
//! JSON line each.

pub mod cart;
pub mod checkout;
pub mod product;
