//! # storefront-catalog: Product Source for the Storefront
//!
//! Loads the product list the storefront displays, once, at startup.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  App startup (catalog status = Loading)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-catalog (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ ProductSource │    │  HttpCatalog  │    │ StaticCatalog│   │   │
//! │  │   │  (source.rs)  │◄───│   (http.rs)   │    │ (fixture.rs) │   │   │
//! │  │   │               │◄───┼───────────────┼────│              │   │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘   │   │
//! │  │                                │                                │   │
//! │  │                        ┌───────▼───────┐                        │   │
//! │  │                        │    wire.rs    │ decode, convert,       │   │
//! │  │                        │               │ validate, skip bad     │   │
//! │  │                        └───────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Loaded(Vec<Product>)  or  Failed(CatalogError), never retried         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`source`] - The `ProductSource` trait
//! - [`http`] - `HttpCatalog` over reqwest
//! - [`fixture`] - `StaticCatalog` with sample data
//! - [`wire`] - Endpoint DTOs and conversion to `Product`
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_catalog::{HttpCatalog, ProductSource};
//!
//! let catalog = HttpCatalog::new("https://dummyjson.com", 10)?;
//! let products = catalog.fetch_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fixture;
pub mod http;
pub mod source;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use fixture::StaticCatalog;
pub use http::HttpCatalog;
pub use source::ProductSource;
