//! # Catalog Error Types
//!
//! Error types for fetching the product list.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / url::ParseError / serde_json::Error                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError::CatalogUnavailable (in the app) ← Serialized for the UI     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Product grid shows the terminal error state (no retry)                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A single malformed product is *not* a `CatalogError`: it is logged and
//! skipped during decoding (see [`crate::wire`]).

use thiserror::Error;

/// Product fetch errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured base URL cannot be used.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    ///
    /// ## When This Occurs
    /// - DNS failure, connection refused
    /// - TLS handshake failure
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    /// No response within the configured timeout.
    #[error("Catalog request timed out after {0} seconds")]
    Timeout(u64),

    /// The endpoint answered with a non-success status.
    #[error("Catalog returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The body is not the expected product list envelope.
    #[error("Catalog response could not be decoded: {0}")]
    DecodeFailed(String),
}

impl CatalogError {
    /// Whether the failure came from the network rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CatalogError::RequestFailed(_) | CatalogError::Timeout(_)
        )
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::DecodeFailed(err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
