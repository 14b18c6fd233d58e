//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  stdin: "add 999"                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog failed? ─── CatalogError::HttpStatus ─────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Unknown id? ─────── ApiError::not_found ───────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown ids in cart mutations are *not* errors: the transitions treat
//! them as no-ops. `NOT_FOUND` is only raised when adding a product the
//! catalog does not list.

use serde::Serialize;
use thiserror::Error;

use storefront_catalog::CatalogError;

/// API error returned from shell commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CATALOG_UNAVAILABLE",
///   "message": "Failed to fetch products. Please try again later."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not listed in the catalog
    NotFound,

    /// The command line could not be parsed
    UnknownCommand,

    /// The product list is still being fetched
    CatalogLoading,

    /// The product list fetch failed (terminal)
    CatalogUnavailable,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates an unknown command error.
    pub fn unknown_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::UnknownCommand, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The catalog has not finished loading yet.
    pub fn catalog_loading() -> Self {
        ApiError::new(ErrorCode::CatalogLoading, "Products are still loading")
    }
}

/// Converts catalog errors to API errors.
///
/// The user only ever sees the generic message; the cause goes to the log.
impl From<&CatalogError> for ApiError {
    fn from(err: &CatalogError) -> Self {
        tracing::error!(error = %err, "Catalog unavailable");
        ApiError::new(
            ErrorCode::CatalogUnavailable,
            "Failed to fetch products. Please try again later.",
        )
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::from(&err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!(error = %err, "Response serialization failed");
        ApiError::internal("Failed to encode response")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Startup failures that stop the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::state::ConfigError),

    #[error("Catalog setup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", 42);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }

    #[test]
    fn test_catalog_error_is_generic_for_users() {
        let err = ApiError::from(CatalogError::HttpStatus { status: 500 });
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
        assert!(!err.message.contains("500"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = ApiError::unknown_command("Unknown command: 'dance'");
        assert_eq!(err.to_string(), "[UnknownCommand] Unknown command: 'dance'");
    }
}
