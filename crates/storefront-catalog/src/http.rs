//! # HTTP Catalog
//!
//! Fetches the product list from a remote JSON endpoint.
//!
//! ## Request
//! ```text
//! GET {base_url}/products
//!
//! 200 OK
//! { "products": [ { "id": 1, "title": "iPhone 9", "price": 549, ... } ],
//!   "total": 100, "skip": 0, "limit": 30 }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument};
use url::Url;

use storefront_core::Product;

use crate::error::{CatalogError, CatalogResult};
use crate::source::ProductSource;
use crate::wire::decode_products;

/// Product source backed by the catalog HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    products_url: Url,
    timeout_secs: u64,
}

impl HttpCatalog {
    /// Creates a catalog client for `base_url`.
    ///
    /// A trailing slash on `base_url` is optional.
    ///
    /// ## Errors
    /// - `InvalidUrl` if `base_url` is not an absolute http(s) URL
    /// - `RequestFailed` if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout_secs: u64) -> CatalogResult<Self> {
        let products_url = products_url(base_url)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        Ok(HttpCatalog {
            client,
            products_url,
            timeout_secs,
        })
    }

    /// The full URL that will be requested.
    pub fn products_url(&self) -> &Url {
        &self.products_url
    }

    fn map_request_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.timeout_secs)
        } else if let Some(status) = err.status() {
            CatalogError::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            CatalogError::RequestFailed(err.to_string())
        }
    }
}

/// Joins `/products` onto the base URL.
fn products_url(base_url: &str) -> CatalogResult<Url> {
    let mut base = Url::parse(base_url.trim())?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(CatalogError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            base.scheme()
        )));
    }

    // Url::join drops the last path segment unless it ends in '/'
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base.join("products")?)
}

#[async_trait]
impl ProductSource for HttpCatalog {
    #[instrument(skip(self), fields(url = %self.products_url))]
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        debug!("Requesting product list");

        let response = self
            .client
            .get(self.products_url.clone())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?
            .error_for_status()
            .map_err(|e| self.map_request_error(e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let products = decode_products(&body)?;
        info!(count = products.len(), "Product list loaded");
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("http catalog at {}", self.products_url)
    }
}
