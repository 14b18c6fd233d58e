//! # Cart Commands
//!
//! Cart mutations and the cart popover.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Cart page│────►│ Payment  │       │
//! │  │  Cart    │     │          │     │ (summary)│     │  modal   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   increase_item / decrease_item                         │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `add_to_cart` can fail: it needs the product from the catalog. The
//! other mutations go by id and ignore ids that are not in the cart.

use serde::Serialize;
use tracing::debug;

use storefront_core::{CartLineItem, CartToggle, Money, ProductId};

use crate::error::ApiError;
use crate::state::{CartSession, CatalogState, StorefrontConfig};

/// One cart line with its display strings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLineItem,
    pub line_total: Money,
    pub price_display: String,
    pub line_total_display: String,
}

impl CartLineView {
    pub fn new(line: &CartLineItem, config: &StorefrontConfig) -> Self {
        let line_total = line.line_total();
        CartLineView {
            line: line.clone(),
            line_total,
            price_display: config.format_currency(line.price),
            line_total_display: config.format_currency(line_total),
        }
    }
}

/// The cart popover contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineView>,
    pub total_amount: u64,
    pub total_price: Money,
    pub total_price_display: String,
    /// Badge on the cart icon (distinct lines).
    pub line_count: usize,
    pub is_open_cart: bool,
}

impl CartResponse {
    pub fn build(session: &CartSession, config: &StorefrontConfig) -> Self {
        let cart = session.cart();
        CartResponse {
            items: cart
                .items()
                .iter()
                .map(|line| CartLineView::new(line, config))
                .collect(),
            total_amount: cart.total_amount(),
            total_price: cart.total_price(),
            total_price_display: config.format_currency(cart.total_price()),
            line_count: cart.line_count(),
            is_open_cart: session.toggle().is_open(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartSession, config: &StorefrontConfig) -> CartResponse {
    debug!("get_cart command");
    CartResponse::build(cart, config)
}

/// Adds one unit of a listed product.
///
/// ## Errors
/// - `CATALOG_LOADING` / `CATALOG_UNAVAILABLE` before a successful fetch
/// - `NOT_FOUND` if the catalog does not list `id`
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &mut CartSession,
    config: &StorefrontConfig,
    id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = id, "add_to_cart command");

    let product = catalog.find(id)?;
    cart.update_cart(|c| c.add_item(product));
    Ok(CartResponse::build(cart, config))
}

/// "+" on a cart line.
pub fn increase_item(cart: &mut CartSession, config: &StorefrontConfig, id: ProductId) -> CartResponse {
    debug!(product_id = id, "increase_item command");
    cart.update_cart(|c| c.increase_item_amount(id));
    CartResponse::build(cart, config)
}

/// "-" on a cart line; the line goes away at zero.
pub fn decrease_item(cart: &mut CartSession, config: &StorefrontConfig, id: ProductId) -> CartResponse {
    debug!(product_id = id, "decrease_item command");
    cart.update_cart(|c| c.decrease_item_amount(id));
    CartResponse::build(cart, config)
}

/// Trash icon on a cart line.
pub fn remove_item(cart: &mut CartSession, config: &StorefrontConfig, id: ProductId) -> CartResponse {
    debug!(product_id = id, "remove_item command");
    cart.update_cart(|c| c.remove_item(id));
    CartResponse::build(cart, config)
}

/// Empties the cart.
pub fn clear_cart(cart: &mut CartSession, config: &StorefrontConfig) -> CartResponse {
    debug!("clear_cart command");
    cart.update_cart(|c| c.clear_cart());
    CartResponse::build(cart, config)
}

// =============================================================================
// Popover
// =============================================================================

/// Cart icon clicked.
pub fn toggle_cart(cart: &mut CartSession, config: &StorefrontConfig) -> CartResponse {
    debug!("toggle_cart command");
    cart.update_toggle(CartToggle::toggle);
    CartResponse::build(cart, config)
}

pub fn close_cart(cart: &mut CartSession, config: &StorefrontConfig) -> CartResponse {
    debug!("close_cart command");
    cart.update_toggle(CartToggle::close);
    CartResponse::build(cart, config)
}

pub fn open_cart(cart: &mut CartSession, config: &StorefrontConfig) -> CartResponse {
    debug!("open_cart command");
    cart.update_toggle(|toggle| toggle.set_open(true));
    CartResponse::build(cart, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::Product;

    fn catalog() -> CatalogState {
        let mut catalog = CatalogState::new();
        catalog.finish_loading(Ok(vec![
            Product::new(1, "iPhone 9", Money::from_dollars(549)),
            Product::new(2, "Perfume Oil", Money::from_dollars(13)),
        ]));
        catalog
    }

    #[test]
    fn test_add_twice_then_decrease() {
        let config = StorefrontConfig::default();
        let catalog = catalog();
        let mut cart = CartSession::new();

        add_to_cart(&catalog, &mut cart, &config, 1).unwrap();
        let response = add_to_cart(&catalog, &mut cart, &config, 1).unwrap();
        assert_eq!(response.line_count, 1);
        assert_eq!(response.total_amount, 2);
        assert_eq!(response.total_price_display, "$1098.00");
        assert_eq!(response.items[0].line_total, Money::from_dollars(1098));

        decrease_item(&mut cart, &config, 1);
        let response = decrease_item(&mut cart, &config, 1);
        assert!(response.items.is_empty());
        assert_eq!(response.total_amount, 0);
    }

    #[test]
    fn test_add_unknown_product() {
        let config = StorefrontConfig::default();
        let mut cart = CartSession::new();

        let err = add_to_cart(&catalog(), &mut cart, &config, 42).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&CatalogState::new(), &mut cart, &config, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogLoading);
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let config = StorefrontConfig::default();
        let mut cart = CartSession::new();
        add_to_cart(&catalog(), &mut cart, &config, 2).unwrap();

        increase_item(&mut cart, &config, 99);
        decrease_item(&mut cart, &config, 99);
        let response = remove_item(&mut cart, &config, 99);
        assert_eq!(response.total_amount, 1);
    }

    #[test]
    fn test_popover() {
        let config = StorefrontConfig::default();
        let mut cart = CartSession::new();

        assert!(toggle_cart(&mut cart, &config).is_open_cart);
        assert!(!toggle_cart(&mut cart, &config).is_open_cart);
        assert!(open_cart(&mut cart, &config).is_open_cart);
        assert!(!close_cart(&mut cart, &config).is_open_cart);
    }

    #[test]
    fn test_clear_keeps_popover_state() {
        let config = StorefrontConfig::default();
        let mut cart = CartSession::new();
        add_to_cart(&catalog(), &mut cart, &config, 1).unwrap();
        open_cart(&mut cart, &config);

        let response = clear_cart(&mut cart, &config);
        assert!(response.items.is_empty());
        assert!(response.is_open_cart);
        assert_eq!(get_cart(&cart, &config).line_count, 0);
    }
}
