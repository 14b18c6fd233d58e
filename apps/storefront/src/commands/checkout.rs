//! # Checkout Commands
//!
//! The cart page: line items, price details, discount code and the payment
//! modal.
//!
//! ## Price Details Panel
//! ```text
//! ┌────────────────────────────────────┐
//! │  Price Details                     │
//! │  Price (3 items)          $1110.00 │
//! │  Discount (SAVE10)        -$111.00 │
//! │  Delivery Charges             FREE │
//! │  ────────────────────────────────  │
//! │  Total Amount              $999.00 │
//! │  You will save $111.00 on this     │
//! │  order                             │
//! └────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use storefront_core::{CheckoutSummary, DiscountStatus, PaymentRequest};

use crate::commands::cart::CartLineView;
use crate::state::{CartSession, CheckoutSession, StorefrontConfig};

/// Display strings for the price details panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetails {
    pub items_label: String,
    pub subtotal: String,
    /// Empty when no discount applies, so the panel can hide the line.
    pub discount: String,
    pub delivery: String,
    pub total: String,
    pub savings: String,
}

impl PriceDetails {
    fn new(summary: &CheckoutSummary, config: &StorefrontConfig) -> Self {
        PriceDetails {
            items_label: format!("Price ({} items)", summary.total_items),
            subtotal: config.format_currency(summary.subtotal),
            discount: if summary.applied_discount.is_zero() {
                String::new()
            } else {
                format!("-{}", config.format_currency(summary.applied_discount))
            },
            delivery: if summary.delivery_charge.is_zero() {
                "FREE".to_string()
            } else {
                config.format_currency(summary.delivery_charge)
            },
            total: config.format_currency(summary.total),
            savings: config.format_currency(summary.savings),
        }
    }
}

/// Everything the cart page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub items: Vec<CartLineView>,
    pub summary: CheckoutSummary,
    pub price_details: PriceDetails,
    /// Shown under the discount field after an unknown code.
    pub discount_message: Option<String>,
    pub payment: Option<PaymentRequest>,
}

impl CheckoutResponse {
    fn build(cart: &CartSession, checkout: &CheckoutSession, config: &StorefrontConfig) -> Self {
        let items = cart.cart().items();
        let summary = checkout.summarize(items);

        let discount_message = match &summary.discount {
            DiscountStatus::Invalid { code } => Some(format!("Invalid discount code: {}", code)),
            DiscountStatus::None | DiscountStatus::Applied { .. } => None,
        };

        CheckoutResponse {
            items: items.iter().map(|line| CartLineView::new(line, config)).collect(),
            price_details: PriceDetails::new(&summary, config),
            summary,
            discount_message,
            payment: checkout.payment().copied(),
        }
    }
}

/// Opens the cart page. Navigating here closes the cart popover.
pub fn view_checkout(
    cart: &mut CartSession,
    checkout: &CheckoutSession,
    config: &StorefrontConfig,
) -> CheckoutResponse {
    debug!("view_checkout command");
    cart.update_toggle(|toggle| toggle.close());
    CheckoutResponse::build(cart, checkout, config)
}

/// Applies a discount code, replacing any previous one.
///
/// Never an error: a code outside the table, whatever its shape, shows up
/// as `discountMessage` and resets the discount to zero.
pub fn apply_discount(
    cart: &CartSession,
    checkout: &mut CheckoutSession,
    config: &StorefrontConfig,
    code: &str,
) -> CheckoutResponse {
    debug!(code = %code, "apply_discount command");
    checkout.apply_discount(code);
    CheckoutResponse::build(cart, checkout, config)
}

/// The outcome of "Place Order".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub payment: Option<PaymentRequest>,
    pub price_display: Option<String>,
}

/// "Place Order": hands the total to the payment modal when it is positive.
pub fn place_order(
    cart: &CartSession,
    checkout: &mut CheckoutSession,
    config: &StorefrontConfig,
) -> OrderResponse {
    debug!("place_order command");

    let payment = checkout.place_order(cart.cart().items());
    if let Some(request) = payment {
        info!(price = %request.price, "Payment modal opened");
    }

    OrderResponse {
        payment,
        price_display: payment.map(|request| config.format_currency(request.price)),
    }
}

/// The payment modal was dismissed.
pub fn close_payment(checkout: &mut CheckoutSession) -> OrderResponse {
    debug!("close_payment command");
    checkout.close_payment();
    OrderResponse {
        payment: None,
        price_display: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CheckoutPolicy, Money, Product};

    fn cart_with(cents: i64) -> CartSession {
        let mut cart = CartSession::new();
        let product = Product::new(1, "Item", Money::from_cents(cents));
        cart.update_cart(|c| c.add_item(&product));
        cart
    }

    #[test]
    fn test_view_closes_popover() {
        let config = StorefrontConfig::default();
        let mut cart = cart_with(1000);
        cart.update_toggle(|t| t.set_open(true));

        let response = view_checkout(&mut cart, &CheckoutSession::default(), &config);
        assert!(!cart.toggle().is_open());
        assert_eq!(response.price_details.items_label, "Price (1 items)");
        assert_eq!(response.price_details.delivery, "FREE");
        assert_eq!(response.price_details.total, "$10.00");
        assert_eq!(response.price_details.discount, "");
    }

    #[test]
    fn test_apply_discount_codes() {
        let config = StorefrontConfig::default();
        let cart = cart_with(111000);
        let mut checkout = CheckoutSession::default();

        let response = apply_discount(&cart, &mut checkout, &config, " save10 ");
        assert_eq!(response.summary.applied_discount.cents(), 11100);
        assert_eq!(response.price_details.discount, "-$111.00");
        assert_eq!(response.price_details.total, "$999.00");
        assert!(response.discount_message.is_none());

        let response = apply_discount(&cart, &mut checkout, &config, "BOGUS");
        assert!(response.summary.applied_discount.is_zero());
        assert_eq!(response.price_details.discount, "");
        assert_eq!(
            response.discount_message.as_deref(),
            Some("Invalid discount code: BOGUS")
        );
    }

    #[test]
    fn test_malformed_code_replaces_applied_discount() {
        let config = StorefrontConfig::default();
        let cart = cart_with(10000);
        let mut checkout = CheckoutSession::default();

        let response = apply_discount(&cart, &mut checkout, &config, "SAVE10");
        assert_eq!(response.summary.applied_discount.cents(), 1000);

        let response = apply_discount(&cart, &mut checkout, &config, "SAVE-10");
        assert!(response.summary.applied_discount.is_zero());
        assert_eq!(response.price_details.total, "$100.00");
        assert_eq!(
            response.summary.discount,
            DiscountStatus::Invalid {
                code: "SAVE-10".to_string()
            }
        );
        assert!(checkout.discount().is_invalid());
    }

    #[test]
    fn test_flat50_clamped_summary() {
        let config = StorefrontConfig::default();
        let cart = cart_with(4000);
        let mut checkout = CheckoutSession::new(CheckoutPolicy::default());

        let response = apply_discount(&cart, &mut checkout, &config, "FLAT50");
        assert_eq!(response.price_details.discount, "-$50.00");
        assert_eq!(response.price_details.total, "$0.00");
        assert_eq!(response.price_details.savings, "$40.00");

        let order = place_order(&cart, &mut checkout, &config);
        assert!(order.payment.is_none());
    }

    #[test]
    fn test_place_and_close_order() {
        let config = StorefrontConfig::default();
        let cart = cart_with(2599);
        let mut checkout = CheckoutSession::default();

        let order = place_order(&cart, &mut checkout, &config);
        assert_eq!(order.payment.unwrap().price.cents(), 2599);
        assert_eq!(order.price_display.as_deref(), Some("$25.99"));

        let mut cart = cart;
        let page = view_checkout(&mut cart, &checkout, &config);
        assert!(page.payment.is_some());

        assert!(close_payment(&mut checkout).payment.is_none());
        assert!(checkout.payment().is_none());
    }
}
