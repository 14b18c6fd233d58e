//! # Checkout Session
//!
//! The discount field and the payment modal.

use tracing::{debug, info};

use storefront_core::{
    CartLineItem, CheckoutPolicy, CheckoutSummary, DiscountState, PaymentRequest,
};

#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    discount: DiscountState,
    payment: Option<PaymentRequest>,
    policy: CheckoutPolicy,
}

impl CheckoutSession {
    pub fn new(policy: CheckoutPolicy) -> Self {
        CheckoutSession {
            policy,
            ..CheckoutSession::default()
        }
    }

    pub fn discount(&self) -> &DiscountState {
        &self.discount
    }

    pub fn payment(&self) -> Option<&PaymentRequest> {
        self.payment.as_ref()
    }

    /// Applies a discount code as typed, replacing the previous one.
    pub fn apply_discount(&mut self, code: &str) {
        self.discount = std::mem::take(&mut self.discount).apply(code);
        if self.discount.is_invalid() {
            info!(code = %self.discount.code(), "Unknown discount code, no discount applied");
        } else {
            debug!(code = %self.discount.code(), status = ?self.discount.status(), "Discount applied");
        }
    }

    /// The price-details panel for `items`.
    pub fn summarize(&self, items: &[CartLineItem]) -> CheckoutSummary {
        CheckoutSummary::compute(items, &self.discount, self.policy)
    }

    /// "Place Order": opens the payment modal if there is anything to pay.
    pub fn place_order(&mut self, items: &[CartLineItem]) -> Option<PaymentRequest> {
        let request = self.summarize(items).payment_request();
        if request.is_none() {
            debug!("Nothing to pay, payment modal stays closed");
        }
        self.payment = request;
        request
    }

    pub fn close_payment(&mut self) {
        self.payment = None;
    }
}
