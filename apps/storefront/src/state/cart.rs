//! # Cart Session
//!
//! The cart and the popover flag, owned by the shell.
//!
//! Both values are replaced wholesale by the pure transitions in
//! `storefront-core`; this wrapper only swaps the new value in.

use tracing::debug;

use storefront_core::{CartState, CartToggle};

#[derive(Debug, Clone, Default)]
pub struct CartSession {
    cart: CartState,
    toggle: CartToggle,
}

impl CartSession {
    pub fn new() -> Self {
        CartSession::default()
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn toggle(&self) -> CartToggle {
        self.toggle
    }

    /// Runs a cart transition and stores the result.
    pub fn update_cart(&mut self, transition: impl FnOnce(CartState) -> CartState) {
        self.cart = transition(std::mem::take(&mut self.cart));
        debug!(
            lines = self.cart.line_count(),
            total_amount = self.cart.total_amount(),
            total_price = %self.cart.total_price(),
            "Cart updated"
        );
    }

    /// Runs a popover flag transition and stores the result.
    pub fn update_toggle(&mut self, transition: impl FnOnce(CartToggle) -> CartToggle) {
        self.toggle = transition(self.toggle);
        debug!(is_open = self.toggle.is_open(), "Cart popover updated");
    }
}
