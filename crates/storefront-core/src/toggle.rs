//! # Cart Popover Flag
//!
//! Whether the cart popover under the header icon is showing. Independent
//! of the cart contents.

use serde::Serialize;
use ts_rs::TS;

/// Open/closed state of the cart popover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartToggle {
    is_open_cart: bool,
}

impl CartToggle {
    /// Creates a closed popover flag.
    pub fn new() -> Self {
        CartToggle::default()
    }

    /// Flips the flag (cart icon clicked).
    pub fn toggle(self) -> Self {
        CartToggle {
            is_open_cart: !self.is_open_cart,
        }
    }

    /// Forces the popover closed (navigating to the cart page).
    pub fn close(self) -> Self {
        CartToggle {
            is_open_cart: false,
        }
    }

    /// Forces the popover to `open`.
    pub fn set_open(self, open: bool) -> Self {
        CartToggle { is_open_cart: open }
    }

    pub fn is_open(&self) -> bool {
        self.is_open_cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        assert!(!CartToggle::new().is_open());
    }

    #[test]
    fn test_toggle_flips() {
        let flag = CartToggle::new().toggle();
        assert!(flag.is_open());
        assert!(!flag.toggle().is_open());
    }

    #[test]
    fn test_close_and_set_open() {
        assert!(!CartToggle::new().set_open(true).close().is_open());
        assert!(CartToggle::new().set_open(true).is_open());
        assert!(!CartToggle::new().toggle().set_open(false).is_open());
    }

    #[test]
    fn test_serializes_for_ui() {
        let json = serde_json::to_value(CartToggle::new().toggle()).unwrap();
        assert_eq!(json["isOpenCart"], true);
    }
}
