//! # Cart Store
//!
//! The shopping cart as an explicit state value with pure transitions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  UI Event                  Transition                  Change           │
//! │  ────────                  ──────────                  ──────           │
//! │                                                                         │
//! │  "Add to Cart" ──────────► add_item(product) ────────► push / amount+1  │
//! │                                                                         │
//! │  "+" on cart page ───────► increase_item_amount(id) ─► amount+1         │
//! │                                                                         │
//! │  "-" on cart page ───────► decrease_item_amount(id) ─► amount-1 / drop  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item(id) ──────────► drop line        │
//! │                                                                         │
//! │  Order placed / reset ───► clear_cart() ─────────────► empty            │
//! │                                                                         │
//! │  Every transition ends in recalculate(): totals are never stale.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per product id
//! - Every line item has `amount >= 1`
//! - `total_amount == Σ amount` and `total_price == Σ price × amount`
//! - Unknown ids are no-ops, never errors

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line Item
// =============================================================================

/// One product's aggregated entry in the cart.
///
/// ## Price Freezing
/// `price` is captured when the product is first added. Later catalog price
/// changes do not reach items already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product id this line holds.
    pub id: ProductId,

    /// Product title at time of adding (frozen).
    pub title: String,

    /// Unit price at time of adding (frozen).
    pub price: Money,

    /// Product thumbnail at time of adding.
    pub image: String,

    /// Quantity in cart, always >= 1.
    pub amount: u32,
}

impl CartLineItem {
    /// Creates a line item for one unit of `product`.
    pub fn from_product(product: &Product) -> Self {
        CartLineItem {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.thumbnail.clone(),
            amount: 1,
        }
    }

    /// Unit price × amount.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.amount)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The shopping cart.
///
/// Transitions consume the current state and return the next one, so the
/// owner writes `cart = cart.add_item(&product)`. The totals have no
/// setters; they are rebuilt from the line items at the end of every
/// transition.
///
/// Only `Serialize` is derived. A cart is never read back from outside, so
/// there is no way to construct one with totals that disagree with its items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_amount: u64,
    total_price: Money,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Already in cart: amount increases by 1, price snapshot unchanged
    /// - Not in cart: appended with amount 1 and the product's current price
    pub fn add_item(mut self, product: &Product) -> Self {
        match self.line_mut(product.id) {
            Some(line) => line.amount += 1,
            None => self.items.push(CartLineItem::from_product(product)),
        }
        self.recalculate()
    }

    /// Removes the line for `id`. No-op if absent.
    pub fn remove_item(mut self, id: ProductId) -> Self {
        self.items.retain(|line| line.id != id);
        self.recalculate()
    }

    /// Increases the amount of the line for `id` by 1. No-op if absent.
    pub fn increase_item_amount(mut self, id: ProductId) -> Self {
        if let Some(line) = self.line_mut(id) {
            line.amount += 1;
        }
        self.recalculate()
    }

    /// Decreases the amount of the line for `id` by 1.
    ///
    /// ## Behavior
    /// - Amount reaches 0: the line is removed entirely
    /// - Not in cart: no-op
    pub fn decrease_item_amount(mut self, id: ProductId) -> Self {
        if let Some(pos) = self.items.iter().position(|line| line.id == id) {
            if self.items[pos].amount <= 1 {
                self.items.remove(pos);
            } else {
                self.items[pos].amount -= 1;
            }
        }
        self.recalculate()
    }

    /// Empties the cart.
    pub fn clear_cart(mut self) -> Self {
        self.items.clear();
        self.recalculate()
    }

    /// Rebuilds the derived totals from the line items.
    fn recalculate(mut self) -> Self {
        self.total_amount = self.items.iter().map(|line| u64::from(line.amount)).sum();
        self.total_price = self.items.iter().map(CartLineItem::line_total).sum();
        self
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|line| line.id == id)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Line items in the order they were first added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line for `id`.
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Σ amount over all lines.
    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    /// Σ price × amount over all lines.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Number of distinct lines (the badge on the cart icon).
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
            .with_thumbnail(format!("https://cdn.example.com/{}.png", id))
    }

    fn assert_totals_consistent(cart: &CartState) {
        let amount: u64 = cart.items().iter().map(|l| u64::from(l.amount)).sum();
        let price: Money = cart
            .items()
            .iter()
            .map(|l| l.price.multiply_quantity(l.amount))
            .sum();
        assert_eq!(cart.total_amount(), amount);
        assert_eq!(cart.total_price(), price);
        assert!(cart.items().iter().all(|l| l.amount >= 1));
    }

    #[test]
    fn test_add_same_product_twice() {
        let a = product(1, 1000);
        let cart = CartState::new().add_item(&a).add_item(&a);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].id, 1);
        assert_eq!(cart.items()[0].amount, 2);
        assert_eq!(cart.total_amount(), 2);
        assert_eq!(cart.total_price().cents(), 2000);
    }

    #[test]
    fn test_add_snapshots_line_fields() {
        let a = product(5, 1299);
        let cart = CartState::new().add_item(&a);
        let line = cart.get(5).unwrap();

        assert_eq!(line.title, "Product 5");
        assert_eq!(line.image, "https://cdn.example.com/5.png");
        assert_eq!(line.price.cents(), 1299);
        assert_eq!(line.amount, 1);
    }

    #[test]
    fn test_price_is_frozen_at_first_add() {
        let original = product(1, 1000);
        let cart = CartState::new().add_item(&original);

        let mut repriced = original.clone();
        repriced.price = Money::from_cents(5000);
        let cart = cart.add_item(&repriced);

        assert_eq!(cart.items()[0].price.cents(), 1000);
        assert_eq!(cart.total_price().cents(), 2000);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let cart = CartState::new()
            .add_item(&product(3, 100))
            .add_item(&product(1, 100))
            .add_item(&product(2, 100))
            .add_item(&product(3, 100));

        let ids: Vec<_> = cart.items().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let cart = CartState::new().add_item(&product(1, 1000));
        let cart = cart.decrease_item_amount(1);

        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_add_then_decrease_round_trip() {
        let before = CartState::new().add_item(&product(1, 500));
        let after = before.clone().add_item(&product(2, 700)).decrease_item_amount(2);
        assert_eq!(after, before);
    }

    #[test]
    fn test_increase_and_decrease() {
        let cart = CartState::new()
            .add_item(&product(1, 250))
            .increase_item_amount(1)
            .increase_item_amount(1);
        assert_eq!(cart.get(1).unwrap().amount, 3);
        assert_eq!(cart.total_price().cents(), 750);

        let cart = cart.decrease_item_amount(1);
        assert_eq!(cart.get(1).unwrap().amount, 2);
        assert_eq!(cart.total_price().cents(), 500);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let cart = CartState::new().add_item(&product(1, 1000));

        assert_eq!(cart.clone().remove_item(99), cart);
        assert_eq!(cart.clone().increase_item_amount(99), cart);
        assert_eq!(cart.clone().decrease_item_amount(99), cart);
        assert_eq!(CartState::new().decrease_item_amount(1), CartState::new());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let cart = CartState::new()
            .add_item(&product(1, 1000))
            .add_item(&product(2, 300));

        let once = cart.clone().remove_item(1);
        let twice = once.clone().remove_item(1);
        assert_eq!(once, twice);
        assert_eq!(once.line_count(), 1);
        assert_eq!(once.total_price().cents(), 300);
    }

    #[test]
    fn test_clear_cart() {
        let cart = CartState::new()
            .add_item(&product(1, 1000))
            .add_item(&product(2, 300))
            .clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart, CartState::new());
    }

    #[test]
    fn test_totals_hold_across_a_session() {
        let products: Vec<_> = (1..=5).map(|id| product(id, 199 * id as i64)).collect();
        let mut cart = CartState::new();

        for (step, p) in products.iter().cycle().take(23).enumerate() {
            cart = match step % 4 {
                0 | 1 => cart.add_item(p),
                2 => cart.decrease_item_amount(p.id),
                _ => cart.increase_item_amount(p.id),
            };
            assert_totals_consistent(&cart);
        }

        cart = cart.remove_item(3);
        assert_totals_consistent(&cart);
        assert!(cart.get(3).is_none());
    }

    #[test]
    fn test_serializes_for_ui() {
        let cart = CartState::new().add_item(&product(1, 1000));
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(json["totalAmount"], 1);
        assert_eq!(json["totalPrice"], 1000);
        assert_eq!(json["items"][0]["amount"], 1);
    }
}
