//! # Checkout Aggregator
//!
//! Derives the price-details panel of the cart page from the cart lines and
//! the discount code the user applied.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Summary                                     │
//! │                                                                         │
//! │  cart lines ──► total_items = Σ amount                                  │
//! │            └──► subtotal    = Σ price × amount                          │
//! │                                                                         │
//! │  DiscountState ──► SAVE10 ─► 10% of subtotal                            │
//! │                ──► FLAT50 ─► $50.00 flat                                │
//! │                ──► other  ─► $0.00 + "invalid code" signal              │
//! │                                                                         │
//! │  total = subtotal - applied_discount                                    │
//! │          (floored at $0.00 unless the policy allows negatives)          │
//! │                                                                         │
//! │  total > 0 ──► PaymentRequest { is_open, price } for the payment modal  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount amount is re-derived from the current subtotal every time
//! the summary is computed, so SAVE10 follows the cart as it changes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLineItem;
use crate::money::Money;

// =============================================================================
// Discount Codes
// =============================================================================

/// The fixed table of accepted discount codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountCode {
    /// 10% off the subtotal.
    Save10,
    /// $50.00 off, regardless of the subtotal.
    Flat50,
}

impl DiscountCode {
    const SAVE10_BPS: u32 = 1000;
    const FLAT50: Money = Money::from_dollars(50);

    /// Finds the code in the table, ignoring surrounding whitespace and
    /// ASCII case.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::DiscountCode;
    ///
    /// assert_eq!(DiscountCode::lookup(" save10"), Some(DiscountCode::Save10));
    /// assert_eq!(DiscountCode::lookup("SAVE20"), None);
    /// ```
    pub fn lookup(code: &str) -> Option<Self> {
        let code = code.trim();
        [DiscountCode::Save10, DiscountCode::Flat50]
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(code))
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountCode::Save10 => "SAVE10",
            DiscountCode::Flat50 => "FLAT50",
        }
    }

    /// The discount this code grants on `subtotal`.
    ///
    /// FLAT50 is not capped by the subtotal; whether the total may go
    /// negative is the [`CheckoutPolicy`]'s call.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        match self {
            DiscountCode::Save10 => subtotal.percentage_of(Self::SAVE10_BPS),
            DiscountCode::Flat50 => Self::FLAT50,
        }
    }
}

// =============================================================================
// Discount State
// =============================================================================

/// Outcome of the last "apply" on the discount field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiscountStatus {
    /// Nothing applied (or the field was cleared).
    #[default]
    None,
    /// A known code is in effect.
    Applied { code: DiscountCode },
    /// The user applied a code that is not in the table. Informational:
    /// checkout proceeds with no discount.
    Invalid { code: String },
}

/// The discount field of the cart page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountState {
    code: String,
    status: DiscountStatus,
}

impl DiscountState {
    pub fn new() -> Self {
        DiscountState::default()
    }

    /// Applies `code`, replacing whatever was applied before.
    ///
    /// ## Behavior
    /// - Known code: `Applied`
    /// - Empty / whitespace: back to `None` (no invalid signal)
    /// - Anything else: `Invalid`, discount 0
    pub fn apply(self, code: &str) -> Self {
        let trimmed = code.trim();
        let status = if trimmed.is_empty() {
            DiscountStatus::None
        } else {
            match DiscountCode::lookup(trimmed) {
                Some(known) => DiscountStatus::Applied { code: known },
                None => DiscountStatus::Invalid {
                    code: trimmed.to_string(),
                },
            }
        };
        DiscountState {
            code: trimmed.to_string(),
            status,
        }
    }

    /// The code as the user entered it (trimmed).
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn status(&self) -> &DiscountStatus {
        &self.status
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.status, DiscountStatus::Invalid { .. })
    }

    /// The discount granted on `subtotal`; zero unless a known code applies.
    pub fn applied_discount(&self, subtotal: Money) -> Money {
        match &self.status {
            DiscountStatus::Applied { code } => code.discount_for(subtotal),
            DiscountStatus::None | DiscountStatus::Invalid { .. } => Money::zero(),
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// How the checkout treats a discount larger than the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPolicy {
    /// When false (the default) the total is floored at $0.00. The applied
    /// discount is reported unchanged either way.
    pub allow_negative_total: bool,
}

// =============================================================================
// Summary
// =============================================================================

/// The price-details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub total_items: u64,
    pub subtotal: Money,
    pub applied_discount: Money,
    /// Delivery is always free; kept as a line so the panel can show it.
    pub delivery_charge: Money,
    pub total: Money,
    /// What the shopper actually saves: `subtotal - total`. Smaller than
    /// `applied_discount` when the total was floored at zero.
    pub savings: Money,
    pub discount: DiscountStatus,
}

impl CheckoutSummary {
    /// Computes the summary from scratch.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{CartState, CheckoutPolicy, CheckoutSummary, DiscountState, Money, Product};
    ///
    /// let cart = CartState::new().add_item(&Product::new(1, "Lamp", Money::from_dollars(40)));
    /// let discount = DiscountState::new().apply("FLAT50");
    ///
    /// let clamped = CheckoutSummary::compute(cart.items(), &discount, CheckoutPolicy::default());
    /// assert_eq!(clamped.applied_discount, Money::from_dollars(50));
    /// assert_eq!(clamped.total, Money::zero());
    ///
    /// let raw = CheckoutSummary::compute(
    ///     cart.items(),
    ///     &discount,
    ///     CheckoutPolicy { allow_negative_total: true },
    /// );
    /// assert_eq!(raw.total, Money::from_dollars(-10));
    /// ```
    pub fn compute(items: &[CartLineItem], discount: &DiscountState, policy: CheckoutPolicy) -> Self {
        let total_items = items.iter().map(|line| u64::from(line.amount)).sum();
        let subtotal: Money = items.iter().map(CartLineItem::line_total).sum();
        let applied_discount = discount.applied_discount(subtotal);

        let delivery_charge = Money::zero();
        let raw_total = subtotal - applied_discount + delivery_charge;
        let total = if policy.allow_negative_total {
            raw_total
        } else {
            raw_total.floor_at_zero()
        };

        CheckoutSummary {
            total_items,
            subtotal,
            applied_discount,
            delivery_charge,
            total,
            savings: subtotal - total,
            discount: discount.status().clone(),
        }
    }

    /// What "Place Order" hands to the payment modal, if anything.
    ///
    /// The modal only opens for a positive amount.
    pub fn payment_request(&self) -> Option<PaymentRequest> {
        self.total.is_positive().then_some(PaymentRequest {
            is_open: true,
            price: self.total,
        })
    }
}

/// Input to the external payment modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub is_open: bool,
    pub price: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
