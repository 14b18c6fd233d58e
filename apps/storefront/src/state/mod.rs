//! # State Module
//!
//! Session state owned by the shell's event loop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Storefront (one per session)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │                  │                  │              │        │
//! │          ▼                  ▼                  ▼              ▼        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌───────────┐  │
//! │  │ CatalogState │  │ CartSession  │  │ Checkout     │  │ Storefront│  │
//! │  │              │  │              │  │ Session      │  │ Config    │  │
//! │  │ status       │  │ CartState    │  │ DiscountState│  │           │  │
//! │  │ filters      │  │ CartToggle   │  │ payment      │  │ read-only │  │
//! │  │ query        │  │              │  │ policy       │  │           │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └───────────┘  │
//! │                                                                         │
//! │  Events are handled one at a time by the loop that owns these values,  │
//! │  so none of them needs a lock.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod checkout;
mod config;

pub use cart::CartSession;
pub use catalog::{CatalogState, CatalogStatus};
pub use checkout::CheckoutSession;
pub use config::{
    CatalogSettings, CheckoutSettings, ConfigError, ConfigResult, SourceKind, StorefrontConfig,
};

/// Everything one storefront session holds.
#[derive(Debug)]
pub struct Storefront {
    pub config: StorefrontConfig,
    pub catalog: CatalogState,
    pub cart: CartSession,
    pub checkout: CheckoutSession,
}

impl Storefront {
    pub fn new(config: StorefrontConfig) -> Self {
        let checkout = CheckoutSession::new(config.checkout_policy());
        Storefront {
            config,
            catalog: CatalogState::new(),
            cart: CartSession::new(),
            checkout,
        }
    }
}
