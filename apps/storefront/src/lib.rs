//! # Storefront Shell Library
//!
//! Wires configuration, the product source and the session state together
//! and runs the line-oriented event loop.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── main.rs         ◄─── Binary entry point
//! ├── shell.rs        ◄─── Line parsing, dispatch, session loop
//! ├── state/
//! │   ├── mod.rs      ◄─── Storefront session container
//! │   ├── catalog.rs  ◄─── Product list, filters, search
//! │   ├── cart.rs     ◄─── Cart + popover flag
//! │   ├── checkout.rs ◄─── Discount + payment modal
//! │   └── config.rs   ◄─── StorefrontConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Product grid commands
//! │   ├── cart.rs     ◄─── Cart commands
//! │   └── checkout.rs ◄─── Cart page and payment commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::path::PathBuf;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_catalog::{HttpCatalog, ProductSource, StaticCatalog};

use error::StartupError;
use state::{SourceKind, StorefrontConfig};

/// Runs the storefront on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,storefront=debug; override with RUST_LOG            │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env → validate          │
/// │                                                                         │
/// │  3. Build Product Source ─────────────────────────────────────────────► │
/// │     • http: HttpCatalog(base_url, timeout)                              │
/// │     • static: built-in sample catalog                                   │
/// │                                                                         │
/// │  4. Run Session ──────────────────────────────────────────────────────► │
/// │     • product fetch and input lines handled in one loop                 │
/// │     • ends on `quit` or end of input                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> Result<(), StartupError> {
    init_tracing();

    info!("Starting storefront");

    let config = StorefrontConfig::load(config_path)?;
    let source = build_source(&config)?;

    shell::run_session(
        config,
        source.as_ref(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    Ok(())
}

/// Picks the product source the configuration asks for.
pub fn build_source(config: &StorefrontConfig) -> Result<Box<dyn ProductSource>, StartupError> {
    let source: Box<dyn ProductSource> = match config.catalog.source {
        SourceKind::Http => Box::new(HttpCatalog::new(
            &config.catalog.base_url,
            config.catalog.timeout_secs,
        )?),
        SourceKind::Static => Box::new(StaticCatalog::sample()),
    };
    Ok(source)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_catalog=trace` - Trace the catalog crate only
/// - Default: INFO, DEBUG for the storefront crates
///
/// Logs go to stderr; stdout carries only JSON replies.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_source() {
        let mut config = StorefrontConfig::default();
        config.catalog.source = SourceKind::Static;
        let source = build_source(&config).unwrap();
        assert!(source.describe().starts_with("static catalog"));

        config.catalog.source = SourceKind::Http;
        let source = build_source(&config).unwrap();
        assert_eq!(source.describe(), "http catalog at https://dummyjson.com/products");
    }
}
