//! # Shell
//!
//! Turns text lines into commands and commands into JSON replies.
//!
//! ## Line Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One line in, one line out                            │
//! │                                                                         │
//! │  stdin                          stdout                                  │
//! │  ─────                          ──────                                  │
//! │  products                  ──►  {"ok":true,"data":{"status":...}}       │
//! │  filter price Under $100   ──►  {"ok":true,"data":{"products":[...]}}   │
//! │  add 7                     ──►  {"ok":true,"data":{"items":[...]}}      │
//! │  add 999                   ──►  {"ok":false,"error":{"code":"NOT_FOUND" │
//! │  quit                      ──►  (session ends)                          │
//! │                                                                         │
//! │  Blank lines are ignored. Logs go to stderr.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//! | Line | Effect |
//! |------|--------|
//! | `products` | product grid |
//! | `filter <category> <option>` | toggle a sidebar checkbox |
//! | `filters clear` | uncheck everything |
//! | `search [text]` | set (or clear) the search box; text after the first space is kept verbatim |
//! | `add / inc / dec / remove <id>` | cart mutations |
//! | `clear` | empty the cart |
//! | `toggle` / `open` / `close` | cart popover |
//! | `cart` | cart popover contents |
//! | `checkout` | cart page (closes the popover) |
//! | `discount [code]` | apply (or clear) a discount code |
//! | `order` / `close-payment` | payment modal |
//! | `quit` | end the session |

use std::str::FromStr;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use storefront_catalog::ProductSource;
use storefront_core::ProductId;

use crate::commands;
use crate::error::ApiError;
use crate::state::{Storefront, StorefrontConfig};

// =============================================================================
// Commands
// =============================================================================

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Filter { category: String, option: String },
    ClearFilters,
    Search(String),
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    ClearCart,
    ToggleCart,
    OpenCart,
    CloseCart,
    Cart,
    Checkout,
    Discount(String),
    PlaceOrder,
    ClosePayment,
    Quit,
}

fn parse_id(verb: &str, arg: &str) -> Result<ProductId, ApiError> {
    arg.trim()
        .parse()
        .map_err(|_| ApiError::unknown_command(format!("Usage: {} <product id>", verb)))
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (verb, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = raw.trim();

        let command = match verb.to_lowercase().as_str() {
            "products" => Command::Products,
            "filter" => {
                let (category, option) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    ApiError::unknown_command("Usage: filter <category> <option>")
                })?;
                Command::Filter {
                    category: category.to_string(),
                    option: option.trim().to_string(),
                }
            }
            "filters" if rest.eq_ignore_ascii_case("clear") => Command::ClearFilters,
            // The query is matched as typed, surrounding spaces included
            "search" => Command::Search(raw.to_string()),
            "add" => Command::Add(parse_id(verb, rest)?),
            "inc" => Command::Increase(parse_id(verb, rest)?),
            "dec" => Command::Decrease(parse_id(verb, rest)?),
            "remove" => Command::Remove(parse_id(verb, rest)?),
            "clear" => Command::ClearCart,
            "toggle" => Command::ToggleCart,
            "open" => Command::OpenCart,
            "close" => Command::CloseCart,
            "cart" => Command::Cart,
            "checkout" => Command::Checkout,
            "discount" => Command::Discount(rest.to_string()),
            "order" => Command::PlaceOrder,
            "close-payment" => Command::ClosePayment,
            "quit" | "exit" => Command::Quit,
            _ => {
                return Err(ApiError::unknown_command(format!(
                    "Unknown command: '{}'",
                    line.trim_end()
                )))
            }
        };

        Ok(command)
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// The JSON envelope written for every handled line.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<serde_json::Value, ApiError>> for Reply {
    fn from(result: Result<serde_json::Value, ApiError>) -> Self {
        match result {
            Ok(data) => Reply {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Reply {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Runs one command against the session state.
///
/// `Quit` is handled by the session loop and answers `null` here.
pub fn dispatch(app: &mut Storefront, command: Command) -> Result<serde_json::Value, ApiError> {
    let Storefront {
        config,
        catalog,
        cart,
        checkout,
    } = app;

    let value = match command {
        Command::Products => serde_json::to_value(commands::product::list_products(catalog, config))?,
        Command::Filter { category, option } => {
            serde_json::to_value(commands::product::toggle_filter(catalog, config, &category, &option))?
        }
        Command::ClearFilters => serde_json::to_value(commands::product::clear_filters(catalog, config))?,
        Command::Search(query) => {
            serde_json::to_value(commands::product::search_products(catalog, config, &query))?
        }
        Command::Add(id) => serde_json::to_value(commands::cart::add_to_cart(catalog, cart, config, id)?)?,
        Command::Increase(id) => serde_json::to_value(commands::cart::increase_item(cart, config, id))?,
        Command::Decrease(id) => serde_json::to_value(commands::cart::decrease_item(cart, config, id))?,
        Command::Remove(id) => serde_json::to_value(commands::cart::remove_item(cart, config, id))?,
        Command::ClearCart => serde_json::to_value(commands::cart::clear_cart(cart, config))?,
        Command::ToggleCart => serde_json::to_value(commands::cart::toggle_cart(cart, config))?,
        Command::OpenCart => serde_json::to_value(commands::cart::open_cart(cart, config))?,
        Command::CloseCart => serde_json::to_value(commands::cart::close_cart(cart, config))?,
        Command::Cart => serde_json::to_value(commands::cart::get_cart(cart, config))?,
        Command::Checkout => serde_json::to_value(commands::checkout::view_checkout(cart, checkout, config))?,
        Command::Discount(code) => {
            serde_json::to_value(commands::checkout::apply_discount(cart, checkout, config, &code))?
        }
        Command::PlaceOrder => serde_json::to_value(commands::checkout::place_order(cart, checkout, config))?,
        Command::ClosePayment => serde_json::to_value(commands::checkout::close_payment(checkout))?,
        Command::Quit => serde_json::Value::Null,
    };

    Ok(value)
}

// =============================================================================
// Session Loop
// =============================================================================

/// Runs a storefront session until `quit` or end of input.
///
/// ## Event Loop
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  select! (biased)                                                       │
/// │    ├── product fetch completes (once) ──► catalog Loaded / Failed      │
/// │    └── next input line ─────────────────► parse ─► dispatch ─► reply   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Commands keep flowing while the fetch is pending; the product grid
/// reports `loading` until it settles.
pub async fn run_session<R, W>(
    config: StorefrontConfig,
    source: &dyn ProductSource,
    input: R,
    mut output: W,
) -> std::io::Result<Storefront>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut app = Storefront::new(config);
    let mut lines = input.lines();

    info!(source = %source.describe(), "Fetching product list");
    let mut fetch = source.fetch_products();
    let mut fetch_pending = true;

    loop {
        tokio::select! {
            biased;

            outcome = &mut fetch, if fetch_pending => {
                fetch_pending = false;
                app.catalog.finish_loading(outcome);
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let reply = match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => Reply::from(dispatch(&mut app, command)),
                    Err(err) => {
                        warn!(line = %line, "Unparseable command");
                        Reply::from(Err(err))
                    }
                };

                write_reply(&mut output, &reply).await?;
            }
        }
    }

    info!("Session ended");
    Ok(app)
}

async fn write_reply<W: AsyncWrite + Unpin>(output: &mut W, reply: &Reply) -> std::io::Result<()> {
    let mut line = serde_json::to_vec(reply)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use serde_json::Value;
    use storefront_catalog::{CatalogError, CatalogResult, StaticCatalog};
    use storefront_core::Product;
    use tokio::io::BufReader;

    struct FailingCatalog;

    #[async_trait]
    impl ProductSource for FailingCatalog {
        async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
            Err(CatalogError::HttpStatus { status: 502 })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    async fn run_lines(source: &dyn ProductSource, input: &str) -> (Vec<Value>, Storefront) {
        let mut output = Vec::new();
        let app = run_session(
            StorefrontConfig::default(),
            source,
            BufReader::new(input.as_bytes()),
            &mut output,
        )
        .await
        .unwrap();

        let replies = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (replies, app)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("products".parse::<Command>().unwrap(), Command::Products);
        assert_eq!("  ADD 7 ".parse::<Command>().unwrap(), Command::Add(7));
        assert_eq!(
            "filter price Under $100".parse::<Command>().unwrap(),
            Command::Filter {
                category: "price".to_string(),
                option: "Under $100".to_string()
            }
        );
        assert_eq!("filters clear".parse::<Command>().unwrap(), Command::ClearFilters);
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(String::new()));
        assert_eq!(
            "search macbook pro".parse::<Command>().unwrap(),
            Command::Search("macbook pro".to_string())
        );
        assert_eq!(
            "search phone 9 ".parse::<Command>().unwrap(),
            Command::Search("phone 9 ".to_string())
        );
        assert_eq!(
            "search    ".parse::<Command>().unwrap(),
            Command::Search("   ".to_string())
        );
        assert_eq!(
            "discount FLAT50".parse::<Command>().unwrap(),
            Command::Discount("FLAT50".to_string())
        );
        assert_eq!("close-payment".parse::<Command>().unwrap(), Command::ClosePayment);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["add", "add seven", "filter price", "filters", "dance"] {
            let err = bad.parse::<Command>().unwrap_err();
            assert_eq!(err.code, ErrorCode::UnknownCommand, "{}", bad);
        }
    }

    #[tokio::test]
    async fn test_shopping_session() {
        let input = "\
products
filter category laptops
add 6
add 6
inc 6
dec 6
toggle
checkout
discount SAVE10
order
close-payment
quit
cart
";
        let (replies, app) = run_lines(&StaticCatalog::sample(), input).await;

        // Nothing after quit is answered
        assert_eq!(replies.len(), 11);
        assert!(replies.iter().all(|r| r["ok"] == true));

        assert_eq!(replies[0]["data"]["status"], "loaded");
        assert_eq!(replies[1]["data"]["products"].as_array().unwrap().len(), 5);
        assert_eq!(replies[3]["data"]["totalAmount"], 2);
        assert_eq!(replies[6]["data"]["isOpenCart"], true);

        let page = &replies[7]["data"];
        assert_eq!(page["summary"]["subtotal"], 349800);
        assert_eq!(page["priceDetails"]["delivery"], "FREE");

        assert_eq!(replies[8]["data"]["summary"]["appliedDiscount"], 34980);
        assert_eq!(replies[9]["data"]["payment"]["price"], 314820);
        assert!(replies[10]["data"]["payment"].is_null());

        assert_eq!(app.cart.cart().total_amount(), 2);
        assert!(!app.cart.toggle().is_open());
    }

    #[tokio::test]
    async fn test_errors_are_replies() {
        let input = "add 999\nwhat\n\nsearch ok\n";
        let (replies, _) = run_lines(&StaticCatalog::sample(), input).await;

        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["ok"], false);
        assert_eq!(replies[0]["error"]["code"], "NOT_FOUND");
        assert_eq!(replies[1]["error"]["code"], "UNKNOWN_COMMAND");
        assert_eq!(replies[2]["ok"], true);
    }

    #[tokio::test]
    async fn test_discount_and_search_taken_as_typed() {
        let input = "add 6\ndiscount SAVE10\ndiscount SAVE-10\nsearch    \nsearch macbook\n";
        let (replies, app) = run_lines(&StaticCatalog::sample(), input).await;

        assert!(replies.iter().all(|r| r["ok"] == true));
        assert_eq!(replies[1]["data"]["summary"]["appliedDiscount"], 17490);

        let page = &replies[2]["data"];
        assert_eq!(page["summary"]["appliedDiscount"], 0);
        assert_eq!(page["summary"]["discount"]["kind"], "invalid");
        assert_eq!(page["discountMessage"], "Invalid discount code: SAVE-10");
        assert_eq!(page["priceDetails"]["discount"], "");

        assert_eq!(replies[3]["data"]["query"], "   ");
        assert!(replies[3]["data"]["products"].as_array().unwrap().is_empty());
        assert_eq!(replies[4]["data"]["products"].as_array().unwrap().len(), 1);
        assert_eq!(app.catalog.query(), "macbook");
    }

    #[tokio::test]
    async fn test_failed_catalog_session() {
        let (replies, app) = run_lines(&FailingCatalog, "products\nadd 1\ncart\n").await;

        assert_eq!(replies[0]["data"]["status"], "failed");
        assert_eq!(replies[0]["data"]["error"]["code"], "CATALOG_UNAVAILABLE");
        assert_eq!(replies[1]["error"]["code"], "CATALOG_UNAVAILABLE");
        assert_eq!(replies[2]["data"]["totalAmount"], 0);
        assert!(app.cart.cart().is_empty());
    }
}
