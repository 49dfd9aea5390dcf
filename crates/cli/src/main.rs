//! Repricer CLI - operator tools for the price-editing flow.
//!
//! # Usage
//!
//! ```bash
//! # List the full catalog (every page is traversed)
//! repricer list
//!
//! # Record a price for every variant of a product and commit it.
//! # Digits are minor currency units: 5000 means 50.00.
//! repricer set-price gid://shopify/Product/123 5000
//! ```
//!
//! The relay endpoint defaults to `http://localhost:5000/api/graphql` and
//! can be overridden with `--relay-url` or `REPRICER_RELAY_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)] // CLI output goes to stdout by design

use clap::{Parser, Subcommand, ValueEnum};
use url::Url;

use repricer_client::{CatalogClient, EditSession};
use repricer_core::CurrencyFormat;

#[derive(Parser)]
#[command(name = "repricer")]
#[command(version, about = "Repricer CLI tools")]
struct Cli {
    /// Relay endpoint to send queries and mutations through
    #[arg(
        long,
        global = true,
        env = "REPRICER_RELAY_URL",
        default_value = "http://localhost:5000/api/graphql"
    )]
    relay_url: Url,

    /// Display locale for prices
    #[arg(long, global = true, value_enum, default_value_t = Locale::Brl)]
    locale: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Locale {
    Brl,
    Usd,
}

impl Locale {
    const fn format(self) -> CurrencyFormat {
        match self {
            Self::Brl => CurrencyFormat::BRL,
            Self::Usd => CurrencyFormat::USD,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the full catalog
    List,
    /// Record a price for every variant of a product and commit it
    SetPrice {
        /// Product id (e.g., `gid://shopify/Product/123`)
        product_id: String,

        /// Price in minor currency units, cash-register style (5000 = 50.00)
        amount: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = cli.locale.format();
    let client = CatalogClient::new(cli.relay_url, format);

    match cli.command {
        Commands::List => {
            let products = client.fetch_catalog().await?;
            for product in &products {
                println!("{}  {}", product.id, product.title);
                for variant in &product.variants {
                    println!(
                        "    {}  {}  {} {}",
                        variant.id, variant.title, format.symbol, variant.display_price
                    );
                }
            }
            println!("{} products", products.len());
        }
        Commands::SetPrice { product_id, amount } => {
            let session = EditSession::new(client);
            session.refresh().await?;
            session.record_edit(&product_id, &amount)?;
            let pending = session
                .pending_edit(&product_id)
                .unwrap_or_else(|| "?".to_string());
            session.commit(&product_id).await?;
            println!("updated {product_id} to {} {pending}", format.symbol);
        }
    }

    Ok(())
}
