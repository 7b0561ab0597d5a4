//! Hulara CLI - WooCommerce store management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Connect to the store and save credentials
//! hulara login --store-url https://shop.example.com \
//!     --consumer-key ck_... --consumer-secret cs_...
//!
//! # Browse the catalog
//! hulara products list --page 1 --per-page 20
//!
//! # Edit, trash, or permanently delete a product
//! hulara products update 42 --regular-price 1999
//! hulara products trash 42
//! hulara products delete 42 --yes
//!
//! # Add a variation (promotes a simple parent automatically)
//! hulara variations add 42 --sku K-42-M --regular-price 2500 \
//!     --stock 5 --attribute Size=M
//!
//! # Bulk-create products from a JSON file
//! hulara bulk products.json
//!
//! # Store analytics and CSV reports
//! hulara analytics --days 30
//! hulara report products --out products.csv
//! hulara report orders --days 7
//!
//! # Moderate reviews
//! hulara reviews list --product 42
//! hulara reviews approve 31
//!
//! # Chat with the AI assistant
//! hulara chat
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand, ValueEnum};
use hulara_client::config::AiProviderTag;
use hulara_core::{ProductId, ReviewId};

mod commands;

#[derive(Parser)]
#[command(name = "hulara")]
#[command(author, version, about = "Hulara store management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the store and save credentials
    Login {
        /// Store endpoint, e.g. <https://shop.example.com>
        #[arg(long)]
        store_url: String,

        /// WooCommerce consumer key
        #[arg(long)]
        consumer_key: String,

        /// WooCommerce consumer secret
        #[arg(long)]
        consumer_secret: String,

        /// AI provider for the chat assistant
        #[arg(long, value_enum, default_value = "openai")]
        ai_provider: ProviderArg,

        /// AI API key; omit to disable the chat assistant
        #[arg(long)]
        ai_api_key: Option<String>,
    },
    /// Delete saved credentials
    Logout,
    /// Browse and edit the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage product variations
    Variations {
        #[command(subcommand)]
        action: VariationAction,
    },
    /// Bulk-create products from a JSON file
    Bulk {
        /// JSON file holding an array of product rows
        file: std::path::PathBuf,
    },
    /// Store analytics (catalog, sales, listing quality, reviews)
    Analytics {
        /// Only consider orders from the last N days
        #[arg(long)]
        days: Option<i64>,
    },
    /// Moderate product reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// CSV reports
    Report {
        #[command(subcommand)]
        target: ReportTarget,
    },
    /// Chat with the AI assistant
    Chat {
        /// Send one message and exit instead of starting the interactive loop
        message: Option<String>,

        /// Include this product's details as conversation context
        #[arg(long)]
        product: Option<i64>,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List one page of products
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Products per page
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
    /// Update fields of a product
    Update {
        /// Product ID
        id: i64,

        /// New product name
        #[arg(long)]
        name: Option<String>,

        /// New regular price
        #[arg(long)]
        regular_price: Option<String>,

        /// New sale price
        #[arg(long)]
        sale_price: Option<String>,

        /// New long description
        #[arg(long)]
        description: Option<String>,

        /// New catalog visibility (`visible`, `catalog`, `search`, `hidden`)
        #[arg(long)]
        visibility: Option<String>,

        /// New stock quantity
        #[arg(long)]
        stock: Option<i64>,
    },
    /// Move a product to the trash (recoverable)
    Trash {
        /// Product ID
        id: i64,
    },
    /// Permanently delete a product
    Delete {
        /// Product ID
        id: i64,

        /// Confirm the irreversible deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum VariationAction {
    /// Add a variation under a product
    Add {
        /// Parent product ID
        product_id: i64,

        /// Variation SKU
        #[arg(long)]
        sku: String,

        /// Regular price
        #[arg(long)]
        regular_price: String,

        /// Sale price
        #[arg(long, default_value = "")]
        sale_price: String,

        /// Stock quantity
        #[arg(long)]
        stock: i64,

        /// Attribute selection as `Name=Option`, repeatable
        #[arg(long = "attribute")]
        attributes: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List reviews, optionally for one product
    List {
        /// Only reviews of this product
        #[arg(long)]
        product: Option<i64>,
    },
    /// Approve a review
    Approve {
        /// Review ID
        id: i64,
    },
    /// Mark a review as spam
    Spam {
        /// Review ID
        id: i64,
    },
    /// Permanently delete a review
    Delete {
        /// Review ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum ReportTarget {
    /// One row per product, plus one row per variation
    Products {
        /// Write CSV here instead of stdout
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// One row per order
    Orders {
        /// Only orders from the last N days
        #[arg(long)]
        days: Option<i64>,

        /// Write CSV here instead of stdout
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    /// OpenAI chat completions
    Openai,
    /// Google Gemini
    Gemini,
}

impl From<ProviderArg> for AiProviderTag {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Self::Openai,
            ProviderArg::Gemini => Self::Gemini,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Login {
            store_url,
            consumer_key,
            consumer_secret,
            ai_provider,
            ai_api_key,
        } => {
            commands::login::login(
                &store_url,
                &consumer_key,
                &consumer_secret,
                ai_provider.into(),
                ai_api_key.as_deref(),
            )
            .await?;
        }
        Commands::Logout => commands::login::logout()?,
        Commands::Products { action } => match action {
            ProductAction::List { page, per_page } => {
                commands::products::list(page, per_page).await?;
            }
            ProductAction::Update {
                id,
                name,
                regular_price,
                sale_price,
                description,
                visibility,
                stock,
            } => {
                commands::products::update(
                    ProductId::new(id),
                    commands::products::UpdateArgs {
                        name,
                        regular_price,
                        sale_price,
                        description,
                        visibility,
                        stock,
                    },
                )
                .await?;
            }
            ProductAction::Trash { id } => {
                commands::products::trash(ProductId::new(id)).await?;
            }
            ProductAction::Delete { id, yes } => {
                commands::products::delete(ProductId::new(id), yes).await?;
            }
        },
        Commands::Variations { action } => match action {
            VariationAction::Add {
                product_id,
                sku,
                regular_price,
                sale_price,
                stock,
                attributes,
            } => {
                commands::variations::add(
                    ProductId::new(product_id),
                    &sku,
                    &regular_price,
                    &sale_price,
                    stock,
                    &attributes,
                )
                .await?;
            }
        },
        Commands::Bulk { file } => commands::bulk::upload(&file).await?,
        Commands::Analytics { days } => commands::analytics::show(days).await?,
        Commands::Reviews { action } => match action {
            ReviewAction::List { product } => {
                commands::reviews::list(product.map(ProductId::new)).await?;
            }
            ReviewAction::Approve { id } => {
                commands::reviews::approve(ReviewId::new(id)).await?;
            }
            ReviewAction::Spam { id } => {
                commands::reviews::spam(ReviewId::new(id)).await?;
            }
            ReviewAction::Delete { id } => {
                commands::reviews::delete(ReviewId::new(id)).await?;
            }
        },
        Commands::Report { target } => match target {
            ReportTarget::Products { out } => {
                commands::report::products(out.as_deref()).await?;
            }
            ReportTarget::Orders { days, out } => {
                commands::report::orders(days, out.as_deref()).await?;
            }
        },
        Commands::Chat { message, product } => {
            commands::chat::run(message.as_deref(), product.map(ProductId::new)).await?;
        }
    }
    Ok(())
}
