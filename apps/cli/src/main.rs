//! Shubago CLI - front desk for the pharmacy ledger.
//!
//! # Usage
//!
//! ```bash
//! # Create the ledger (seeds one sample product)
//! shubago init
//!
//! # Catalog
//! shubago product add --sku AMOX250 --name "Amoxicillin 250mg" --price 40 --cost 22 --stock 30
//! shubago product list para
//!
//! # Sell 3 units, restock 20 (lines are PRODUCT_ID:QTY)
//! shubago sale --customer "Asha" 6f1c...:3
//! shubago purchase --supplier "MedSupply" 6f1c...:20
//!
//! # Views
//! shubago dashboard
//! shubago ledger
//! shubago report sales
//!
//! # Backups
//! shubago export backup.json
//! shubago import backup.json
//! ```
//!
//! # Environment Variables
//!
//! - `SHUBAGO_DB_PATH`, `SHUBAGO_STORE_KEY`, `SHUBAGO_TAX_RATE`, `SHUBAGO_LINE_POLICY`
//! - `RUST_LOG` - log filter (default `info,shubago=debug,sqlx=warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shubago_core::LineRequest;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "shubago")]
#[command(author, version, about = "Shubago pharmacy ledger")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the ledger if it doesn't exist yet
    Init {
        /// Throw away existing data and start over
        #[arg(long)]
        reset: bool,
    },
    /// Manage the product catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Record a sale
    Sale {
        #[arg(short, long)]
        customer: Option<String>,

        /// Lines as PRODUCT_ID:QTY
        #[arg(required = true, value_parser = commands::trade::parse_line)]
        lines: Vec<LineRequest>,
    },
    /// Record a restock
    Purchase {
        #[arg(short, long)]
        supplier: Option<String>,

        /// Lines as PRODUCT_ID:QTY
        #[arg(required = true, value_parser = commands::trade::parse_line)]
        lines: Vec<LineRequest>,
    },
    /// Lifetime sales, stock value, low stock and recent invoices
    Dashboard,
    /// All invoices, then all purchases
    Ledger,
    /// Search invoices by reference or customer
    Invoices {
        #[arg(default_value = "")]
        query: String,
    },
    /// Plain-text reports
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },
    /// Show or change business settings
    Settings {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        currency: Option<String>,
    },
    /// Write a full backup
    Export { file: PathBuf },
    /// Replace all data with a backup
    Import { file: PathBuf },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product, or replace one with --id
    Add {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        sku: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        cost: Option<String>,
        #[arg(long)]
        stock: Option<String>,
        /// Low-stock threshold
        #[arg(long)]
        low: Option<String>,
    },
    /// List products matching a name or SKU fragment
    List {
        #[arg(default_value = "")]
        query: String,
    },
    /// Delete a product by id
    Delete { id: String },
}

#[derive(Subcommand)]
enum ReportKind {
    /// One line per invoice
    Sales,
    /// One line per product
    Stock,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = commands::open_ledger(cli.config).await?;

    match cli.command {
        Commands::Init { reset } => commands::data::init(&mut ledger, reset).await?,
        Commands::Product { action } => match action {
            ProductAction::Add {
                id,
                sku,
                name,
                price,
                cost,
                stock,
                low,
            } => {
                let input = shubago_core::ProductInput {
                    id,
                    sku,
                    name,
                    price,
                    cost,
                    stock,
                    low,
                };
                commands::product::add(&mut ledger, input).await?;
            }
            ProductAction::List { query } => commands::product::list(&ledger, &query),
            ProductAction::Delete { id } => commands::product::delete(&mut ledger, &id).await?,
        },
        Commands::Sale { customer, lines } => {
            commands::trade::sale(&mut ledger, customer, &lines).await?;
        }
        Commands::Purchase { supplier, lines } => {
            commands::trade::purchase(&mut ledger, supplier, &lines).await?;
        }
        Commands::Dashboard => commands::report::dashboard(&ledger),
        Commands::Ledger => commands::report::ledger(&ledger),
        Commands::Invoices { query } => commands::report::invoices(&ledger, &query),
        Commands::Report { kind } => match kind {
            ReportKind::Sales => commands::report::sales(&ledger),
            ReportKind::Stock => commands::report::stock(&ledger),
        },
        Commands::Settings { name, currency } => {
            commands::data::settings(&mut ledger, name, currency).await?;
        }
        Commands::Export { file } => commands::data::export(&ledger, &file)?,
        Commands::Import { file } => commands::data::import(&mut ledger, &file).await?,
    }

    Ok(())
}

/// Logs to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shubago=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
