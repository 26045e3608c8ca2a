//! Catalog Explorer CLI - product queries and data generation from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # First listing page with the basic field set
//! ce-cli products
//!
//! # Third page of a name search, brand and category included
//! ce-cli products --variant withRelations --search lamp --page 2
//!
//! # Start the 50k product generation job
//! ce-cli generate fixed
//!
//! # Start a custom generation job (missing counts are prompted for)
//! ce-cli generate custom --brands 20 --categories 15
//! ```
//!
//! # Commands
//!
//! - `products` - Load one page of products and print cards, pagination and metrics
//! - `generate fixed` - Start fixed-volume data generation
//! - `generate custom` - Start custom-volume data generation

#![cfg_attr(not(test), forbid(unsafe_code))]

use catalog_explorer_core::QueryVariant;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ce-cli")]
#[command(author, version, about = "Catalog Explorer CLI tools")]
struct Cli {
    /// Catalog backend base URL (overrides `CATALOG_BASE_URL`)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load one page of products
    Products {
        /// Query variant (`basic`, `withRelations`, `allFields`)
        #[arg(short, long, default_value = "basic")]
        variant: QueryVariant,

        /// Filter products by name
        #[arg(short, long, default_value = "")]
        search: String,

        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Products per page (overrides `EXPLORER_PAGE_SIZE`)
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Start a data generation job on the catalog server
    Generate {
        #[command(subcommand)]
        volume: GenerateVolume,
    },
}

#[derive(Subcommand)]
enum GenerateVolume {
    /// Generate 50,000 products
    Fixed,
    /// Generate a custom number of brands, categories and products
    Custom {
        /// Number of brands
        #[arg(long)]
        brands: Option<String>,

        /// Number of categories
        #[arg(long)]
        categories: Option<String>,

        /// Number of products
        #[arg(long)]
        products: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog_url = cli.catalog_url.as_deref();

    match cli.command {
        Commands::Products {
            variant,
            search,
            page,
            page_size,
        } => {
            let selection = commands::products::Selection {
                variant,
                search,
                page_index: page,
                page_size,
            };
            commands::products::show(catalog_url, selection).await?;
        }
        Commands::Generate { volume } => match volume {
            GenerateVolume::Fixed => commands::generate::fixed(catalog_url).await?,
            GenerateVolume::Custom {
                brands,
                categories,
                products,
            } => {
                let answers = commands::generate::VolumeAnswers {
                    brands,
                    categories,
                    products,
                };
                commands::generate::custom(catalog_url, answers).await?;
            }
        },
    }
    Ok(())
}
