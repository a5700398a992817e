//! Read-only catalog queries, used to check what an import left in the store.

use clap::{Parser, Subcommand};
use vitrine_core::load_app_config;
use vitrine_store::{CatalogQuery, StoreClient, DEFAULT_PAGE_LIMIT};

#[derive(Debug, Parser)]
#[command(name = "vitrine-catalog")]
#[command(about = "Query a store's public catalog")]
pub struct CatalogCli {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// List active products of a store
    Products {
        /// Store slug
        #[arg(long)]
        slug: String,
        /// Free-text search over name and code
        #[arg(long)]
        query: Option<String>,
        /// Only products of this brand
        #[arg(long)]
        brand: Option<String>,
        /// Only products in this category
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// List the brands present in a store's catalog
    Brands {
        /// Store slug
        #[arg(long)]
        slug: String,
    },
}

/// Runs a catalog query and prints one line per row.
///
/// Either credential pair is accepted since these calls only read public data.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the store call fails.
pub async fn run(cli: CatalogCli) -> anyhow::Result<()> {
    let config = load_app_config(true)?;
    crate::init_tracing(&config.log_level)?;
    let client = StoreClient::from_config(&config)?;

    match cli.command {
        CatalogCommands::Products {
            slug,
            query,
            brand,
            category,
            limit,
            offset,
        } => {
            let query = CatalogQuery {
                query,
                brand,
                category,
                limit,
                offset,
                ..CatalogQuery::new(slug)
            };
            let products = client.fetch_catalog_products(&query).await?;
            for p in &products {
                println!(
                    "{}\t{}\t{}",
                    p.code.as_deref().unwrap_or("-"),
                    p.brand,
                    p.name
                );
            }
            println!("{} product(s)", products.len());
        }
        CatalogCommands::Brands { slug } => {
            let brands = client.fetch_catalog_brands(&slug).await?;
            for b in &brands {
                println!("{}", b.brand);
            }
            println!("{} brand(s)", brands.len());
        }
    }

    Ok(())
}
