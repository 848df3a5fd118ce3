#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use pocket_catalog::{
    config,
    connectivity,
    core::{CatalogService, Loaded},
    errors::{Error, Result},
    models::Product,
    remote::CatalogApi,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env, then the configuration with environment overrides
    dotenv().ok();
    let app_config = config::load_app_configuration()?;
    info!("Using catalog API at {}.", app_config.api_base_url);

    // 3. Open the cache database
    let database = config::database::create_connection(&app_config)
        .await
        .inspect(|_| info!("Cache database connected."))
        .inspect_err(|e| error!("Failed to open the cache database: {}", e))?;

    // 4. Wire the service. The CLI has no platform network monitor, so it
    //    assumes connected and lets a dead network demote results to cached.
    let (_network, probe) = connectivity::channel(true);
    let remote = CatalogApi::new(&app_config.api_base_url);
    let service = CatalogService::new(database, remote, probe);

    // 5. Dispatch: no argument lists the catalog, an id shows one product
    match env::args().nth(1) {
        Some(raw_id) => {
            let id: i64 = raw_id.parse().map_err(|_| Error::Config {
                message: format!("Product id must be an integer, got '{raw_id}'"),
            })?;
            let loaded = service
                .load_item(id)
                .await
                .inspect_err(|e| error!("Could not load product {}: {}", id, e))?;
            print_product(&loaded);
        }
        None => {
            let loaded = service
                .load_catalog()
                .await
                .inspect_err(|e| error!("Could not load the catalog: {}", e))?;
            print_catalog(&loaded);
        }
    }

    Ok(())
}

fn print_catalog(loaded: &Loaded<Vec<Product>>) {
    if let Some(advisory) = loaded.advisory {
        println!("{}", advisory.message());
    }
    for product in &loaded.data {
        println!("{:>4}  {:<48}  ${:>8.2}", product.id, product.title, product.price);
    }
    println!("{} products ({})", loaded.data.len(), loaded.provenance.tag());
}

fn print_product(loaded: &Loaded<Product>) {
    if let Some(advisory) = loaded.advisory {
        println!("{}", advisory.message());
    }
    let product = &loaded.data;
    println!("#{} {} ({})", product.id, product.title, loaded.provenance.tag());
    println!("Price:    ${:.2}", product.price);
    println!("Category: {}", product.category);
    println!(
        "Rating:   {} ({} ratings)",
        product.rating.rate, product.rating.count
    );
    println!("{}", product.description);
}
