//! Shared test utilities for the catalog browser core.
//!
//! Provides in-memory database setups, sample-product builders, and
//! remote-source doubles so tests can exercise every reconciliation path
//! without touching the network.

use crate::{
    errors::{Error, Result},
    models::{Product, Rating},
    remote::RemoteSource,
    store,
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the cache schema in place.
/// This is the standard setup for store and reconciliation tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    store::ensure_schema(&db).await?;
    Ok(db)
}

/// Creates an in-memory `SQLite` database without the cache schema.
/// Use this to exercise the paths that hit an unusable store.
pub async fn setup_unmigrated_db() -> Result<DatabaseConnection> {
    sea_orm::Database::connect("sqlite::memory:")
        .await
        .map_err(Into::into)
}

/// Builds a sample product with defaults derived from the id.
///
/// # Defaults
/// * `price`: 9.99
/// * `category`: "misc"
/// * `rating`: 4.0 across 12 ratings
#[must_use]
pub fn sample_product(id: i64) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        price: 9.99,
        category: "misc".to_string(),
        description: format!("Description for product {id}"),
        image: format!("https://example.com/img/{id}.png"),
        rating: Rating {
            rate: 4.0,
            count: 12,
        },
    }
}

/// Builds a sample product with a specific rating.
#[must_use]
pub fn rated_product(id: i64, rate: f64, count: i64) -> Product {
    let mut product = sample_product(id);
    product.rating = Rating { rate, count };
    product
}

/// Remote double serving a fixed catalog. Single-item fetches look the id
/// up in that catalog and report it missing otherwise.
pub struct FixedRemote {
    /// Catalog payload returned by every fetch
    pub products: Vec<Product>,
}

#[async_trait]
impl RemoteSource for FixedRemote {
    async fn fetch_catalog(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn fetch_one(&self, id: i64) -> Result<Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(Error::NotFound { id })
    }
}

/// Remote double whose calls always fail with a transport-style error.
pub struct UnreachableRemote;

#[async_trait]
impl RemoteSource for UnreachableRemote {
    async fn fetch_catalog(&self) -> Result<Vec<Product>> {
        Err(Error::Remote {
            message: "connection refused".to_string(),
        })
    }

    async fn fetch_one(&self, _id: i64) -> Result<Product> {
        Err(Error::Remote {
            message: "connection refused".to_string(),
        })
    }
}
