//! Remote source adapter - HTTP access to the upstream product catalog.
//!
//! [`RemoteSource`] is the seam the reconciliation layer depends on;
//! [`CatalogApi`] is the production implementation over `reqwest`. The
//! adapter only talks to the network: it never reads or writes the cache.

use crate::{
    errors::{Error, Result},
    models::Product,
};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

/// Read access to the upstream catalog endpoints.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches the full catalog in upstream order.
    ///
    /// # Errors
    /// Returns [`Error::Remote`] on transport failure or a non-success
    /// status.
    async fn fetch_catalog(&self) -> Result<Vec<Product>>;

    /// Fetches a single product by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when upstream reports the id does not
    /// exist, [`Error::Remote`] on transport failure or any other
    /// non-success status.
    async fn fetch_one(&self, id: i64) -> Result<Product>;
}

/// HTTP implementation of [`RemoteSource`]
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: Client,
    base_url: String,
}

impl CatalogApi {
    /// Creates an adapter for the given base URL with a fresh HTTP client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates an adapter reusing an existing `reqwest` client.
    ///
    /// Trailing slashes on the base URL are trimmed so endpoint paths can
    /// be appended uniformly.
    #[must_use]
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn catalog_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: i64) -> String {
        format!("{}/products/{id}", self.base_url)
    }
}

#[async_trait]
impl RemoteSource for CatalogApi {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> Result<Vec<Product>> {
        let response = self
            .http
            .get(self.catalog_url())
            .send()
            .await?
            .error_for_status()?;
        let products: Vec<Product> = response.json().await?;
        debug!("Fetched {} products from the catalog API.", products.len());
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn fetch_one(&self, id: i64) -> Result<Product> {
        let response = self.http.get(self.product_url(id)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id });
        }

        let response = response.error_for_status()?;
        let product: Product = response.json().await?;
        debug!("Fetched product {} from the catalog API.", product.id);
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_base_and_path() {
        let api = CatalogApi::new("https://fakestoreapi.com");
        assert_eq!(api.catalog_url(), "https://fakestoreapi.com/products");
        assert_eq!(api.product_url(7), "https://fakestoreapi.com/products/7");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = CatalogApi::new("https://fakestoreapi.com/");
        assert_eq!(api.catalog_url(), "https://fakestoreapi.com/products");
        assert_eq!(api.product_url(2), "https://fakestoreapi.com/products/2");
    }
}
