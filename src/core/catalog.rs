//! Catalog loading - the list operation with remote-first reconciliation.
//!
//! A connected load fetches the full catalog, mirrors every record into
//! the cache (first write per id wins), and returns the remote payload
//! verbatim. A disconnected or failed load serves whatever the cache
//! holds, annotated with the reason. An empty cache is the one outcome
//! that surfaces as an error.

use super::{Advisory, CatalogService, Loaded, cached_or_empty};
use crate::{
    connectivity::ConnectivityProbe,
    errors::{Error, Result},
    models::Product,
    remote::RemoteSource,
    store,
};
use tracing::{info, instrument, warn};

impl<R: RemoteSource, C: ConnectivityProbe> CatalogService<R, C> {
    /// Loads the product catalog, preferring fresh remote data and falling
    /// back to the cache.
    ///
    /// Connected loads return the upstream sequence verbatim and mirror it
    /// into the cache along the way; individual write failures are logged
    /// without aborting the batch. Disconnected or failed loads serve the
    /// cached catalog in id order, with an advisory saying why.
    ///
    /// # Errors
    /// Returns [`Error::NoDataAvailable`] when the remote source is
    /// unreachable and the cache is empty. Every other degradation
    /// resolves into a successful [`Loaded`] value.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<Loaded<Vec<Product>>> {
        if let Err(e) = store::ensure_schema(&self.database).await {
            // The remote path can still serve without a usable cache
            warn!("Could not ensure the cache schema: {}", e);
        }

        let connected = self.connectivity.is_connected().await;
        let mut remote_failed = false;

        if connected {
            match self.remote.fetch_catalog().await {
                Ok(products) => {
                    self.mirror_catalog(&products).await;
                    info!("Loaded {} products live from the remote API.", products.len());
                    return Ok(Loaded::live(products));
                }
                Err(e) => {
                    warn!("Remote catalog fetch failed; falling back to cache: {}", e);
                    remote_failed = true;
                }
            }
        }

        let cached = cached_or_empty(store::list_all(&self.database).await);
        if cached.is_empty() {
            return Err(Error::NoDataAvailable {
                message: "No products available offline.".to_string(),
            });
        }

        info!("Serving {} products from the cache.", cached.len());
        let advisory = if remote_failed {
            Advisory::RemoteFailed
        } else {
            Advisory::Offline
        };
        Ok(Loaded::cached(cached, Some(advisory)))
    }

    /// Mirrors a fetched catalog into the cache in input order; the first
    /// write per id wins and later duplicates become no-ops. A failed
    /// write is logged and skipped so one bad row cannot abort the batch.
    async fn mirror_catalog(&self, products: &[Product]) {
        for record in products {
            if let Err(e) = store::upsert_if_absent(&self.database, record).await {
                warn!("Could not cache product {}: {}", record.id, e);
            }
        }
    }
}
