//! Product detail loading - the single-item operation with cache fallback.
//!
//! A connected load fetches the product by id and mirrors it into the
//! cache, so detail views populate the cache the same way catalog loads
//! do. On disconnection, a transport failure, or an upstream 404 the
//! cached copy is served instead; only a miss in both places is an error.

use super::{Advisory, CatalogService, Loaded, cached_or_absent};
use crate::{
    connectivity::ConnectivityProbe,
    errors::{Error, Result},
    models::Product,
    remote::RemoteSource,
    store,
};
use tracing::{info, instrument, warn};

impl<R: RemoteSource, C: ConnectivityProbe> CatalogService<R, C> {
    /// Loads one product by id, preferring the remote source and falling
    /// back to the cache.
    ///
    /// A successful remote fetch is mirrored into the cache (first write
    /// per id wins; a failed write is logged and does not fail the load).
    /// The cached fallback carries the offline advisory only when the
    /// device was actually offline; after a remote failure while
    /// connected, the cached copy is served without one.
    ///
    /// # Errors
    /// Returns [`Error::NoDataAvailable`] when the remote source cannot
    /// produce the product and no cached copy exists.
    #[instrument(skip(self))]
    pub async fn load_item(&self, id: i64) -> Result<Loaded<Product>> {
        let connected = self.connectivity.is_connected().await;

        if connected {
            match self.remote.fetch_one(id).await {
                Ok(product) => {
                    if let Err(e) = store::upsert_if_absent(&self.database, &product).await {
                        warn!("Could not cache product {}: {}", id, e);
                    }
                    info!("Loaded product {} live from the remote API.", id);
                    return Ok(Loaded::live(product));
                }
                Err(e) => {
                    warn!(
                        "Remote fetch for product {} failed; trying the cache: {}",
                        id, e
                    );
                }
            }
        }

        match cached_or_absent(store::get_by_id(&self.database, id).await) {
            Some(product) => {
                info!("Serving product {} from the cache.", id);
                let advisory = if connected {
                    None
                } else {
                    Some(Advisory::Offline)
                };
                Ok(Loaded::cached(product, advisory))
            }
            None => Err(Error::NoDataAvailable {
                message: "Product not found in database.".to_string(),
            }),
        }
    }
}
