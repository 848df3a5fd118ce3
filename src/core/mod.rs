//! Core reconciliation logic - framework-agnostic load operations over the
//! remote source and the local cache.
//!
//! [`CatalogService`] decides, per load, whether to hit the network,
//! mirrors fresh data into the cache, and degrades to cached data when the
//! network or the remote API fails. Results carry their provenance and an
//! optional user-facing advisory; the only hard failure either operation
//! surfaces is [`Error::NoDataAvailable`](crate::errors::Error).

/// Catalog list loading with cache write-through
pub mod catalog;
/// Single product loading with cache fallback
pub mod detail;

use crate::{
    connectivity::ConnectivityProbe, errors::Result, models::Product, remote::RemoteSource,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::warn;

/// Where the data in a load result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Fresh from the remote source
    Live,
    /// Served from the local cache
    Cached,
}

impl Provenance {
    /// Short tag for display and logging ("live" / "cached").
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Cached => "cached",
        }
    }
}

/// Non-fatal, user-facing note attached to a degraded result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// The device was offline, so the cache was served directly
    Offline,
    /// The device looked connected but the remote call failed
    RemoteFailed,
}

impl Advisory {
    /// User-visible text for this advisory.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Offline => "Offline Mode - Showing cached data",
            Self::RemoteFailed => "Using cached data due to connection error.",
        }
    }
}

/// A successful load, annotated with provenance and an optional advisory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loaded<T> {
    /// The loaded payload (full catalog or a single product)
    pub data: T,
    /// Whether the payload came from the remote source or the cache
    pub provenance: Provenance,
    /// Degradation note to show the user, if any
    pub advisory: Option<Advisory>,
}

impl<T> Loaded<T> {
    /// Wraps freshly fetched remote data.
    pub(crate) const fn live(data: T) -> Self {
        Self {
            data,
            provenance: Provenance::Live,
            advisory: None,
        }
    }

    /// Wraps cache-served data, optionally carrying an advisory.
    pub(crate) const fn cached(data: T, advisory: Option<Advisory>) -> Self {
        Self {
            data,
            provenance: Provenance::Cached,
            advisory,
        }
    }
}

/// Orchestrates loads against the remote source, falling back to the local
/// cache when the network or the upstream API is unavailable.
pub struct CatalogService<R, C> {
    /// Connection to the local cache database
    database: DatabaseConnection,
    /// Upstream catalog access
    remote: R,
    /// Injected connectivity fact
    connectivity: C,
}

impl<R: RemoteSource, C: ConnectivityProbe> CatalogService<R, C> {
    /// Creates a service over a cache connection, a remote source, and a
    /// connectivity probe.
    #[must_use]
    pub const fn new(database: DatabaseConnection, remote: R, connectivity: C) -> Self {
        Self {
            database,
            remote,
            connectivity,
        }
    }
}

/// Folds a failed cache read into "nothing cached," so the fallback path
/// itself never fails on storage flakiness. The downgrade is logged.
fn cached_or_empty(read: Result<Vec<Product>>) -> Vec<Product> {
    match read {
        Ok(products) => products,
        Err(e) => {
            warn!("Cache read failed; treating it as empty: {}", e);
            Vec::new()
        }
    }
}

/// Folds a failed cache lookup into "not cached," logging the downgrade.
fn cached_or_absent(read: Result<Option<Product>>) -> Option<Product> {
    match read {
        Ok(cached) => cached,
        Err(e) => {
            warn!("Cache lookup failed; treating it as absent: {}", e);
            None
        }
    }
}
