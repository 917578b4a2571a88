//! Caching layer for built catalogs.
//!
//! Building a catalog re-reads the feed and runs the whole pipeline, so the
//! last result is kept for one refresh interval. Concurrent requests that
//! find the cache empty share a single build.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::feed::FeedError;
use crate::planner::Catalog;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the cached catalog.
    pub ttl: Duration,
}

impl CacheConfig {
    /// Cache for one refresh interval.
    pub fn for_refresh(interval: Duration) -> Self {
        Self { ttl: interval }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::for_refresh(Duration::from_secs(30))
    }
}

/// Holds the most recently built [`Catalog`].
#[derive(Clone)]
pub struct CatalogCache {
    /// Single-entry cache; there is only ever one current catalog.
    catalog: MokaCache<(), Arc<Catalog>>,
}

impl CatalogCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let catalog = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { catalog }
    }

    /// Get the cached catalog, building it with `build` if absent or expired.
    ///
    /// A failed build is not cached.
    pub async fn get_or_build<F>(&self, build: F) -> Result<Arc<Catalog>, Arc<FeedError>>
    where
        F: Future<Output = Result<Catalog, FeedError>>,
    {
        self.catalog
            .try_get_with((), async { build.await.map(Arc::new) })
            .await
    }

    /// The cached catalog, if still fresh.
    pub async fn current(&self) -> Option<Arc<Catalog>> {
        self.catalog.get(&()).await
    }

    /// Replace the cached catalog.
    pub async fn insert(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        self.catalog.insert((), Arc::clone(&catalog)).await;
        catalog
    }

    /// Drop the cached catalog so the next read rebuilds.
    pub fn invalidate(&self) {
        self.catalog.invalidate_all();
    }
}
