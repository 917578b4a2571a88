//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::alerts::AlertLedger;
use crate::cache::{CacheConfig, CatalogCache};
use crate::domain::AnnouncementTime;
use crate::feed::{FeedError, SnapshotFeed};
use crate::planner::{Catalog, CatalogConfig, JourneyCatalog};
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Source of announcements
    pub feed: Arc<SnapshotFeed>,

    /// Last built catalog
    pub cache: CatalogCache,

    /// Routes and thresholds
    pub config: Arc<CatalogConfig>,

    /// Station names
    pub directory: Arc<StationDirectory>,

    /// Journeys already alerted on
    pub ledger: Arc<Mutex<AlertLedger>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        feed: SnapshotFeed,
        cache_config: &CacheConfig,
        config: CatalogConfig,
        directory: StationDirectory,
    ) -> Self {
        Self {
            feed: Arc::new(feed),
            cache: CatalogCache::new(cache_config),
            config: Arc::new(config),
            directory: Arc::new(directory),
            ledger: Arc::new(Mutex::new(AlertLedger::new())),
        }
    }

    /// The current catalog, rebuilding it if the cached one has expired.
    pub async fn catalog(&self) -> Result<Arc<Catalog>, Arc<FeedError>> {
        self.cache.get_or_build(self.rebuild()).await
    }

    /// Rebuild and cache the catalog unconditionally.
    pub async fn refresh(&self) -> Result<Arc<Catalog>, FeedError> {
        let catalog = self.rebuild().await?;
        Ok(self.cache.insert(catalog).await)
    }

    async fn rebuild(&self) -> Result<Catalog, FeedError> {
        let records = self.feed.load().await?;
        let catalog = JourneyCatalog::new(&self.config, &self.directory)
            .build(&records, AnnouncementTime::now());
        debug!(journeys = catalog.history.len(), "catalog rebuilt");
        Ok(catalog)
    }
}
