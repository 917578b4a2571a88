//! Application configuration.
//!
//! Read from the JSON file named by `PENDELKOLL_CONFIG`. Every field has a
//! default, so an absent variable or an empty object gives the built-in
//! Lessebo ⇄ Karlskrona setup.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::domain::{DomainError, StationCode};
use crate::planner::CatalogConfig;
use crate::stations::StationDirectory;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PENDELKOLL_CONFIG";

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] DomainError),

    #[error("refresh interval must be at least one second")]
    RefreshInterval,
}

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind: SocketAddr,

    /// File holding the latest feed payload
    pub snapshot_path: PathBuf,

    /// How often the catalog is rebuilt (seconds)
    pub refresh_secs: u64,

    /// Extra or replacement station names
    pub station_names: BTreeMap<StationCode, String>,

    /// Routes and thresholds
    pub catalog: CatalogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            snapshot_path: PathBuf::from("data/announcements.json"),
            refresh_secs: 30,
            station_names: BTreeMap::new(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by [`CONFIG_ENV`], or defaults if unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                info!("{CONFIG_ENV} not set, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let body = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&body).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check routes and intervals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_secs == 0 {
            return Err(ConfigError::RefreshInterval);
        }
        self.catalog.validate()?;
        Ok(())
    }

    /// Refresh interval as a Duration.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// The built-in station directory with configured overrides applied.
    pub fn directory(&self) -> StationDirectory {
        let mut directory = StationDirectory::smaland();
        directory.extend(self.station_names.clone());
        directory
    }
}
