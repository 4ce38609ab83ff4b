//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::capability::LoadPolicy;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::map::{CategoryColorMap, EventMapModel, MapAssets, MapError, MapViewport};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Built-in dashboard data
    pub catalog: Catalog,
    /// Category colours after config overrides
    pub palette: Arc<CategoryColorMap>,
    /// Event map assets, camera and loading policy
    pub map: Arc<MapSettings>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

/// Event map settings handed to the client
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    pub assets: MapAssets,
    pub viewport: MapViewport,
    pub policy: LoadPolicy,
}

impl AppState {
    /// State over the sample catalog with default colours and map settings
    pub fn new(config: ApiConfig) -> Self {
        Self::with_palette(config, CategoryColorMap::default(), MapSettings::default())
    }

    pub fn with_palette(config: ApiConfig, palette: CategoryColorMap, map: MapSettings) -> Self {
        Self {
            catalog: Catalog::sample(),
            palette: Arc::new(palette),
            map: Arc::new(map),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Build state from a loaded config file
    pub fn from_config(config: &Config) -> Result<Self, crate::config::ConfigError> {
        let palette = config.palette()?;
        let map = MapSettings {
            assets: config.map.assets(),
            viewport: config.map.viewport(),
            policy: config.map.load_policy(),
        };
        Ok(Self::with_palette(ApiConfig::from(config), palette, map))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// The event map model for the catalog's pins
    pub fn map_model(&self) -> Result<EventMapModel, MapError> {
        EventMapModel::build(
            self.catalog.pins,
            &self.palette,
            self.map.assets.tiles.clone(),
            self.map.viewport,
        )
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Built UI to serve for non-API paths
    pub static_dir: Option<PathBuf>,
    /// Allowed CORS origins; empty means permissive
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8085,
            static_dir: None,
            cors_origins: Vec::new(),
        }
    }
}

impl From<&Config> for ApiConfig {
    fn from(config: &Config) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            static_dir: Some(PathBuf::from(&config.server.static_dir)),
            cors_origins: config.server.cors_origins.clone(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
