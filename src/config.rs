//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `PALOUR_*` environment variable overrides.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::capability::LoadPolicy;
use crate::map::{Category, CategoryColorMap, MapAssets, MapError, MapViewport, TileLayer};
use crate::map::tiles::{OSM_ATTRIBUTION, OSM_TILE_URL};
use crate::map::view::{LEAFLET_SCRIPT, LEAFLET_STYLESHEET};

/// Palette value that removes a category's colour
pub const PALETTE_NONE: &str = "none";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub map: MapConfig,

    /// Category display name to colour token overrides
    #[serde(default)]
    pub palette: BTreeMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Host server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built UI served for every non-API path
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8085
}

fn default_static_dir() -> String {
    "palour-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors_origins: vec![
                "http://localhost:8086".to_string(),
                "http://127.0.0.1:8086".to_string(),
            ],
        }
    }
}

/// Event map assets and loading policy
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_attribution")]
    pub attribution: String,

    #[serde(default = "default_stylesheet_href")]
    pub stylesheet_href: String,

    #[serde(default = "default_script_src")]
    pub script_src: String,

    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    #[serde(default = "default_load_timeout")]
    pub load_timeout_ms: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
}

fn default_tile_url() -> String {
    OSM_TILE_URL.to_string()
}

fn default_attribution() -> String {
    OSM_ATTRIBUTION.to_string()
}

fn default_stylesheet_href() -> String {
    LEAFLET_STYLESHEET.to_string()
}

fn default_script_src() -> String {
    LEAFLET_SCRIPT.to_string()
}

fn default_zoom() -> u8 {
    2
}

fn default_load_timeout() -> u64 {
    LoadPolicy::default().timeout_ms
}

fn default_max_attempts() -> u32 {
    LoadPolicy::default().max_attempts
}

fn default_initial_backoff() -> u64 {
    LoadPolicy::default().initial_backoff_ms
}

fn default_max_backoff() -> u64 {
    LoadPolicy::default().max_backoff_ms
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            stylesheet_href: default_stylesheet_href(),
            script_src: default_script_src(),
            default_zoom: default_zoom(),
            load_timeout_ms: default_load_timeout(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
        }
    }
}

impl MapConfig {
    pub fn tile_layer(&self) -> TileLayer {
        TileLayer::new(self.tile_url.clone(), self.attribution.clone())
    }

    pub fn assets(&self) -> MapAssets {
        MapAssets {
            stylesheet_href: self.stylesheet_href.clone(),
            script_src: self.script_src.clone(),
            tiles: self.tile_layer(),
        }
    }

    pub fn viewport(&self) -> MapViewport {
        MapViewport {
            zoom: self.default_zoom,
            ..MapViewport::default()
        }
    }

    pub fn load_policy(&self) -> LoadPolicy {
        LoadPolicy {
            timeout_ms: self.load_timeout_ms,
            max_attempts: self.max_attempts.max(1),
            initial_backoff_ms: self.initial_backoff_ms,
            max_backoff_ms: self.max_backoff_ms,
            ..LoadPolicy::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("palour").join("config.toml")),
            Some(PathBuf::from("/etc/palour/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(host) = var("PALOUR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PALOUR_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(dir) = var("PALOUR_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // Map overrides
        if let Some(url) = var("PALOUR_TILE_URL") {
            self.map.tile_url = url;
        }
        if let Some(timeout) = var("PALOUR_MAP_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.map.load_timeout_ms = ms;
            }
        }

        // Logging overrides
        if let Some(level) = var("PALOUR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PALOUR_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Category colours after applying `[palette]` overrides
    pub fn palette(&self) -> Result<CategoryColorMap, ConfigError> {
        let mut colors = CategoryColorMap::default();

        for (name, token) in &self.palette {
            let category: Category = name.parse().map_err(|e: MapError| ConfigError::Palette {
                entry: name.clone(),
                error: e.to_string(),
            })?;

            if token.eq_ignore_ascii_case(PALETTE_NONE) {
                colors.remove(category);
                continue;
            }

            colors
                .insert(category, token)
                .map_err(|e| ConfigError::Palette {
                    entry: name.clone(),
                    error: e.to_string(),
                })?;
        }

        Ok(colors)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid palette entry '{entry}': {error}")]
    Palette { entry: String, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Events Palour Configuration
#
# Environment variables override these settings:
# - PALOUR_HOST
# - PALOUR_PORT
# - PALOUR_STATIC_DIR
# - PALOUR_TILE_URL
# - PALOUR_MAP_TIMEOUT_MS
# - PALOUR_LOG_LEVEL
# - PALOUR_LOG_FORMAT

[server]
# Host server address
host = "0.0.0.0"

# Host server port
port = 8085

# Built UI directory (trunk build output)
static_dir = "palour-ui/dist"

# Allowed CORS origins
cors_origins = ["http://localhost:8086", "http://127.0.0.1:8086"]

[map]
# Raster tile template ({s} subdomain, {z}/{x}/{y} tile)
tile_url = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"

# Attribution shown on the map
attribution = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"

# Mapping library assets
stylesheet_href = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
script_src = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"

# Initial zoom level
default_zoom = 2

# Per-attempt timeout and retry policy for loading the mapping library
load_timeout_ms = 10000
max_attempts = 3
initial_backoff_ms = 500
max_backoff_ms = 8000

[palette]
# Category colours. Use "none" to remove a category's colour.
"Music" = "red-500"
"Food & Drink" = "orange-500"
"Technology" = "blue-500"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8085);
        assert_eq!(config.map.default_zoom, 2);
        assert_eq!(config.map.load_policy(), LoadPolicy::default());
        assert_eq!(config.map.assets(), MapAssets::default());
        assert_eq!(config.palette().unwrap(), CategoryColorMap::default());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8085);
        assert_eq!(config.map.script_src, LEAFLET_SCRIPT);
        assert_eq!(config.map.attribution, OSM_ATTRIBUTION);
        assert_eq!(config.palette().unwrap(), CategoryColorMap::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\n\n[map]\nmax_attempts = 5\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.map.load_policy().max_attempts, 5);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/palour.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        match Config::load(file.path()).unwrap_err() {
            ConfigError::Parse { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_palette_overrides() {
        let config = Config::parse(
            "[palette]\n\"Music\" = \"bg-purple-500\"\n\"Technology\" = \"none\"",
        )
        .unwrap();
        let colors = config.palette().unwrap();

        assert_eq!(colors.color_for(Category::Music).unwrap().name, "purple-500");
        assert_eq!(
            colors.color_for(Category::FoodAndDrink).unwrap().name,
            "orange-500"
        );
        assert_eq!(
            colors.color_for(Category::Technology).unwrap_err(),
            MapError::MissingCategoryColor(Category::Technology)
        );
    }

    #[test]
    fn test_palette_rejects_unknown_entries() {
        let config = Config::parse("[palette]\n\"Sports\" = \"red-500\"").unwrap();
        assert!(matches!(config.palette(), Err(ConfigError::Palette { .. })));

        let config = Config::parse("[palette]\n\"Music\" = \"chartreuse\"").unwrap();
        assert!(matches!(config.palette(), Err(ConfigError::Palette { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PALOUR_PORT", "7000"),
            ("PALOUR_LOG_LEVEL", "debug"),
            ("PALOUR_MAP_TIMEOUT_MS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.map.load_timeout_ms, 10_000);
    }
}
