//! Raster tile endpoint
//!
//! Tiles are addressed by zoom/x/y on the usual web-mercator grid and served
//! from a templated URL with rotating subdomains.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::{LatLng, MapError};

/// Default OpenStreetMap tile template
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile usage policy
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Web-mercator latitude limit
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Tile layer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    /// Attribution markup displayed alongside the map
    pub attribution: String,
    /// Subdomains substituted for `{s}`
    pub subdomains: Vec<char>,
    /// Highest zoom level the endpoint serves
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

impl TileLayer {
    /// The public OpenStreetMap tile servers
    pub fn openstreetmap() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            subdomains: vec!['a', 'b', 'c'],
            max_zoom: 19,
        }
    }

    /// Create a tile layer for a custom template
    pub fn new(url_template: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: attribution.into(),
            ..Self::openstreetmap()
        }
    }

    /// Subdomain used for a tile, rotating on `x + y`
    pub fn subdomain_for(&self, coord: TileCoord) -> Option<char> {
        if self.subdomains.is_empty() {
            return None;
        }
        let index = (coord.x as usize + coord.y as usize) % self.subdomains.len();
        Some(self.subdomains[index])
    }

    /// Expand the template for a tile
    pub fn tile_url(&self, coord: TileCoord) -> Result<String, MapError> {
        if coord.z > self.max_zoom {
            return Err(MapError::ZoomOutOfRange {
                zoom: coord.z,
                max: self.max_zoom,
            });
        }
        coord.validate()?;

        let subdomain = self
            .subdomain_for(coord)
            .map(String::from)
            .unwrap_or_default();

        Ok(self
            .url_template
            .replace("{s}", &subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string()))
    }
}

/// A tile address
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl TileCoord {
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along one axis at this zoom
    pub fn grid_size(z: u8) -> u32 {
        1u32 << z.min(31)
    }

    /// Check x and y fall inside the zoom level's grid
    pub fn validate(&self) -> Result<(), MapError> {
        let n = Self::grid_size(self.z);
        if self.z > 30 || self.x >= n || self.y >= n {
            return Err(MapError::TileOutOfRange {
                z: self.z,
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }

    /// Tile containing a coordinate at the given zoom
    pub fn containing(point: LatLng, z: u8) -> Result<Self, MapError> {
        point.validate()?;
        if z > 30 {
            return Err(MapError::ZoomOutOfRange { zoom: z, max: 30 });
        }

        let n = f64::from(Self::grid_size(z));
        let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();

        let x = ((point.lng + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n).floor();

        // lng = 180 and the southern clamp land exactly on the far edge
        let max = n - 1.0;
        Ok(Self {
            z,
            x: x.clamp(0.0, max) as u32,
            y: y.clamp(0.0, max) as u32,
        })
    }
}
