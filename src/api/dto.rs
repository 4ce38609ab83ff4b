//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::capability::LoadPolicy;
use crate::map::{CategoryColorMap, EventPin, MapViewport, TileLayer};
use crate::pages::{Page, PageMeta};

// ============================================
// REPORT DTOs
// ============================================

/// Chart size query (`?width=&height=`)
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

// ============================================
// EVENT DTOs
// ============================================

/// One event pin with its resolved colour
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: String,
    /// Background utility class, absent when the category has no colour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_class: Option<String>,
}

impl EventResponse {
    pub fn new(pin: &EventPin, color_class: Option<String>) -> Self {
        Self {
            id: pin.id,
            name: pin.name.to_string(),
            lat: pin.position.lat,
            lng: pin.position.lng,
            category: pin.category.display_name().to_string(),
            color_class,
        }
    }
}

/// Event list
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
    pub total: usize,
}

/// Everything the client needs to load and draw the map
#[derive(Debug, Serialize)]
pub struct MapAssetsResponse {
    pub stylesheet_href: String,
    pub script_src: String,
    pub tiles: TileLayer,
    pub viewport: MapViewport,
    pub policy: LoadPolicy,
    /// Category colours after config overrides
    pub palette: CategoryColorMap,
}

// ============================================
// PAGE DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: Page,
    pub path: &'static str,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            page,
            path: page.path(),
            meta: page.meta(),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, unhealthy
    pub status: String,
    /// Catalog validation status
    pub catalog: String,
    /// Whether every pin category has a colour
    pub palette: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
