//! Event Map
//!
//! Everything the event map needs to render, independent of the mapping
//! library that finally draws it:
//!
//! - **category**: Event categories and the category → colour map
//! - **geo**: Coordinates and event pins
//! - **tiles**: Tile endpoint template, attribution and tile addressing
//! - **marker**: Marker icon construction and popup content
//! - **view**: The synchronized marker/overlay model and the frame chosen
//!   for each loading state
//!
//! # Rendering flow
//!
//! ```text
//! mount → Loading ──(capability resolves)──▶ Ready ──▶ Live(EventMapModel)
//!            │
//!            └──(attempts exhausted)──▶ Failed ──▶ Unavailable (retry)
//!
//! Unmounted / Loading ──▶ Skeleton (no tiles, no markers)
//! ```

pub mod category;
pub mod geo;
pub mod marker;
pub mod tiles;
pub mod view;

pub use category::{Category, CategoryColorMap, ColorToken};
pub use geo::{EventPin, LatLng};
pub use marker::{map_pin_svg, MarkerIcon, Popup};
pub use tiles::{TileCoord, TileLayer};
pub use view::{
    EventMapModel, EventMapView, MapAssets, MapFrame, MapViewport, MarkerSpec, OverlayEntry,
    SkeletonLayout,
};

use thiserror::Error;

/// Errors raised while building the map model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// Category name is not part of the fixed enumeration
    #[error("Unknown event category '{0}'")]
    UnknownCategory(String),

    /// Colour token is not in the palette
    #[error("Unknown colour token '{0}'")]
    UnknownColor(String),

    /// Category has no entry in the colour map
    #[error("No colour mapped for category '{0}'")]
    MissingCategoryColor(Category),

    /// Coordinate outside the globe
    #[error("Invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Tile address outside the zoom level's grid
    #[error("Tile {x}/{y} is outside zoom level {z}")]
    TileOutOfRange { z: u8, x: u32, y: u32 },

    /// Zoom level beyond what the tile layer serves
    #[error("Zoom level {zoom} exceeds maximum {max}")]
    ZoomOutOfRange { zoom: u8, max: u8 },

    /// Two pins share an id
    #[error("Duplicate event pin id {0}")]
    DuplicatePin(u32),
}

/// Result type alias for map operations
pub type MapResult<T> = Result<T, MapError>;
