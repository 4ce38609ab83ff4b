//! Map view model
//!
//! [`EventMapModel`] pairs every pin with exactly one marker and exactly one
//! overlay entry, both coloured from the same lookup. [`EventMapView`] picks
//! the frame to draw for the current capability state: a skeleton until the
//! mapping library is ready, the live map afterwards, or an explicit
//! unavailable notice when loading gave up.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{
    map_pin_svg, CategoryColorMap, ColorToken, EventPin, LatLng, MapError, MarkerIcon, Popup,
    TileLayer,
};
use crate::capability::CapabilityState;
use crate::head::HeadResource;

/// Versioned stylesheet for the mapping library
pub const LEAFLET_STYLESHEET: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// Versioned script for the mapping library
pub const LEAFLET_SCRIPT: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// External assets the live map depends on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapAssets {
    pub stylesheet_href: String,
    pub script_src: String,
    pub tiles: TileLayer,
}

impl Default for MapAssets {
    fn default() -> Self {
        Self {
            stylesheet_href: LEAFLET_STYLESHEET.to_string(),
            script_src: LEAFLET_SCRIPT.to_string(),
            tiles: TileLayer::openstreetmap(),
        }
    }
}

impl MapAssets {
    /// Stylesheet as a document head resource
    pub fn stylesheet(&self) -> HeadResource {
        HeadResource::stylesheet(&self.stylesheet_href)
    }

    /// Script as a document head resource
    pub fn script(&self) -> HeadResource {
        HeadResource::script(&self.script_src)
    }
}

/// Initial camera and map area size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapViewport {
    pub center: LatLng,
    pub zoom: u8,
    pub height_px: u32,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: 2,
            height_px: 600,
        }
    }
}

/// One marker on the live map
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarkerSpec {
    pub pin_id: u32,
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub popup: Popup,
}

/// One row of the overlay panel
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OverlayEntry {
    pub pin_id: u32,
    pub name: String,
    pub color: ColorToken,
}

/// Edge length of the overlay list glyph in pixels
pub const OVERLAY_GLYPH_SIZE: u32 = 16;

impl OverlayEntry {
    /// Map-pin glyph for the list row, tinted through the text colour class
    pub fn glyph_html(&self) -> String {
        map_pin_svg(
            OVERLAY_GLYPH_SIZE,
            &format!("shrink-0 {}", self.color.text_class()),
            "currentColor",
        )
    }
}

/// Everything the live map renders
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventMapModel {
    pub viewport: MapViewport,
    pub tiles: TileLayer,
    pub markers: Vec<MarkerSpec>,
    pub overlay: Vec<OverlayEntry>,
}

impl EventMapModel {
    /// Build markers and overlay entries for every pin, in input order
    pub fn build(
        pins: &[EventPin],
        colors: &CategoryColorMap,
        tiles: TileLayer,
        viewport: MapViewport,
    ) -> Result<Self, MapError> {
        let mut seen = HashSet::with_capacity(pins.len());
        let mut markers = Vec::with_capacity(pins.len());
        let mut overlay = Vec::with_capacity(pins.len());

        for pin in pins {
            if !seen.insert(pin.id) {
                return Err(MapError::DuplicatePin(pin.id));
            }
            pin.position.validate()?;

            let icon = MarkerIcon::for_category(colors, pin.category)?;
            overlay.push(OverlayEntry {
                pin_id: pin.id,
                name: pin.name.to_string(),
                color: icon.color.clone(),
            });
            markers.push(MarkerSpec {
                pin_id: pin.id,
                position: pin.position,
                icon,
                popup: Popup::for_pin(pin),
            });
        }

        Ok(Self {
            viewport,
            tiles,
            markers,
            overlay,
        })
    }

    /// Marker for a pin id
    pub fn marker(&self, pin_id: u32) -> Option<&MarkerSpec> {
        self.markers.iter().find(|m| m.pin_id == pin_id)
    }

    /// Overlay entry for a pin id
    pub fn overlay_entry(&self, pin_id: u32) -> Option<&OverlayEntry> {
        self.overlay.iter().find(|e| e.pin_id == pin_id)
    }
}

/// Placeholder shapes matching the live map's layout
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SkeletonLayout {
    pub map_height_px: u32,
    pub panel_width_px: u32,
    pub list_rows: usize,
    pub zoom_controls: usize,
    pub scale_bar: bool,
}

/// Overlay panel width in pixels
pub const OVERLAY_WIDTH_PX: u32 = 300;

/// What the map area shows
#[derive(Debug, Clone, PartialEq)]
pub enum MapFrame<'a> {
    /// Placeholder only: no tiles, no markers
    Skeleton(SkeletonLayout),
    /// Live tile map with markers and overlay
    Live(&'a EventMapModel),
    /// Loading gave up or the model could not be built
    Unavailable { message: String, retryable: bool },
}

impl MapFrame<'_> {
    /// Markers drawn in this frame
    pub fn markers(&self) -> &[MarkerSpec] {
        match self {
            MapFrame::Live(model) => &model.markers,
            _ => &[],
        }
    }

    /// Whether tiles are requested in this frame
    pub fn shows_tiles(&self) -> bool {
        matches!(self, MapFrame::Live(_))
    }
}

/// The event map view: pins, their model, and the frame for each state
#[derive(Debug, Clone)]
pub struct EventMapView {
    pin_count: usize,
    viewport: MapViewport,
    model: Result<EventMapModel, MapError>,
}

impl EventMapView {
    pub fn new(
        pins: &[EventPin],
        colors: &CategoryColorMap,
        tiles: TileLayer,
        viewport: MapViewport,
    ) -> Self {
        let model = EventMapModel::build(pins, colors, tiles, viewport);
        if let Err(e) = &model {
            tracing::error!(error = %e, "Event map model could not be built");
        }
        Self {
            pin_count: pins.len(),
            viewport,
            model,
        }
    }

    /// The live model, or why it could not be built
    pub fn model(&self) -> Result<&EventMapModel, &MapError> {
        self.model.as_ref()
    }

    /// Skeleton matching the live layout
    pub fn skeleton(&self) -> SkeletonLayout {
        SkeletonLayout {
            map_height_px: self.viewport.height_px,
            panel_width_px: OVERLAY_WIDTH_PX,
            list_rows: self.pin_count,
            zoom_controls: 2,
            scale_bar: true,
        }
    }

    /// Frame to draw for a capability state
    pub fn frame<T>(&self, state: &CapabilityState<T>) -> MapFrame<'_> {
        match state {
            CapabilityState::Unmounted | CapabilityState::Loading { .. } => {
                MapFrame::Skeleton(self.skeleton())
            }
            CapabilityState::Ready(_) => match &self.model {
                Ok(model) => MapFrame::Live(model),
                Err(e) => MapFrame::Unavailable {
                    message: format!("The event map is misconfigured: {}", e),
                    retryable: false,
                },
            },
            CapabilityState::Failed(e) => MapFrame::Unavailable {
                message: format!("The map could not be loaded: {}", e),
                retryable: e.is_retryable(),
            },
        }
    }
}
