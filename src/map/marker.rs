//! Marker icons and popups
//!
//! A marker icon is a standalone markup fragment (the map-pin glyph tinted
//! with the category colour) plus the geometry the mapping library needs to
//! anchor it. Icons are built once per pin when the map model is assembled.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use super::{Category, CategoryColorMap, ColorToken, EventPin, MapError};

/// CSS class applied to every marker container
pub const MARKER_CLASS: &str = "custom-map-marker";

/// Glyph edge length in pixels
pub const MARKER_SIZE: u32 = 24;

/// Map-pin glyph rendered as standalone SVG markup
///
/// `class` is added next to the glyph classes, `stroke` sets the tint.
pub fn map_pin_svg(size: u32, class: &str, stroke: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" \
         viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"2\" \
         stroke-linecap=\"round\" stroke-linejoin=\"round\" class=\"map-pin {class}\">\
         <path d=\"M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z\"/>\
         <circle cx=\"12\" cy=\"10\" r=\"3\"/></svg>",
        size = size,
        stroke = encode_double_quoted_attribute(stroke),
        class = encode_double_quoted_attribute(class),
    )
}

/// Icon handed to the mapping library for one marker
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarkerIcon {
    /// Glyph markup
    pub html: String,
    /// Container class
    pub class_name: &'static str,
    /// Icon size in pixels `[w, h]`
    pub icon_size: [i32; 2],
    /// Point of the icon placed on the coordinate
    pub icon_anchor: [i32; 2],
    /// Popup offset relative to the anchor
    pub popup_anchor: [i32; 2],
    /// Colour the glyph was tinted with
    pub color: ColorToken,
}

impl MarkerIcon {
    /// Build the tinted icon for a colour token
    pub fn tinted(color: &ColorToken) -> Self {
        let size = MARKER_SIZE as i32;
        Self {
            html: map_pin_svg(MARKER_SIZE, &color.text_class(), &color.hex),
            class_name: MARKER_CLASS,
            icon_size: [size, size],
            // The pin's tip sits on the coordinate
            icon_anchor: [size / 2, size],
            popup_anchor: [0, -size],
            color: color.clone(),
        }
    }

    /// Build the icon for a category
    ///
    /// Fails with [`MapError::MissingCategoryColor`] when the category has no
    /// colour, so an unmapped category never renders as an unstyled marker.
    pub fn for_category(colors: &CategoryColorMap, category: Category) -> Result<Self, MapError> {
        let color = colors.color_for(category)?;
        Ok(Self::tinted(color))
    }
}

/// Popup content shown when a marker is clicked
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub body: String,
}

impl Popup {
    pub fn for_pin(pin: &EventPin) -> Self {
        Self {
            title: pin.name.to_string(),
            body: format!("Type: {}", pin.category),
        }
    }

    /// Escaped markup for the mapping library's popup
    pub fn to_html(&self) -> String {
        format!(
            "<strong>{}</strong><br/>{}",
            encode_text(&self.title),
            encode_text(&self.body)
        )
    }
}
