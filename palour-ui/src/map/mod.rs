//! Browser implementations of the map seams
//!
//! - **head**: `document.head` as a [`palour::head::HeadHost`]
//! - **leaflet**: Leaflet bindings used to draw the live map
//! - **loader**: Script source and timer for the Leaflet capability

pub mod head;
pub mod leaflet;
pub mod loader;

pub use head::DomHead;
pub use loader::{load_leaflet, Leaflet};
