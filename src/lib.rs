//! # Events Palour
//!
//! Attendee dashboard for the Events Palour ticketing site: a purchase
//! report, an event map and the sign-in page.
//!
//! The crate holds everything that does not need a browser, so it can be
//! tested natively and shared with the WASM frontend (`palour-ui`):
//!
//! ## Features
//!
//! - **Purchase report**: Spending chart geometry, recent purchases and
//!   headline statistics
//! - **Event map**: Category colours, marker icons, popups and tile
//!   addressing, with an explicit error when a category has no colour
//! - **Capability loading**: A timed, retrying, memoised loader for the
//!   mapping library with a `Loading → Ready | Failed` state machine
//! - **Head registry**: Reference-counted stylesheet and script injection
//!
//! ## Modules
//!
//! - [`catalog`]: Built-in purchases, spending series and event pins
//! - [`report`]: Purchase Report view model and bar chart layout
//! - [`map`]: Event map model
//! - [`capability`]: Async capability loader
//! - [`head`]: Document head resources
//! - [`pages`]: Routes and page metadata
//!
//! With the default `server` feature:
//!
//! - `api`: Axum host serving the view models and the built UI
//! - `config`: TOML configuration with environment overrides
//! - `probe`: Reachability checks for the map's external assets
//!
//! ## Quick Start
//!
//! ```rust
//! use palour::catalog::Catalog;
//! use palour::map::{CategoryColorMap, EventMapModel, MapViewport, TileLayer};
//! use palour::report::PurchaseReport;
//!
//! let catalog = Catalog::sample();
//!
//! let report = PurchaseReport::build(&catalog);
//! assert_eq!(report.statistics.stats[0].value, "$3,300");
//!
//! let model = EventMapModel::build(
//!     catalog.pins,
//!     &CategoryColorMap::default(),
//!     TileLayer::openstreetmap(),
//!     MapViewport::default(),
//! )
//! .unwrap();
//! assert_eq!(model.markers.len(), 3);
//! ```

pub mod capability;
pub mod catalog;
pub mod head;
pub mod map;
pub mod pages;
pub mod report;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod probe;

// Re-export top-level types for convenience
pub use capability::{
    CapabilityError, CapabilityLoader, CapabilityMachine, CapabilitySource, CapabilityState,
    LoadPolicy, MountToken, SharedCapability, Timer,
};

pub use catalog::{Catalog, CatalogError, MonthlySpend, Purchase};

pub use head::{HeadError, HeadHost, HeadLease, HeadRegistry, HeadResource};

pub use map::{
    Category, CategoryColorMap, ColorToken, EventMapModel, EventMapView, EventPin, LatLng,
    MapAssets, MapError, MapFrame, MapViewport, MarkerIcon, Popup, TileCoord, TileLayer,
};

pub use pages::{Page, PageMeta};

pub use report::{BarChart, ChartConfig, ChartFrame, ChartLayout, PurchaseReport, SummaryStats, Usd};

#[cfg(feature = "server")]
pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

#[cfg(feature = "server")]
pub use config::{Config, ConfigError};
