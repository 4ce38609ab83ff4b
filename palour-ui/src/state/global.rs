//! Global Application State
//!
//! Long-lived handles shared by every page. Loads are memoised here so that
//! leaving and re-entering the event map does not fetch Leaflet again.

use futures::future::FutureExt;
use leptos::*;
use palour::capability::{CapabilityError, SharedCapability};
use palour::catalog::Catalog;
use palour::head::HeadRegistry;

use crate::api::{self, MapSettings};
use crate::map::{DomHead, Leaflet};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Built-in purchases, spending and event pins
    pub catalog: Catalog,
    /// Map settings and category colours from the host, fetched once
    pub settings: SharedCapability<MapSettings>,
    /// The Leaflet library, loaded once
    pub leaflet: SharedCapability<Leaflet>,
    /// Stylesheets and scripts appended to `document.head`
    pub head: HeadRegistry<DomHead>,
}

impl GlobalState {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::sample(),
            settings: SharedCapability::new(),
            leaflet: SharedCapability::new(),
            head: HeadRegistry::new(DomHead),
        }
    }

    /// Host map settings, or the built-in defaults when the host has none
    pub async fn map_settings(&self) -> MapSettings {
        let loaded = self
            .settings
            .get_or_load(|| {
                async {
                    let settings = match api::fetch_map_settings().await {
                        Ok(settings) => settings,
                        Err(e) => {
                            web_sys::console::warn_1(
                                &format!("Using default map settings: {}", e).into(),
                            );
                            MapSettings::default()
                        }
                    };
                    Ok::<_, CapabilityError>(settings)
                }
                .boxed_local()
            })
            .await;

        loaded.unwrap_or_default()
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create and provide global state
pub fn provide_global_state() {
    provide_context(GlobalState::new());
}
