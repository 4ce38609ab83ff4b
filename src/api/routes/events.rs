//! Event Map Routes
//!
//! - GET /api/v1/events - Event pins with their colours
//! - GET /api/v1/events/map - Markers and overlay entries
//! - GET /api/v1/map/assets - Mapping library assets, tiles and load policy

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{EventListResponse, EventResponse, MapAssetsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::map::EventMapModel;

/// GET /api/v1/events
pub async fn list_events(State(state): State<Arc<AppState>>) -> Json<EventListResponse> {
    let events: Vec<EventResponse> = state
        .catalog
        .pins
        .iter()
        .map(|pin| {
            let color = state
                .palette
                .color_for(pin.category)
                .ok()
                .map(|c| c.background_class());
            EventResponse::new(pin, color)
        })
        .collect();

    Json(EventListResponse {
        total: events.len(),
        events,
    })
}

/// GET /api/v1/events/map
///
/// Fails with MISSING_CATEGORY_COLOR when a pin's category has no colour.
pub async fn event_map(State(state): State<Arc<AppState>>) -> ApiResult<Json<EventMapModel>> {
    let model = state.map_model()?;
    Ok(Json(model))
}

/// GET /api/v1/map/assets
pub async fn map_assets(State(state): State<Arc<AppState>>) -> Json<MapAssetsResponse> {
    let map = &state.map;
    Json(MapAssetsResponse {
        stylesheet_href: map.assets.stylesheet_href.clone(),
        script_src: map.assets.script_src.clone(),
        tiles: map.assets.tiles.clone(),
        viewport: map.viewport,
        policy: map.policy,
        palette: state.palette.as_ref().clone(),
    })
}
