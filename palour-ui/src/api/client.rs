//! HTTP API Client
//!
//! Functions for talking to the Events Palour host.

use gloo_net::http::Request;
use palour::capability::LoadPolicy;
use palour::map::{CategoryColorMap, MapAssets, MapViewport};

/// Default API base URL (same origin as the served UI)
pub const DEFAULT_API_BASE: &str = "/api/v1";

const API_BASE_KEY: &str = "palour_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten());

    let url = stored.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

/// Map library assets, viewport, load policy and category colours
/// configured on the host
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct MapSettings {
    #[serde(flatten)]
    pub assets: MapAssets,
    pub viewport: MapViewport,
    pub policy: LoadPolicy,
    #[serde(default)]
    pub palette: CategoryColorMap,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

// ============ API Functions ============

/// Fetch the map settings
pub async fn fetch_map_settings() -> Result<MapSettings, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/map/assets", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ErrorBody>().await {
            Ok(body) => format!("{} ({})", body.error.message, body.error.code),
            Err(_) => format!("HTTP {}", status),
        });
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use palour::map::Category;

    const HOST_RESPONSE: &str = r#"{
            "stylesheet_href": "https://cdn.example/leaflet.css",
            "script_src": "https://cdn.example/leaflet.js",
            "tiles": {
                "url_template": "https://tiles.example/{z}/{x}/{y}.png",
                "attribution": "Example",
                "subdomains": [],
                "max_zoom": 18
            },
            "viewport": { "center": { "lat": 0.0, "lng": 0.0 }, "zoom": 3, "height_px": 600 },
            "policy": {
                "timeout_ms": 5000,
                "max_attempts": 2,
                "initial_backoff_ms": 250,
                "max_backoff_ms": 1000,
                "multiplier": 2
            }
        }"#;

    #[test]
    fn test_map_settings_parse_host_response() {
        let settings: MapSettings = serde_json::from_str(HOST_RESPONSE).unwrap();
        assert_eq!(settings.assets.script_src, "https://cdn.example/leaflet.js");
        assert_eq!(settings.assets.tiles.max_zoom, 18);
        assert_eq!(settings.viewport.zoom, 3);
        assert_eq!(settings.policy.max_attempts, 2);
        assert_eq!(settings.palette, CategoryColorMap::default());
    }

    #[test]
    fn test_map_settings_parse_palette_override() {
        let mut host: serde_json::Value = serde_json::from_str(HOST_RESPONSE).unwrap();
        host["palette"] = serde_json::json!({
            "Music": { "name": "purple-500", "hex": "#a855f7" },
            "Food & Drink": { "name": "orange-500", "hex": "#f97316" }
        });

        let settings: MapSettings = serde_json::from_value(host).unwrap();
        let music = settings.palette.color_for(Category::Music).unwrap();
        assert_eq!(music.text_class(), "text-purple-500");
        assert!(settings.palette.color_for(Category::Technology).is_err());
    }

    #[test]
    fn test_error_body_parse() {
        let body = r#"{"error":{"code":"NOT_FOUND","message":"missing"},"request_id":"x"}"#;
        let parsed: ErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.code, "NOT_FOUND");
    }
}
