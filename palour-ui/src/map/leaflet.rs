//! Leaflet bindings
//!
//! Only the calls the event map makes. Every constructor is `catch`, so a
//! missing or broken `window.L` surfaces as an `Err` instead of a panic.

use js_sys::{Array, Object, Reflect};
use palour::map::{EventMapModel, LatLng, MarkerIcon, TileLayer};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container: &HtmlElement, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: u8) -> LeafletMap;

    #[wasm_bindgen(method)]
    pub fn remove(this: &LeafletMap) -> LeafletMap;

    /// Any `L.Layer` or `L.Control`
    type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &str) -> Layer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn create_tile_layer(url: &str, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn create_marker(position: &JsValue, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = divIcon)]
    fn create_div_icon(options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["L", "control"], js_name = scale)]
    fn create_scale(options: &JsValue) -> Result<Layer, JsValue>;
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn pair(values: [i32; 2]) -> JsValue {
    Array::of2(&JsValue::from(values[0]), &JsValue::from(values[1])).into()
}

fn lat_lng(point: LatLng) -> JsValue {
    Array::of2(&JsValue::from_f64(point.lat), &JsValue::from_f64(point.lng)).into()
}

fn tile_options(tiles: &TileLayer) -> Result<JsValue, JsValue> {
    let options = Object::new();
    set(&options, "attribution", &JsValue::from_str(&tiles.attribution))?;
    set(&options, "maxZoom", &JsValue::from(tiles.max_zoom))?;
    if !tiles.subdomains.is_empty() {
        let subdomains: String = tiles.subdomains.iter().collect();
        set(&options, "subdomains", &JsValue::from_str(&subdomains))?;
    }
    Ok(options.into())
}

fn icon_options(icon: &MarkerIcon) -> Result<JsValue, JsValue> {
    let options = Object::new();
    set(&options, "html", &JsValue::from_str(&icon.html))?;
    set(&options, "className", &JsValue::from_str(icon.class_name))?;
    set(&options, "iconSize", &pair(icon.icon_size))?;
    set(&options, "iconAnchor", &pair(icon.icon_anchor))?;
    set(&options, "popupAnchor", &pair(icon.popup_anchor))?;
    Ok(options.into())
}

/// Draw `model` into `container` and return the map for later removal
pub fn render(container: &HtmlElement, model: &EventMapModel) -> Result<LeafletMap, JsValue> {
    let map = create_map(container, &Object::new())?;
    map.set_view(&lat_lng(model.viewport.center), model.viewport.zoom);

    create_tile_layer(&model.tiles.url_template, &tile_options(&model.tiles)?)?.add_to(&map);
    create_scale(&Object::new())?.add_to(&map);

    for spec in &model.markers {
        let icon = create_div_icon(&icon_options(&spec.icon)?)?;
        let options = Object::new();
        set(&options, "icon", &icon)?;

        create_marker(&lat_lng(spec.position), &options)?
            .bind_popup(&spec.popup.to_html())
            .add_to(&map);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palour::map::ColorToken;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn get(options: &JsValue, key: &str) -> JsValue {
        Reflect::get(options, &JsValue::from_str(key)).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_tile_options() {
        let tiles = TileLayer::openstreetmap();
        let options = tile_options(&tiles).unwrap();

        assert_eq!(get(&options, "attribution").as_string(), Some(tiles.attribution.clone()));
        assert_eq!(get(&options, "maxZoom").as_f64(), Some(f64::from(tiles.max_zoom)));
    }

    #[wasm_bindgen_test]
    fn test_icon_options() {
        let icon = MarkerIcon::tinted(&ColorToken::named("red-500").unwrap());
        let options = icon_options(&icon).unwrap();

        assert_eq!(get(&options, "className").as_string().as_deref(), Some("custom-map-marker"));
        assert_eq!(get(&options, "html").as_string(), Some(icon.html.clone()));

        let anchor: Array = get(&options, "iconAnchor").into();
        assert_eq!(anchor.get(0).as_f64(), Some(12.0));
        assert_eq!(anchor.get(1).as_f64(), Some(24.0));
    }
}
