//! Mounting helpers for browser tests

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Mount `f` into a fresh `<div>` appended to the body and return the div
pub fn mount_fixture<F, N>(f: F) -> HtmlElement
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    let document = web_sys::window().unwrap().document().unwrap();
    let host: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    document.body().unwrap().append_child(&host).unwrap();
    mount_to(host.clone(), f);
    host
}

/// Number of elements under `root` matching `selector`
pub fn count(root: &HtmlElement, selector: &str) -> u32 {
    root.query_selector_all(selector).unwrap().length()
}
