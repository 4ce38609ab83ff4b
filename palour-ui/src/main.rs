//! Events Palour Dashboard
//!
//! Attendee dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Purchase report with a spending chart, recent purchases and statistics
//! - Event map that loads Leaflet on first use, with a skeleton while it
//!   loads and a retry action when it cannot
//! - Sign-in page
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. View models come from the `palour` core crate; this crate
//! renders them and supplies the browser side of the map loader: the script
//! source, the document head and the timer.

use leptos::*;

mod api;
mod app;
mod components;
mod map;
mod pages;
mod state;

#[cfg(test)]
mod test_support;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
