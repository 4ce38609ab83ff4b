//! Event Map Page
//!
//! The live map needs Leaflet, which only exists once its script has loaded
//! in the browser. Until then the page shows a skeleton of the same shape.
//! If loading gives up, the page says so and offers a retry.

use leptos::*;
use leptos_meta::{Meta, Title};
use palour::capability::{CapabilityState, MountToken};
use palour::head::HeadLease;
use palour::map::{EventMapModel, EventMapView, MapFrame, OverlayEntry};
use palour::pages::Page;

use crate::api::MapSettings;
use crate::components::MapSkeleton;
use crate::map::leaflet::{self, LeafletMap};
use crate::map::{load_leaflet, DomHead, Leaflet};
use crate::state::GlobalState;

fn build_view(state: &GlobalState, settings: &MapSettings) -> EventMapView {
    EventMapView::new(
        state.catalog.pins,
        &settings.palette,
        settings.assets.tiles.clone(),
        settings.viewport,
    )
}

/// Drive the shared Leaflet load and mirror it into `capability`
async fn load_capability(
    state: GlobalState,
    token: MountToken,
    settings: MapSettings,
    capability: RwSignal<CapabilityState<Leaflet>>,
) {
    if let Some(leaflet) = state.leaflet.ready() {
        token.apply(|| capability.set(CapabilityState::Ready(leaflet)));
        return;
    }

    token.apply(|| capability.set(CapabilityState::Loading { attempt: 1 }));

    let observer = token.clone();
    let result = load_leaflet(
        &state.leaflet,
        &state.head,
        settings.assets.script(),
        settings.policy,
        move |next| {
            if let CapabilityState::Loading { attempt } = next {
                let attempt = *attempt;
                observer.apply(|| capability.set(CapabilityState::Loading { attempt }));
            }
        },
    )
    .await;

    token.apply(move || match result {
        Ok(leaflet) => {
            web_sys::console::log_1(&format!("Leaflet {} ready", leaflet.version).into());
            capability.set(CapabilityState::Ready(leaflet));
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Event map unavailable: {}", e).into());
            capability.set(CapabilityState::Failed(e));
        }
    });
}

#[component]
pub fn EventMap() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let meta = Page::EventMap.meta();

    let token = MountToken::new();
    let capability = create_rw_signal(CapabilityState::<Leaflet>::Unmounted);
    let settings = store_value(MapSettings::default());
    let map_view = create_rw_signal(build_view(&state, &MapSettings::default()));
    let stylesheet = store_value::<Option<HeadLease<DomHead>>>(None);

    // Settings, then the stylesheet, then the library
    {
        let state = state.clone();
        let token = token.clone();
        spawn_local(async move {
            let loaded = state.map_settings().await;
            let applied = token.apply(|| {
                settings.set_value(loaded.clone());
                map_view.set(build_view(&state, &loaded));
            });
            if !applied {
                return;
            }

            match state.head.acquire(loaded.assets.stylesheet()) {
                Ok(lease) => {
                    token.apply(move || stylesheet.set_value(Some(lease)));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Map stylesheet not added: {}", e).into());
                }
            }

            load_capability(state, token, loaded, capability).await;
        });
    }

    let retry = {
        let state = state.clone();
        let token = token.clone();
        Callback::new(move |_: ()| {
            capability.set(CapabilityState::Unmounted);
            spawn_local(load_capability(
                state.clone(),
                token.clone(),
                settings.get_value(),
                capability,
            ));
        })
    };

    on_cleanup(move || {
        token.deactivate();
        stylesheet.try_update_value(|lease| lease.take());
    });

    let frame = move || {
        map_view.with(|view| {
            capability.with(|current| match view.frame(current) {
                MapFrame::Skeleton(layout) => view! { <MapSkeleton layout=layout /> }.into_view(),
                MapFrame::Live(model) => view! { <LiveMap model=model.clone() /> }.into_view(),
                MapFrame::Unavailable { message, retryable } => view! {
                    <MapUnavailable message=message retryable=retryable on_retry=retry />
                }
                .into_view(),
            })
        })
    };

    view! {
        <Title text=meta.title />
        <Meta name="description" content=meta.description />

        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Event Map"</h1>
            {frame}
        </div>
    }
}

/// Leaflet map plus the overlay list
#[component]
fn LiveMap(model: EventMapModel) -> impl IntoView {
    let container = create_node_ref::<html::Div>();
    let handle = store_value::<Option<LeafletMap>>(None);
    let height = model.viewport.height_px;
    let overlay = model.overlay.clone();

    container.on_load(move |element| {
        // Wait a frame so the container is attached and sized
        request_animation_frame(move || match leaflet::render(&element, &model) {
            Ok(map) => {
                if let Some(Some(orphan)) = handle.try_set_value(Some(map)) {
                    orphan.remove();
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to draw event map: {:?}", e).into());
            }
        });
    });

    on_cleanup(move || {
        if let Some(Some(map)) = handle.try_update_value(|map| map.take()) {
            map.remove();
        }
    });

    view! {
        <div class="relative">
            <div
                node_ref=container
                class="z-0 w-full rounded-lg"
                style=format!("height: {}px", height)
            />
            <OverlayPanel entries=overlay />
        </div>
    }
}

/// Event list layered over the map, coloured like the markers
#[component]
fn OverlayPanel(entries: Vec<OverlayEntry>) -> impl IntoView {
    view! {
        <div class="absolute right-3 top-3 z-[1000] w-[300px] rounded-lg bg-white/90 p-4 shadow">
            <h2 class="mb-3 font-semibold">"Events"</h2>
            <ul class="space-y-2">
                {entries
                    .into_iter()
                    .map(|entry| {
                        let glyph = entry.glyph_html();
                        view! {
                            <li class="flex items-center gap-2 text-sm">
                                <span class="inline-flex" inner_html=glyph />
                                <span>{entry.name}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

/// Shown when the map cannot be drawn
#[component]
fn MapUnavailable(message: String, retryable: bool, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div
            class="flex h-[600px] flex-col items-center justify-center gap-4 rounded-lg border bg-zinc-50 text-center"
            role="alert"
        >
            <p class="text-zinc-600">{message}</p>
            {retryable.then(|| view! {
                <button
                    class="rounded-md bg-zinc-900 px-4 py-2 text-sm font-medium text-white hover:bg-zinc-800"
                    on:click=move |_| on_retry.call(())
                >
                    "Try again"
                </button>
            })}
        </div>
    }
}
