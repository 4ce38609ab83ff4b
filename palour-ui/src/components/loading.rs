//! Loading Component
//!
//! Skeleton states shaped like the content they stand in for.

use leptos::*;
use palour::map::SkeletonLayout;

/// Placeholder block
#[component]
pub fn Skeleton(
    #[prop(optional, into)]
    class: String,
    #[prop(optional, into)]
    style: String,
) -> impl IntoView {
    view! { <div class=format!("skeleton {}", class) style=style /> }
}

/// Event map placeholder: no tiles and no markers, only the map's outline
#[component]
pub fn MapSkeleton(layout: SkeletonLayout) -> impl IntoView {
    view! {
        <div
            class="relative w-full overflow-hidden rounded-lg border"
            style=format!("height: {}px", layout.map_height_px)
            aria-busy="true"
        >
            <Skeleton class="absolute inset-0 rounded-none" />

            // Zoom controls
            <div class="absolute left-3 top-3 flex flex-col gap-1">
                {(0..layout.zoom_controls)
                    .map(|_| view! { <div class="h-8 w-8 rounded bg-zinc-300/70" /> })
                    .collect_view()}
            </div>

            // Overlay panel with one row per event
            <div
                class="absolute right-3 top-3 rounded-lg bg-white/90 p-4 shadow"
                style=format!("width: {}px", layout.panel_width_px)
            >
                <Skeleton class="mb-3 h-5 w-1/2" />
                <div class="space-y-2">
                    {(0..layout.list_rows)
                        .map(|_| {
                            view! {
                                <div class="skeleton-row flex items-center gap-2">
                                    <Skeleton class="h-3 w-3 rounded-full" />
                                    <Skeleton class="h-4 flex-1" />
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            {layout.scale_bar.then(|| view! {
                <div class="absolute bottom-3 left-3 h-4 w-24 rounded bg-zinc-300/70" />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{count, mount_fixture};
    use palour::map::marker::MARKER_CLASS;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn layout(list_rows: usize) -> SkeletonLayout {
        SkeletonLayout {
            map_height_px: 600,
            panel_width_px: 300,
            list_rows,
            zoom_controls: 2,
            scale_bar: true,
        }
    }

    #[wasm_bindgen_test]
    fn test_map_skeleton_has_no_tiles_or_markers() {
        let host = mount_fixture(|| view! { <MapSkeleton layout=layout(3) /> });

        assert_eq!(count(&host, ".leaflet-tile"), 0);
        assert_eq!(count(&host, &format!(".{}", MARKER_CLASS)), 0);
        assert_eq!(count(&host, "[aria-busy=\"true\"]"), 1);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_map_skeleton_has_one_row_per_event() {
        let host = mount_fixture(|| view! { <MapSkeleton layout=layout(5) /> });
        assert_eq!(count(&host, ".skeleton-row"), 5);
        host.remove();
    }
}
