//! Chart Component
//!
//! Spending bar chart drawn as SVG from a precomputed [`ChartLayout`].

use leptos::*;
use palour::report::{Bar, ChartLayout};

/// Spending chart with grid, axes, tooltips and legend
#[component]
pub fn SpendingChart(layout: ChartLayout) -> impl IntoView {
    let hovered = create_rw_signal::<Option<Bar>>(None);

    let frame = layout.frame;
    let plot = layout.plot;
    let legend = layout.legend.clone();
    let view_box = format!("0 0 {} {}", frame.width, frame.height);

    let grid = layout
        .grid
        .iter()
        .map(|line| {
            view! {
                <line
                    x1=line.x1
                    x2=line.x2
                    y1=line.y
                    y2=line.y
                    stroke-dasharray=line.dasharray
                />
            }
        })
        .collect_view();

    let ticks = layout
        .ticks
        .iter()
        .map(|tick| {
            view! {
                <text x={plot.x - 8.0} y=tick.y text-anchor="end" dominant-baseline="middle">
                    {tick.label.clone()}
                </text>
            }
        })
        .collect_view();

    let month_labels = layout
        .bars
        .iter()
        .map(|bar| {
            view! {
                <text x=bar.label_x y={plot.bottom() + 18.0} text-anchor="middle">
                    {bar.month.clone()}
                </text>
            }
        })
        .collect_view();

    let bars = layout
        .bars
        .iter()
        .cloned()
        .map(|bar| {
            let hover = bar.clone();
            view! {
                <rect
                    x=bar.x
                    y=bar.y
                    width=bar.width
                    height=bar.height
                    rx="4"
                    fill=bar.fill.clone()
                    on:mouseenter=move |_| hovered.set(Some(hover.clone()))
                    on:mouseleave=move |_| hovered.set(None)
                />
            }
        })
        .collect_view();

    view! {
        <div class="relative">
            <svg viewBox=view_box class="w-full h-auto" role="img">
                <g class="chart-grid">{grid}</g>
                <g class="chart-axis">{ticks} {month_labels}</g>
                <g>{bars}</g>
            </svg>

            // Tooltip for the hovered bar
            {move || hovered.get().map(|bar| {
                let left = bar.label_x / frame.width * 100.0;
                let top = bar.y / frame.height * 100.0;
                view! {
                    <div
                        class="pointer-events-none absolute -translate-x-1/2 -translate-y-full rounded-md border bg-white px-2 py-1 text-xs shadow"
                        style=format!("left: {:.2}%; top: {:.2}%", left, top)
                    >
                        <div class="font-medium">{bar.month.clone()}</div>
                        <div>{bar.tooltip.clone()}</div>
                    </div>
                }
            })}

            <div class="mt-2 flex items-center justify-center gap-2 text-sm">
                <span class="h-2 w-2 rounded-sm" style=format!("background: {}", legend.color) />
                <span>{legend.label}</span>
            </div>
        </div>
    }
}
