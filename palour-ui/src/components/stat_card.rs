//! Stat Card Component
//!
//! One labelled figure from the purchase statistics.

use leptos::*;
use palour::report;

#[component]
pub fn StatCard(stat: report::StatCard) -> impl IntoView {
    view! {
        <div class="rounded-lg border p-4">
            <p class="text-sm font-medium text-zinc-500">{stat.label}</p>
            <p class="text-2xl font-bold">{stat.value}</p>
        </div>
    }
}
