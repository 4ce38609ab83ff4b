//! Card Component

use leptos::*;
use palour::report::CardHeader;

/// Bordered card with a title and description
#[component]
pub fn Card(
    header: CardHeader,
    #[prop(optional, into)]
    class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=format!("rounded-lg border bg-white shadow-sm {}", class)>
            <div class="flex flex-col space-y-1.5 p-6">
                <h3 class="text-2xl font-semibold leading-none tracking-tight">{header.title}</h3>
                <p class="text-sm text-zinc-500">{header.description}</p>
            </div>
            <div class="p-6 pt-0">{children()}</div>
        </div>
    }
}
