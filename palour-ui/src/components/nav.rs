//! Navigation Component
//!
//! Header navigation bar with brand and page links.

use leptos::*;
use leptos_router::*;
use palour::pages::Page;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="border-b bg-white">
            <div class="container mx-auto px-4">
                <div class="flex h-16 items-center justify-between">
                    <A href=Page::SignIn.path() class="text-xl font-bold">
                        "Events Palour"
                    </A>

                    <div class="flex items-center space-x-1">
                        {Page::all()
                            .into_iter()
                            .filter(|page| *page != Page::SignIn)
                            .map(|page| view! { <NavLink page=page /> })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(page: Page) -> impl IntoView {
    view! {
        <A
            href=page.path()
            class="rounded-lg px-4 py-2 text-zinc-600 transition-colors hover:bg-zinc-100 hover:text-zinc-900"
            active_class="bg-zinc-100 text-zinc-900"
        >
            {page.label()}
        </A>
    }
}
