//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use palour::pages::Page;

use crate::components::Nav;
use crate::pages::{EventMap, PurchaseReportPage, SignIn};
use crate::state::provide_global_state;

/// Parent route for the attendee dashboard pages
const DASHBOARD_ROUTE: &str = "/dashboard";
const ANALYTICS_ROUTE: &str = "attendee/analytics";
const EVENTS_ROUTE: &str = "attendee/events";

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_global_state();

    view! {
        <Title text="Events Palour" />
        <Router>
            <Routes>
                <Route path=Page::SignIn.path() view=SignIn />
                <Route path=DASHBOARD_ROUTE view=DashboardShell>
                    <Route path=ANALYTICS_ROUTE view=PurchaseReportPage />
                    <Route path=EVENTS_ROUTE view=EventMap />
                </Route>
                <Route path="/*any" view=NotFound />
            </Routes>
        </Router>
    }
}

/// Navigation and content area for the dashboard pages
#[component]
fn DashboardShell() -> impl IntoView {
    view! {
        <div class="flex min-h-screen flex-col bg-white">
            <Nav />
            <main class="container mx-auto flex-1 px-4 py-8">
                <Outlet />
            </main>
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <Title text="Page Not Found | Events Palour" />
        <div class="flex min-h-[60vh] flex-col items-center justify-center text-center">
            <h1 class="mb-2 text-3xl font-bold">"Page Not Found"</h1>
            <p class="mb-6 text-zinc-500">"The page you're looking for doesn't exist."</p>
            <A
                href=Page::SignIn.path()
                class="rounded-lg bg-zinc-900 px-6 py-3 font-medium text-white transition-colors hover:bg-zinc-800"
            >
                "Go to Sign In"
            </A>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_routes_match_page_paths() {
        let full = |child: &str| format!("{}/{}", DASHBOARD_ROUTE, child);
        assert_eq!(full(ANALYTICS_ROUTE), Page::PurchaseReport.path());
        assert_eq!(full(EVENTS_ROUTE), Page::EventMap.path());
    }
}
