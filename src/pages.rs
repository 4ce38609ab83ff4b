//! Page routes and document metadata

use serde::Serialize;

/// Document title and description for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: &'static str,
    pub description: &'static str,
}

/// Pages of the attendee dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    SignIn,
    PurchaseReport,
    EventMap,
}

impl Page {
    pub fn all() -> [Page; 3] {
        [Page::SignIn, Page::PurchaseReport, Page::EventMap]
    }

    /// Client-side route
    pub fn path(&self) -> &'static str {
        match self {
            Page::SignIn => "/",
            Page::PurchaseReport => "/dashboard/attendee/analytics",
            Page::EventMap => "/dashboard/attendee/events",
        }
    }

    /// Short identifier used by the host API
    pub fn slug(&self) -> &'static str {
        match self {
            Page::SignIn => "sign-in",
            Page::PurchaseReport => "purchase-report",
            Page::EventMap => "event-map",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        Page::all().into_iter().find(|p| p.slug() == slug)
    }

    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Page::all().into_iter().find(|p| p.path() == trimmed)
    }

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            Page::SignIn => "Sign In",
            Page::PurchaseReport => "Analytics",
            Page::EventMap => "Events",
        }
    }

    pub fn meta(&self) -> PageMeta {
        match self {
            Page::SignIn => PageMeta {
                title: "Sign-In | Events Palour",
                description: "Login to your account",
            },
            Page::PurchaseReport => PageMeta {
                title: "Purchase Report | Events Palour",
                description: "Your ticket spending and recent purchases",
            },
            Page::EventMap => PageMeta {
                title: "Event Map | Events Palour",
                description: "Find your events on the map",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_meta() {
        let meta = Page::SignIn.meta();
        assert_eq!(meta.title, "Sign-In | Events Palour");
        assert_eq!(meta.description, "Login to your account");
    }

    #[test]
    fn test_slug_round_trip() {
        for page in Page::all() {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("admin"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Page::from_path("/"), Some(Page::SignIn));
        assert_eq!(Page::from_path(""), Some(Page::SignIn));
        assert_eq!(
            Page::from_path("/dashboard/attendee/events/"),
            Some(Page::EventMap)
        );
        assert_eq!(Page::from_path("/dashboard"), None);
    }

    #[test]
    fn test_titles_are_distinct() {
        let titles: std::collections::HashSet<_> = Page::all().iter().map(|p| p.meta().title).collect();
        assert_eq!(titles.len(), 3);
    }
}
