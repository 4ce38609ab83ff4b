//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod card;
pub mod chart;
pub mod loading;
pub mod login_form;
pub mod nav;
pub mod stat_card;

pub use card::Card;
pub use chart::SpendingChart;
pub use loading::MapSkeleton;
pub use login_form::LoginForm;
pub use nav::Nav;
pub use stat_card::StatCard;
