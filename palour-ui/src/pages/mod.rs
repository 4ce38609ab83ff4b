//! Page Components

pub mod event_map;
pub mod purchase_report;
pub mod sign_in;

pub use event_map::EventMap;
pub use purchase_report::PurchaseReportPage;
pub use sign_in::SignIn;
