//! Built-in dashboard data

use super::{MonthlySpend, Purchase};
use crate::map::{Category, EventPin};
use crate::report::{SummaryStats, Usd};

pub const MONTHLY_SPEND: [MonthlySpend; 6] = [
    MonthlySpend::new("Jan", 400),
    MonthlySpend::new("Feb", 300),
    MonthlySpend::new("Mar", 600),
    MonthlySpend::new("Apr", 800),
    MonthlySpend::new("May", 500),
    MonthlySpend::new("Jun", 700),
];

/// Most recent first
pub const PURCHASES: [Purchase; 3] = [
    Purchase::new(1, "Tech Conference 2023", "2023-06-15", 150),
    Purchase::new(2, "Music Festival", "2023-05-20", 80),
    Purchase::new(3, "Art Exhibition", "2023-04-10", 25),
];

pub const EVENT_PINS: [EventPin; 3] = [
    EventPin::new(1, "Summer Music Festival", 40.7829, -73.9654, Category::Music),
    EventPin::new(2, "Food & Wine Expo", -4.0435, 39.6682, Category::FoodAndDrink),
    EventPin::new(3, "Tech Conference 2023", 37.7749, -122.4194, Category::Technology),
];

// Display literals; they are not derived from PURCHASES.
pub const SUMMARY: SummaryStats = SummaryStats {
    total_spent: Usd(3_300),
    tickets_purchased: 15,
    average_price: Usd(220),
};
