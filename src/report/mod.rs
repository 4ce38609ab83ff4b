//! Purchase Report
//!
//! View model for the attendee's spending page: a monthly bar chart, the most
//! recent purchases, and three headline statistics.
//!
//! The headline statistics are fixed display values. They are not computed
//! from the purchase list; [`SummaryStats::discrepancy`] reports how far they
//! are from what the list would give so the host can log it.

pub mod chart;

pub use chart::{Bar, BarChart, ChartConfig, ChartFrame, ChartLayout, GridLine, LegendEntry, PlotArea, Tick};

use serde::Serialize;
use std::fmt;

use crate::catalog::{Catalog, MonthlySpend, Purchase};

/// Whole US dollars, displayed as `$1,234`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Usd(pub u64);

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "${}", grouped)
    }
}

/// Headline statistics shown on the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total_spent: Usd,
    pub tickets_purchased: u32,
    pub average_price: Usd,
}

/// One statistic tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

/// Headline values next to what the purchase list adds up to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryDiscrepancy {
    pub shown: SummaryStats,
    pub computed: SummaryStats,
}

impl SummaryStats {
    /// Tiles in display order
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                label: "Total Spent",
                value: self.total_spent.to_string(),
            },
            StatCard {
                label: "Tickets Purchased",
                value: self.tickets_purchased.to_string(),
            },
            StatCard {
                label: "Average Price",
                value: self.average_price.to_string(),
            },
        ]
    }

    /// Statistics derived from a purchase list
    pub fn from_purchases(purchases: &[Purchase]) -> Self {
        // Summed wide so a large catalog cannot overflow
        let total: u64 = purchases.iter().map(|p| u64::from(p.amount)).sum();
        let count = purchases.len() as u64;
        let average = if count == 0 {
            0
        } else {
            (total + count / 2) / count
        };
        Self {
            total_spent: Usd(total),
            tickets_purchased: u32::try_from(count).unwrap_or(u32::MAX),
            average_price: Usd(average),
        }
    }

    /// `None` when the shown values match the purchase list
    pub fn discrepancy(&self, purchases: &[Purchase]) -> Option<SummaryDiscrepancy> {
        let computed = Self::from_purchases(purchases);
        if computed == *self {
            None
        } else {
            Some(SummaryDiscrepancy {
                shown: *self,
                computed,
            })
        }
    }
}

/// Card heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardHeader {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingCard {
    pub header: CardHeader,
    pub config: ChartConfig,
    pub series: Vec<MonthlySpend>,
}

impl SpendingCard {
    pub fn layout(&self, frame: ChartFrame) -> ChartLayout {
        BarChart::layout(&self.series, &self.config, frame)
    }
}

/// One row of the recent purchases list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseRow {
    pub id: u32,
    pub event: &'static str,
    pub date: &'static str,
    pub amount: String,
}

impl From<&Purchase> for PurchaseRow {
    fn from(purchase: &Purchase) -> Self {
        Self {
            id: purchase.id,
            event: purchase.event,
            date: purchase.date,
            amount: format!("${}", purchase.amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentPurchasesCard {
    pub header: CardHeader,
    pub rows: Vec<PurchaseRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsCard {
    pub header: CardHeader,
    pub stats: Vec<StatCard>,
}

/// The whole Purchase Report page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseReport {
    pub title: &'static str,
    pub spending: SpendingCard,
    pub recent: RecentPurchasesCard,
    pub statistics: StatisticsCard,
}

impl PurchaseReport {
    pub fn build(catalog: &Catalog) -> Self {
        Self {
            title: "Purchase Report",
            spending: SpendingCard {
                header: CardHeader {
                    title: "Spending Overview",
                    description: "Your ticket purchase history over the last 6 months",
                },
                config: ChartConfig::AMOUNT,
                series: catalog.monthly_spend.to_vec(),
            },
            recent: RecentPurchasesCard {
                header: CardHeader {
                    title: "Recent Purchases",
                    description: "Your most recent ticket purchases",
                },
                rows: catalog.purchases.iter().map(PurchaseRow::from).collect(),
            },
            statistics: StatisticsCard {
                header: CardHeader {
                    title: "Purchase Statistics",
                    description: "Overview of your ticket purchasing behavior",
                },
                stats: catalog.summary.cards(),
            },
        }
    }
}
