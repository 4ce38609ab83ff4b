//! Static dashboard data
//!
//! Everything the attendee dashboard shows is defined at compile time in
//! [`sample`]. [`Catalog`] bundles it and checks the assumptions the views
//! rely on.

pub mod sample;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::map::{EventPin, MapError};
use crate::report::SummaryStats;

/// Date format used by purchase records
pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors found while validating the catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Purchase {id} has an invalid date '{date}'")]
    InvalidDate { id: u32, date: String },

    #[error("Purchase {id} is listed out of order (expected most recent first)")]
    OutOfOrder { id: u32 },

    #[error("Duplicate purchase id {0}")]
    DuplicatePurchase(u32),

    #[error("Duplicate month '{0}' in spending series")]
    DuplicateMonth(String),

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Total ticket spend for one month
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MonthlySpend {
    pub month: &'static str,
    pub amount: u32,
}

impl MonthlySpend {
    pub const fn new(month: &'static str, amount: u32) -> Self {
        Self { month, amount }
    }
}

/// A ticket purchase
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Purchase {
    pub id: u32,
    pub event: &'static str,
    /// ISO date, shown verbatim
    pub date: &'static str,
    /// Whole dollars
    pub amount: u32,
}

impl Purchase {
    pub const fn new(id: u32, event: &'static str, date: &'static str, amount: u32) -> Self {
        Self {
            id,
            event,
            date,
            amount,
        }
    }

    pub fn purchased_on(&self) -> Result<NaiveDate, CatalogError> {
        NaiveDate::parse_from_str(self.date, PURCHASE_DATE_FORMAT).map_err(|_| {
            CatalogError::InvalidDate {
                id: self.id,
                date: self.date.to_string(),
            }
        })
    }
}

/// All data behind the dashboard views
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Catalog {
    pub monthly_spend: &'static [MonthlySpend],
    pub purchases: &'static [Purchase],
    pub pins: &'static [EventPin],
    pub summary: SummaryStats,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

impl Catalog {
    /// The built-in data set
    pub fn sample() -> Self {
        Self {
            monthly_spend: &sample::MONTHLY_SPEND,
            purchases: &sample::PURCHASES,
            pins: &sample::EVENT_PINS,
            summary: sample::SUMMARY,
        }
    }

    /// Check ids, dates, ordering and coordinates
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut months = HashSet::new();
        for entry in self.monthly_spend {
            if !months.insert(entry.month) {
                return Err(CatalogError::DuplicateMonth(entry.month.to_string()));
            }
        }

        let mut ids = HashSet::new();
        let mut previous: Option<NaiveDate> = None;
        for purchase in self.purchases {
            if !ids.insert(purchase.id) {
                return Err(CatalogError::DuplicatePurchase(purchase.id));
            }
            let date = purchase.purchased_on()?;
            if previous.map_or(false, |prev| date > prev) {
                return Err(CatalogError::OutOfOrder { id: purchase.id });
            }
            previous = Some(date);
        }

        let mut pin_ids = HashSet::new();
        for pin in self.pins {
            if !pin_ids.insert(pin.id) {
                return Err(MapError::DuplicatePin(pin.id).into());
            }
            pin.position.validate()?;
        }

        tracing::debug!(
            months = self.monthly_spend.len(),
            purchases = self.purchases.len(),
            pins = self.pins.len(),
            "Catalog validated"
        );
        Ok(())
    }

    /// Pin by id
    pub fn pin(&self, id: u32) -> Option<&EventPin> {
        self.pins.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Category;

    #[test]
    fn test_sample_is_valid() {
        let catalog = Catalog::sample();
        catalog.validate().unwrap();
        assert_eq!(catalog.monthly_spend.len(), 6);
        assert_eq!(catalog.purchases.len(), 3);
        assert_eq!(catalog.pins.len(), 3);
    }

    #[test]
    fn test_purchase_dates() {
        let date = sample::PURCHASES[0].purchased_on().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());

        let bad = Purchase::new(9, "Broken", "15/06/2023", 10);
        assert_eq!(
            bad.purchased_on().unwrap_err(),
            CatalogError::InvalidDate {
                id: 9,
                date: "15/06/2023".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_order_purchases_rejected() {
        static PURCHASES: [Purchase; 2] = [
            Purchase::new(1, "Older", "2023-01-01", 10),
            Purchase::new(2, "Newer", "2023-02-01", 10),
        ];
        let catalog = Catalog {
            purchases: &PURCHASES,
            ..Catalog::sample()
        };
        assert_eq!(catalog.validate().unwrap_err(), CatalogError::OutOfOrder { id: 2 });
    }

    #[test]
    fn test_duplicate_month_rejected() {
        static SPEND: [MonthlySpend; 2] = [MonthlySpend::new("Jan", 1), MonthlySpend::new("Jan", 2)];
        let catalog = Catalog {
            monthly_spend: &SPEND,
            ..Catalog::sample()
        };
        assert_eq!(
            catalog.validate().unwrap_err(),
            CatalogError::DuplicateMonth("Jan".to_string())
        );
    }

    #[test]
    fn test_invalid_pin_coordinate_rejected() {
        static PINS: [EventPin; 1] = [EventPin::new(1, "Nowhere", 95.0, 0.0, Category::Music)];
        let catalog = Catalog {
            pins: &PINS,
            ..Catalog::sample()
        };
        assert!(matches!(
            catalog.validate().unwrap_err(),
            CatalogError::Map(MapError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_pin_lookup() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.pin(2).unwrap().name, "Food & Wine Expo");
        assert!(catalog.pin(42).is_none());
    }
}
