//! Coordinates and event pins

use serde::{Deserialize, Serialize};

use super::{Category, MapError};

/// A WGS84 coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate without range checks (for `const` data)
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a coordinate, rejecting values outside the globe
    pub fn checked(lat: f64, lng: f64) -> Result<Self, MapError> {
        let point = Self { lat, lng };
        point.validate()?;
        Ok(point)
    }

    /// Check latitude is within [-90, 90] and longitude within [-180, 180]
    pub fn validate(&self) -> Result<(), MapError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(MapError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            });
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(MapError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            });
        }
        Ok(())
    }

    /// `[lat, lng]` pair in the order Leaflet expects
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// An event placed on the map
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EventPin {
    pub id: u32,
    pub name: &'static str,
    pub position: LatLng,
    pub category: Category,
}

impl EventPin {
    pub const fn new(id: u32, name: &'static str, lat: f64, lng: f64, category: Category) -> Self {
        Self {
            id,
            name,
            position: LatLng::new(lat, lng),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_accepts_edges() {
        assert!(LatLng::checked(90.0, 180.0).is_ok());
        assert!(LatLng::checked(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert!(matches!(
            LatLng::checked(91.0, 0.0),
            Err(MapError::InvalidCoordinate { .. })
        ));
        assert!(LatLng::checked(0.0, -180.5).is_err());
        assert!(LatLng::checked(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_as_pair_is_lat_first() {
        let pin = EventPin::new(7, "Harbour Jazz", -4.0435, 39.6682, Category::Music);
        assert_eq!(pin.position.as_pair(), [-4.0435, 39.6682]);
    }
}
