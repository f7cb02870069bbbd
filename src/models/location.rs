//! Geographic coordinates

use serde::{Deserialize, Serialize};

use crate::DashboardError;

/// A point on the map in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Center of the contiguous United States
pub const US_CENTER: Coordinates = Coordinates {
    latitude: 39.8283,
    longitude: -98.5795,
};

impl Coordinates {
    /// Create coordinates without range checks
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create coordinates, rejecting values outside the valid ranges
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, DashboardError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DashboardError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DashboardError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Format as `lat, lon` with four decimals
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
