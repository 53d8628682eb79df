//! Location model for geographic coordinates and metadata

use crate::{EcoSpaceError, Result};
use serde::{Deserialize, Serialize};

/// A point picked on the map
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name (city, region, etc.)
    pub name: String,
}

impl Location {
    /// Create a new location, rejecting coordinates off the globe
    pub fn new(latitude: f64, longitude: f64, name: impl Into<String>) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(EcoSpaceError::validation(format!(
                "latitude {latitude} must be between -90 and 90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(EcoSpaceError::validation(format!(
                "longitude {longitude} must be between -180 and 180"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
            name: name.into(),
        })
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
