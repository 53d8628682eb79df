//! Current-conditions reading for a location

use super::{DatedForecastPoint, Location};
use crate::aqi::{self, AqiCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pollutant concentrations, rounded to one decimal place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    /// µg/m³
    pub pm25: f64,
    /// µg/m³
    pub pm10: f64,
    /// Ozone, ppb
    pub o3: f64,
    /// Nitrogen dioxide, ppb
    pub no2: f64,
    /// Sulphur dioxide, ppb
    pub so2: f64,
    /// Carbon monoxide, ppm
    pub co: f64,
}

/// Weather at the time of the reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub temperature_c: i32,
    pub humidity_percent: u8,
    pub wind_speed_ms: f64,
    pub visibility_km: f64,
}

impl WeatherConditions {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature_c)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed_ms)
    }
}

/// Synthetic air-quality reading with its seven-day outlook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySnapshot {
    pub location: Location,
    pub timestamp: DateTime<Utc>,
    pub aqi: u32,
    pub pollutants: Pollutants,
    pub weather: WeatherConditions,
    pub forecast: Vec<DatedForecastPoint>,
    pub data_source: String,
    pub last_updated: DateTime<Utc>,
}

impl AirQualitySnapshot {
    /// Category of the current reading
    #[must_use]
    pub fn category(&self) -> &'static AqiCategory {
        aqi::classify(f64::from(self.aqi))
    }
}
