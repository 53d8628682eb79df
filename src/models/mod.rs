//! Data models for `EcoSpace`
//!
//! - Location: map coordinates picked by the user
//! - Forecast: seven-day series, dated rows and trend
//! - Snapshot: current pollutant and weather reading

pub mod forecast;
pub mod location;
pub mod snapshot;

pub use forecast::{DatedForecastPoint, FORECAST_DAYS, ForecastPoint, ForecastSeries, Trend};
pub use location::Location;
pub use snapshot::{AirQualitySnapshot, Pollutants, WeatherConditions};
