//! `EcoSpace` - Air quality classification and synthetic forecasts
//!
//! This library provides the domain logic behind the EcoSpace dashboard:
//! AQI category lookup, seven-day forecast generation and current-conditions
//! snapshots, all driven by an injectable random source.

pub mod aqi;
pub mod config;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod models;
pub mod random;
pub mod snapshot;

// Re-export core types for public API
pub use aqi::{AQI_CATEGORIES, AqiBand, AqiCategory, categories, classify, severity_color};
pub use config::EcoSpaceConfig;
pub use error::EcoSpaceError;
pub use forecast::ForecastGenerator;
pub use models::{
    AirQualitySnapshot, DatedForecastPoint, ForecastPoint, ForecastSeries, Location, Pollutants,
    Trend, WeatherConditions,
};
pub use random::{ConstantSource, RandomSource, SeededRandom, SequenceSource, ThreadRandom};
pub use snapshot::generate_snapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, EcoSpaceError>;
