//! Synthetic seven-day air quality forecast
//!
//! The forecast is a random walk around a base AQI with a steady upward drift
//! of two points per day. PM2.5 is derived from each day's AQI plus its own
//! noise. Every value comes from the injected [`RandomSource`], so a fixed
//! draw sequence always reproduces the same series.

use crate::models::{FORECAST_DAYS, ForecastPoint, ForecastSeries};
use crate::random::{RandomSource, checked_draw};
use crate::{EcoSpaceError, Result};
use tracing::{debug, instrument, warn};

/// Published AQI range of every forecast point
pub const AQI_MIN: f64 = 10.0;
pub const AQI_MAX: f64 = 300.0;

/// Published PM2.5 range of every forecast point
pub const PM25_MIN: f64 = 5.0;
pub const PM25_MAX: f64 = 50.0;

/// Lowest confidence percentage; the highest is this plus 9
pub const CONFIDENCE_FLOOR: u8 = 85;

const DAILY_DRIFT: f64 = 2.0;
const AQI_NOISE_SPAN: f64 = 20.0;
const PM25_NOISE_SPAN: f64 = 10.0;
const PM25_PER_AQI: f64 = 0.3;
const BASE_AQI_SPAN: f64 = 100.0;
const BASE_AQI_OFFSET: f64 = 30.0;

/// Draws consumed per day: AQI noise, PM2.5 noise, confidence
pub const DRAWS_PER_DAY: usize = 3;

/// Forecast generation service
pub struct ForecastGenerator;

impl ForecastGenerator {
    /// Generate a seven-day forecast.
    ///
    /// When `base_aqi` is `None` the base is drawn as an integer in
    /// `[30, 129]`. An override outside the published AQI range is accepted
    /// and corrected by the per-day clamp. Errors from `source` propagate
    /// unchanged and no partial series is returned.
    #[instrument(level = "debug", skip(source))]
    pub fn generate<S: RandomSource + ?Sized>(
        source: &mut S,
        base_aqi: Option<f64>,
    ) -> Result<ForecastSeries> {
        let base = match base_aqi {
            Some(value) if !value.is_finite() => {
                return Err(EcoSpaceError::validation(format!(
                    "base AQI must be a finite number, got {value}"
                )));
            }
            Some(value) => {
                if !(AQI_MIN..=AQI_MAX).contains(&value) {
                    warn!(
                        "Base AQI {} is outside [{}, {}]; daily values will be clamped",
                        value, AQI_MIN, AQI_MAX
                    );
                }
                value
            }
            None => (checked_draw(source)? * BASE_AQI_SPAN).floor() + BASE_AQI_OFFSET,
        };
        debug!("Generating forecast from base AQI {}", base);

        let mut points = [ForecastPoint {
            day_offset: 0,
            aqi: AQI_MIN,
            pm25: PM25_MIN,
            confidence_percent: CONFIDENCE_FLOOR,
        }; FORECAST_DAYS];

        for (day_offset, slot) in (0u8..).zip(points.iter_mut()) {
            let variation = (checked_draw(source)? - 0.5) * AQI_NOISE_SPAN;
            let raw_aqi = base + variation + f64::from(day_offset) * DAILY_DRIFT;
            let aqi = raw_aqi.clamp(AQI_MIN, AQI_MAX);

            let pm25_noise = (checked_draw(source)? - 0.5) * PM25_NOISE_SPAN;
            let pm25 = (aqi * PM25_PER_AQI + pm25_noise).clamp(PM25_MIN, PM25_MAX);

            // draw < 1.0, so the offset is at most 9
            let confidence_offset = (checked_draw(source)? * 10.0).floor() as u8;

            *slot = ForecastPoint {
                day_offset,
                aqi,
                pm25,
                confidence_percent: CONFIDENCE_FLOOR + confidence_offset,
            };
        }

        Ok(ForecastSeries::new(points))
    }
}
