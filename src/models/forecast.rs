//! Forecast series model and trend analysis

use crate::aqi::{self, AqiCategory};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of days in every forecast series
pub const FORECAST_DAYS: usize = 7;

/// AQI change below which the outlook counts as stable
const STABLE_TREND_THRESHOLD: f64 = 5.0;

/// One day of a synthetic forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Days from today (0..=6)
    pub day_offset: u8,
    /// Air Quality Index, within [10, 300]
    pub aqi: f64,
    /// PM2.5 in µg/m³, within [5, 50]
    pub pm25: f64,
    /// Model confidence in percent, within [85, 94]
    pub confidence_percent: u8,
}

impl ForecastPoint {
    /// Category of this day's AQI
    #[must_use]
    pub fn category(&self) -> &'static AqiCategory {
        aqi::classify(self.aqi)
    }

    /// AQI rounded to the nearest whole number
    #[must_use]
    pub fn rounded_aqi(&self) -> u32 {
        // aqi is clamped to [10, 300] so the cast is lossless
        self.aqi.round() as u32
    }

    #[must_use]
    pub fn format_aqi(&self) -> String {
        format!("{} AQI", self.rounded_aqi())
    }

    #[must_use]
    pub fn format_pm25(&self) -> String {
        format!("{:.1} µg/m³", self.pm25)
    }
}

/// Forecast row tied to a calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedForecastPoint {
    pub date: NaiveDate,
    pub aqi: u32,
    pub pm25: f64,
    pub confidence: u8,
}

/// Exactly seven forecast points ordered by day offset
// Only built by the generator, never read back, so the seven-point
// invariant cannot be bypassed through serde.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastSeries {
    points: [ForecastPoint; FORECAST_DAYS],
}

impl ForecastSeries {
    pub(crate) fn new(points: [ForecastPoint; FORECAST_DAYS]) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn get(&self, day_offset: usize) -> Option<&ForecastPoint> {
        self.points.get(day_offset)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }

    /// Day 0
    #[must_use]
    pub fn today(&self) -> &ForecastPoint {
        &self.points[0]
    }

    /// Day 6
    #[must_use]
    pub fn last_day(&self) -> &ForecastPoint {
        &self.points[FORECAST_DAYS - 1]
    }

    /// Day with the highest AQI (earliest on ties)
    #[must_use]
    pub fn peak(&self) -> &ForecastPoint {
        self.points
            .iter()
            .fold(&self.points[0], |peak, point| {
                if point.aqi > peak.aqi { point } else { peak }
            })
    }

    /// Direction of travel between today and the last day
    #[must_use]
    pub fn trend(&self) -> Trend {
        Trend::between(self.today().aqi, self.last_day().aqi)
    }

    /// Attach calendar dates starting at `start` for day 0
    #[must_use]
    pub fn dated(&self, start: NaiveDate) -> Vec<DatedForecastPoint> {
        self.points
            .iter()
            .map(|point| DatedForecastPoint {
                date: start + Duration::days(i64::from(point.day_offset)),
                aqi: point.rounded_aqi(),
                pm25: point.pm25,
                confidence: point.confidence_percent,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Expected change in air quality over the forecast window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Stable,
    /// AQI rising
    Worsening,
    /// AQI falling
    Improving,
}

impl Trend {
    /// Classify the change from `current` to `future` AQI
    #[must_use]
    pub fn between(current: f64, future: f64) -> Self {
        let delta = future - current;
        if delta.abs() < STABLE_TREND_THRESHOLD {
            Trend::Stable
        } else if delta > 0.0 {
            Trend::Worsening
        } else {
            Trend::Improving
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Trend::Stable => "Air quality is expected to remain stable",
            Trend::Worsening => "Air quality is expected to worsen",
            Trend::Improving => "Air quality is expected to improve",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trend::Stable => "stable",
            Trend::Worsening => "worsening",
            Trend::Improving => "improving",
        };
        f.write_str(name)
    }
}
