//! Synthetic current-conditions reading for a map location

use crate::Result;
use crate::forecast::ForecastGenerator;
use crate::models::{AirQualitySnapshot, Location, Pollutants, WeatherConditions};
use crate::random::{RandomSource, checked_draw};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Provenance string attached to every snapshot
pub const DATA_SOURCE: &str = "NASA Earth Observation (Simulated)";

/// Uniform value in `[offset, offset + span)`
fn scaled<S: RandomSource + ?Sized>(source: &mut S, span: f64, offset: f64) -> Result<f64> {
    Ok(checked_draw(source)? * span + offset)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build a snapshot for `location` at time `now`.
///
/// Draw order: AQI, the six pollutants, the four weather values, then the
/// forecast (which draws its own base AQI).
#[instrument(level = "debug", skip(source, location), fields(location = %location.name))]
pub fn generate_snapshot<S: RandomSource + ?Sized>(
    source: &mut S,
    location: Location,
    now: DateTime<Utc>,
) -> Result<AirQualitySnapshot> {
    // [20, 219]
    let aqi = scaled(source, 200.0, 20.0)?.floor() as u32;

    let pollutants = Pollutants {
        pm25: round_one_decimal(scaled(source, 50.0, 5.0)?),
        pm10: round_one_decimal(scaled(source, 80.0, 10.0)?),
        o3: round_one_decimal(scaled(source, 100.0, 20.0)?),
        no2: round_one_decimal(scaled(source, 60.0, 10.0)?),
        so2: round_one_decimal(scaled(source, 30.0, 5.0)?),
        co: round_one_decimal(scaled(source, 2.0, 0.5)?),
    };

    let weather = WeatherConditions {
        temperature_c: scaled(source, 30.0, 10.0)?.floor() as i32,
        humidity_percent: scaled(source, 40.0, 30.0)?.floor() as u8,
        wind_speed_ms: round_one_decimal(scaled(source, 15.0, 2.0)?),
        visibility_km: round_one_decimal(scaled(source, 15.0, 5.0)?),
    };

    let forecast = ForecastGenerator::generate(source, None)?.dated(now.date_naive());
    debug!("Generated snapshot with AQI {} at {}", aqi, location.format_coordinates());

    Ok(AirQualitySnapshot {
        location,
        timestamp: now,
        aqi,
        pollutants,
        weather,
        forecast,
        data_source: DATA_SOURCE.to_string(),
        last_updated: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantSource, SeededRandom, SequenceSource};
    use chrono::{NaiveDate, TimeZone};
    use proptest::prelude::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap()
    }

    fn london() -> Location {
        Location::new(51.5074, -0.1278, "London").unwrap()
    }

    #[test]
    fn test_snapshot_from_constant_draws() {
        let snapshot = generate_snapshot(&mut ConstantSource(0.5), london(), noon()).unwrap();

        assert_eq!(snapshot.aqi, 120);
        assert_eq!(snapshot.category().label, "Unhealthy for Sensitive Groups");
        assert_eq!(snapshot.pollutants.pm25, 30.0);
        assert_eq!(snapshot.pollutants.pm10, 50.0);
        assert_eq!(snapshot.pollutants.o3, 70.0);
        assert_eq!(snapshot.pollutants.no2, 40.0);
        assert_eq!(snapshot.pollutants.so2, 20.0);
        assert_eq!(snapshot.pollutants.co, 1.5);
        assert_eq!(snapshot.weather.temperature_c, 25);
        assert_eq!(snapshot.weather.humidity_percent, 50);
        assert_eq!(snapshot.weather.wind_speed_ms, 9.5);
        assert_eq!(snapshot.weather.visibility_km, 12.5);

        assert_eq!(snapshot.forecast.len(), 7);
        assert_eq!(snapshot.forecast[0].date, NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
        assert_eq!(snapshot.forecast[0].aqi, 80);
        assert_eq!(snapshot.forecast[6].date, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap());
        assert_eq!(snapshot.forecast[6].aqi, 92);

        assert_eq!(snapshot.data_source, DATA_SOURCE);
        assert_eq!(snapshot.timestamp, noon());
        assert_eq!(snapshot.last_updated, noon());
        assert_eq!(snapshot.location.name, "London");
    }

    #[test]
    fn test_snapshot_needs_thirty_three_draws() {
        // 1 AQI + 6 pollutants + 4 weather + 1 forecast base + 21 forecast
        let mut source = SequenceSource::new(vec![0.3; 32]);
        let err = generate_snapshot(&mut source, london(), noon()).unwrap_err();
        assert!(matches!(err, crate::EcoSpaceError::RandomSource { .. }));

        let mut source = SequenceSource::new(vec![0.3; 33]);
        assert!(generate_snapshot(&mut source, london(), noon()).is_ok());
        assert_eq!(source.consumed(), 33);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_snapshot_serializes_with_forecast_rows() {
        let snapshot = generate_snapshot(&mut SeededRandom::new(7), london(), noon()).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["forecast"].as_array().unwrap().len(), 7);
        assert_eq!(value["forecast"][0]["date"], "2025-10-04");
        assert_eq!(value["data_source"], DATA_SOURCE);
    }

    proptest! {
        /// Property: every synthesised field stays inside its range
        #[test]
        fn test_snapshot_ranges(seed in any::<u64>()) {
            let snapshot = generate_snapshot(&mut SeededRandom::new(seed), london(), noon()).unwrap();
            prop_assert!((20..=219).contains(&snapshot.aqi));
            prop_assert!((5.0..=55.0).contains(&snapshot.pollutants.pm25));
            prop_assert!((10.0..=90.0).contains(&snapshot.pollutants.pm10));
            prop_assert!((0.5..=2.5).contains(&snapshot.pollutants.co));
            prop_assert!((10..=39).contains(&snapshot.weather.temperature_c));
            prop_assert!((30..=69).contains(&snapshot.weather.humidity_percent));
            for row in &snapshot.forecast {
                prop_assert!((10..=300).contains(&row.aqi));
            }
        }
    }
}
