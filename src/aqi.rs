//! Air Quality Index classification
//!
//! Maps an AQI reading onto one of six severity bands. Labels, guidance text
//! and display colours all live in a single ordered table, [`AQI_CATEGORIES`],
//! so [`classify`] and [`severity_color`] always agree on the band.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity bands in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiBand {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthyForSensitiveGroups,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301 and above
    Hazardous,
}

impl AqiBand {
    /// Category record for this band
    #[must_use]
    pub fn category(self) -> &'static AqiCategory {
        &AQI_CATEGORIES[self as usize]
    }
}

impl fmt::Display for AqiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category().label)
    }
}

/// One row of the category table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AqiCategory {
    pub band: AqiBand,
    /// Inclusive lower bound
    pub lower_bound: u32,
    /// Inclusive upper bound, `None` for the open-ended last band
    pub upper_bound: Option<u32>,
    pub label: &'static str,
    /// 0 (Good) through 5 (Hazardous)
    pub severity_rank: u8,
    /// Health guidance shown next to the reading
    pub description: &'static str,
    /// `#RRGGBB` display colour
    pub color: &'static str,
}

impl AqiCategory {
    /// Whether a (clamped) reading falls inside this category
    #[must_use]
    pub fn contains(&self, aqi: f64) -> bool {
        let value = clamp_reading(aqi);
        let above_lower = self.lower_bound == 0 || value > f64::from(self.lower_bound - 1);
        let below_upper = self
            .upper_bound
            .is_none_or(|upper| value <= f64::from(upper));
        above_lower && below_upper
    }

    /// Format the bounds as e.g. `51-100` or `301+`
    #[must_use]
    pub fn format_range(&self) -> String {
        match self.upper_bound {
            Some(upper) => format!("{}-{}", self.lower_bound, upper),
            None => format!("{}+", self.lower_bound),
        }
    }
}

/// The six AQI categories, ordered from least to most severe
pub static AQI_CATEGORIES: [AqiCategory; 6] = [
    AqiCategory {
        band: AqiBand::Good,
        lower_bound: 0,
        upper_bound: Some(50),
        label: "Good",
        severity_rank: 0,
        description: "Air quality is satisfactory, and air pollution poses little or no risk.",
        color: "#00E400",
    },
    AqiCategory {
        band: AqiBand::Moderate,
        lower_bound: 51,
        upper_bound: Some(100),
        label: "Moderate",
        severity_rank: 1,
        description: "Air quality is acceptable. However, there may be a risk for some people.",
        color: "#FFFF00",
    },
    AqiCategory {
        band: AqiBand::UnhealthyForSensitiveGroups,
        lower_bound: 101,
        upper_bound: Some(150),
        label: "Unhealthy for Sensitive Groups",
        severity_rank: 2,
        description: "Members of sensitive groups may experience health effects.",
        color: "#FF7E00",
    },
    AqiCategory {
        band: AqiBand::Unhealthy,
        lower_bound: 151,
        upper_bound: Some(200),
        label: "Unhealthy",
        severity_rank: 3,
        description: "Everyone may begin to experience health effects.",
        color: "#FF0000",
    },
    AqiCategory {
        band: AqiBand::VeryUnhealthy,
        lower_bound: 201,
        upper_bound: Some(300),
        label: "Very Unhealthy",
        severity_rank: 4,
        description: "Health warnings of emergency conditions.",
        color: "#8F3F97",
    },
    AqiCategory {
        band: AqiBand::Hazardous,
        lower_bound: 301,
        upper_bound: None,
        label: "Hazardous",
        severity_rank: 5,
        description: "Health alert: everyone may experience more serious health effects.",
        color: "#7E0023",
    },
];

/// All categories in ascending severity
#[must_use]
pub fn categories() -> &'static [AqiCategory] {
    &AQI_CATEGORIES
}

// Negative readings and NaN count as zero.
fn clamp_reading(aqi: f64) -> f64 {
    aqi.max(0.0)
}

/// Classify an AQI reading.
///
/// Negative values are treated as 0. There is no upper clamp: anything above
/// 300 is [`AqiBand::Hazardous`].
#[must_use]
pub fn classify(aqi: f64) -> &'static AqiCategory {
    let value = clamp_reading(aqi);
    AQI_CATEGORIES
        .iter()
        .find(|category| {
            category
                .upper_bound
                .is_some_and(|upper| value <= f64::from(upper))
        })
        .unwrap_or(&AQI_CATEGORIES[AQI_CATEGORIES.len() - 1])
}

/// Display colour for an AQI reading, from the same table as [`classify`]
#[must_use]
pub fn severity_color(aqi: f64) -> &'static str {
    classify(aqi).color
}
