//! Configuration management for `EcoSpace`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::EcoSpaceError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EcoSpaceConfig {
    /// Forecast generation settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Forecast generation settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForecastConfig {
    /// Fixed base AQI instead of a drawn one
    pub base_aqi: Option<f64>,
    /// Seed for reproducible output; unseeded runs use thread entropy
    pub seed: Option<u64>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Name used for a location given only by coordinates
    #[serde(default = "default_location_name")]
    pub location_name: String,
    /// Output format (text or json)
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_location_name() -> String {
    "Selected Location".to_string()
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location_name: default_location_name(),
            output_format: default_output_format(),
        }
    }
}

impl EcoSpaceConfig {
    /// Load configuration from the given file (or the default location)
    /// and `ECOSPACE_*` environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // ECOSPACE_FORECAST__SEED=7 -> forecast.seed
        builder = builder.add_source(
            Environment::with_prefix("ECOSPACE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: EcoSpaceConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ecospace").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.location_name.is_empty() {
            self.defaults.location_name = default_location_name();
        }
        if self.defaults.output_format.is_empty() {
            self.defaults.output_format = default_output_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_forecast()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_forecast(&self) -> Result<()> {
        if let Some(base_aqi) = self.forecast.base_aqi {
            // out-of-range values are clamped per day by the generator
            if !base_aqi.is_finite() {
                return Err(EcoSpaceError::config(format!(
                    "Forecast base AQI must be a finite number, got {base_aqi}"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(EcoSpaceError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(EcoSpaceError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_output_formats = ["text", "json"];
        if !valid_output_formats.contains(&self.defaults.output_format.as_str()) {
            return Err(EcoSpaceError::config(format!(
                "Invalid output format '{}'. Must be one of: {}",
                self.defaults.output_format,
                valid_output_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Loading reads ECOSPACE_* variables, so loads must not overlap with
    // the test that sets them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn missing_config_path() -> PathBuf {
        env::temp_dir().join(format!("ecospace-no-such-config-{}.toml", std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = EcoSpaceConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.defaults.location_name, "Selected Location");
        assert_eq!(config.defaults.output_format, "text");
        assert!(config.forecast.base_aqi.is_none());
        assert!(config.forecast.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = EcoSpaceConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_output_format() {
        let mut config = EcoSpaceConfig::default();
        config.defaults.output_format = "yaml".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid output format"));
    }

    #[test]
    fn test_config_validation_base_aqi() {
        let mut config = EcoSpaceConfig::default();
        config.forecast.base_aqi = Some(f64::NAN);
        assert!(config.validate().is_err());

        config.forecast.base_aqi = Some(f64::INFINITY);
        assert!(config.validate().is_err());

        // outside the clamp range is fine either way, same as --base-aqi
        config.forecast.base_aqi = Some(-40.0);
        assert!(config.validate().is_ok());
        config.forecast.base_aqi = Some(450.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_defaults_fills_empty_strings() {
        let mut config = EcoSpaceConfig::default();
        config.logging.level.clear();
        config.defaults.location_name.clear();
        config.apply_defaults();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.location_name, "Selected Location");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "ecospace-config-test-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[forecast]\nbase_aqi = 75.0\nseed = 11\n\n[logging]\nlevel = \"debug\"\n\n[defaults]\noutput_format = \"json\""
        )
        .unwrap();
        drop(file);

        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let config = EcoSpaceConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.forecast.base_aqi, Some(75.0));
        assert_eq!(config.forecast.seed, Some(11));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.defaults.output_format, "json");
        assert_eq!(config.defaults.location_name, "Selected Location");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "ecospace-config-invalid-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let result = EcoSpaceConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_environment_variable_override() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        // SAFETY: Test environment, access serialized by ENV_LOCK
        unsafe {
            env::set_var("ECOSPACE_FORECAST__SEED", "77");
            env::set_var("ECOSPACE_LOGGING__LEVEL", "warn");
            // read by the CLI's --seed flag, must not upset the config loader
            env::set_var("ECOSPACE_SEED", "5");
        }

        let result = EcoSpaceConfig::load_from_path(Some(missing_config_path()));

        // SAFETY: Test cleanup
        unsafe {
            env::remove_var("ECOSPACE_FORECAST__SEED");
            env::remove_var("ECOSPACE_LOGGING__LEVEL");
            env::remove_var("ECOSPACE_SEED");
        }

        let config = result.unwrap();
        assert_eq!(config.forecast.seed, Some(77));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.forecast.base_aqi.is_none());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let config = EcoSpaceConfig::load_from_path(Some(missing_config_path())).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.output_format, "text");
        assert!(config.forecast.seed.is_none());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = EcoSpaceConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("ecospace"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
