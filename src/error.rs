//! Error types and handling for `EcoSpace`

use thiserror::Error;

/// Main error type for the `EcoSpace` library
#[derive(Error, Debug)]
pub enum EcoSpaceError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The injected random source failed or produced an unusable draw
    #[error("Random source error: {message}")]
    RandomSource { message: String },
}

impl EcoSpaceError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new random source error
    pub fn random_source<S: Into<String>>(message: S) -> Self {
        Self::RandomSource {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EcoSpaceError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            EcoSpaceError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            EcoSpaceError::RandomSource { .. } => {
                "Unable to generate data: the random source could not supply enough values."
                    .to_string()
            }
        }
    }
}
