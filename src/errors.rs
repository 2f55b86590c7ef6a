//! Error types for the Plinko service
//!
//! Input problems (`ValidationError`) are the caller's fault and are reported
//! back verbatim. Everything else indicates a configuration or build-order bug
//! and is surfaced to clients only as a generic failure.

use thiserror::Error;

/// Root error type for all Plinko operations
#[derive(Debug, Error)]
pub enum PlinkoError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Rejected play requests. Display text is what the client sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid rows. Value must be between {min} and {max}.")]
    InvalidRows { min: u32, max: u32 },

    #[error("Invalid difficulty. Value must be between {min} and {max}.")]
    InvalidDifficulty { min: u32, max: u32 },

    #[error("Invalid bet. Value must be between {min} and {max}.")]
    InvalidBet { min: f64, max: f64 },
}

/// Internal consistency failures of the game core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("Row count {rows} is not cached")]
    RowsNotCached { rows: u32 },

    #[error("No multiplier for difficulty {difficulty}, rows {rows}, bucket {bucket}")]
    InvalidCombination { difficulty: u32, rows: u32, bucket: u8 },

    #[error("Invalid row range {min}..={max} (supported maximum is {limit})")]
    InvalidRowRange { min: u32, max: u32, limit: u32 },

    #[error("Random source unavailable: {0}")]
    RngUnavailable(String),
}

// Convenience type alias for Results
pub type PlinkoResult<T> = Result<T, PlinkoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::InvalidRows { min: 8, max: 16 };
        assert_eq!(err.to_string(), "Invalid rows. Value must be between 8 and 16.");

        let err = ValidationError::InvalidBet { min: 0.1, max: 1000.0 };
        assert_eq!(err.to_string(), "Invalid bet. Value must be between 0.1 and 1000.");
    }

    #[test]
    fn test_error_conversion() {
        let plinko_error: PlinkoError = GameError::RowsNotCached { rows: 30 }.into();

        match plinko_error {
            PlinkoError::Game(GameError::RowsNotCached { rows }) => assert_eq!(rows, 30),
            _ => panic!("Expected game error"),
        }
    }

    #[test]
    fn test_error_source() {
        let config_error = ConfigurationError::ValidationFailed("test".to_string());
        let plinko_error = PlinkoError::Configuration(config_error);

        assert!(plinko_error.to_string().contains("Configuration error"));
        assert!(plinko_error.source().is_some());
    }
}
