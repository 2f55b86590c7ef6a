//! Configuration management for the Plinko service
//!
//! Defaults, optional TOML file, `PLINKO_*` environment overrides, then
//! validation. Every section is `#[serde(default)]`, so a config file only
//! needs the values it changes.

use crate::errors::{ConfigurationError, PlinkoResult};
use crate::games::paths::MAX_SUPPORTED_ROWS;
use crate::games::payout::MultiplierTable;
use crate::games::types::GameLimits;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlinkoConfig {
    pub server: ServerConfig,
    pub game: GameConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

/// Game limits, generator seed and multiplier table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_rows: u32,
    pub max_rows: u32,
    pub min_difficulty: u32,
    pub max_difficulty: u32,
    pub min_bet: f64,
    pub max_bet: f64,
    /// Fixed seed for reproducible runs; OS entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    pub multipliers: MultiplierTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        let limits = GameLimits::default();
        Self {
            min_rows: limits.min_rows,
            max_rows: limits.max_rows,
            min_difficulty: limits.min_difficulty,
            max_difficulty: limits.max_difficulty,
            min_bet: limits.min_bet,
            max_bet: limits.max_bet,
            rng_seed: None,
            multipliers: MultiplierTable::standard(),
        }
    }
}

impl GameConfig {
    pub fn limits(&self) -> GameLimits {
        GameLimits {
            min_rows: self.min_rows,
            max_rows: self.max_rows,
            min_difficulty: self.min_difficulty,
            max_difficulty: self.max_difficulty,
            min_bet: self.min_bet,
            max_bet: self.max_bet,
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> PlinkoResult<PlinkoConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            PlinkoConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    /// Load configuration from TOML file
    fn load_from_file(&self, path: &str) -> Result<PlinkoConfig, ConfigurationError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut PlinkoConfig) -> Result<(), ConfigurationError> {
        if let Ok(host) = env::var("PLINKO_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_env("PLINKO_PORT", "Invalid port number")? {
            config.server.port = port;
        }
        if let Some(timeout) = parse_env("PLINKO_REQUEST_TIMEOUT", "Invalid timeout value")? {
            config.server.request_timeout_secs = timeout;
        }
        if let Some(seed) = parse_env("PLINKO_RNG_SEED", "Seed must be an unsigned integer")? {
            config.game.rng_seed = Some(seed);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self, config: &PlinkoConfig) -> Result<(), ConfigurationError> {
        let server = &config.server;
        if server.host.parse::<IpAddr>().is_err() {
            return Err(invalid("server.host", &server.host, "Host must be an IP address"));
        }
        if server.port == 0 {
            return Err(invalid("server.port", "0", "Port cannot be zero"));
        }
        if server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "0", "Timeout cannot be zero"));
        }

        let game = &config.game;
        if game.min_rows > game.max_rows {
            return Err(invalid(
                "game.min_rows",
                &game.min_rows.to_string(),
                "Minimum rows cannot exceed maximum rows",
            ));
        }
        if game.max_rows > MAX_SUPPORTED_ROWS {
            return Err(invalid(
                "game.max_rows",
                &game.max_rows.to_string(),
                &format!("At most {} rows are supported", MAX_SUPPORTED_ROWS),
            ));
        }
        if game.min_difficulty > game.max_difficulty {
            return Err(invalid(
                "game.min_difficulty",
                &game.min_difficulty.to_string(),
                "Minimum difficulty cannot exceed maximum difficulty",
            ));
        }
        if !game.min_bet.is_finite() || game.min_bet <= 0.0 {
            return Err(invalid("game.min_bet", &game.min_bet.to_string(), "Minimum bet must be positive"));
        }
        if !game.max_bet.is_finite() || game.max_bet < game.min_bet {
            return Err(invalid(
                "game.max_bet",
                &game.max_bet.to_string(),
                "Maximum bet must be at least the minimum bet",
            ));
        }

        game.multipliers
            .validate(game.min_rows, game.max_rows, game.max_difficulty)
    }

    /// Save configuration to file
    pub fn save(&self, config: &PlinkoConfig, path: &str) -> PlinkoResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

fn parse_env<T: FromStr>(name: &str, reason: &str) -> Result<Option<T>, ConfigurationError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| invalid(name, &value, reason)),
        Err(_) => Ok(None),
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> PlinkoResult<()> {
    let config = PlinkoConfig::default();
    let loader = ConfigLoader::new();
    loader.save(&config, path)
}
