use crate::games::paths::Bucket;
use serde::{Deserialize, Serialize};

/// Request to drop one ball.
///
/// Fields are loosely typed on the wire so that a missing or out-of-range
/// value is reported as the matching validation error instead of a decoding
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet: Option<f64>,
}

impl PlayRequest {
    pub fn new(rows: u32, difficulty_level: u32, bet: f64) -> Self {
        Self {
            rows: Some(rows as f64),
            difficulty_level: Some(difficulty_level as f64),
            bet: Some(bet),
        }
    }
}

/// A request that passed validation against the configured limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedPlay {
    pub rows: u32,
    pub difficulty: u32,
    pub bet: f64,
}

/// Result of one drop, returned to the caller and then discarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub win: f64,
    pub path: Vec<Bucket>,
    pub final_location: Bucket,
    pub multiplier: f64,
}

/// Accepted ranges for play requests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLimits {
    pub min_rows: u32,
    pub max_rows: u32,
    pub min_difficulty: u32,
    pub max_difficulty: u32,
    pub min_bet: f64,
    pub max_bet: f64,
}

impl Default for GameLimits {
    fn default() -> Self {
        Self {
            min_rows: 8,
            max_rows: 16,
            min_difficulty: 0,
            max_difficulty: 2,
            min_bet: 0.1,
            max_bet: 1000.0,
        }
    }
}
