//! API Response Models
//!
//! JSON bodies for the read-only endpoints. Play requests and outcomes live
//! in `games::types`.

use crate::games::types::GameLimits;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Accepted request ranges and the difficulty tiers they map to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub version: String,
    pub limits: GameLimits,
    /// Tier names indexed by `difficultyLevel`
    pub difficulties: Vec<String>,
}
