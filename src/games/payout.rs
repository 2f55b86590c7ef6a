//! Multiplier table and payout resolution

use crate::errors::{ConfigurationError, GameError};
use crate::games::paths::Bucket;
use serde::{Deserialize, Serialize};

/// Multipliers for one difficulty tier; `rows[i]` is the board with
/// `min_rows + i` rows and holds one multiplier per bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    pub name: String,
    pub rows: Vec<Vec<f64>>,
}

/// difficulty -> row count -> bucket -> multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTable {
    /// Row count of the first entry in every tier
    pub min_rows: u32,
    pub tiers: Vec<DifficultyTier>,
}

const STANDARD_MIN_ROWS: u32 = 8;

const LOW: [&[f64]; 9] = [
    &[5.6, 2.1, 1.1, 1.0, 0.5, 1.0, 1.1, 2.1, 5.6],
    &[5.6, 2.0, 1.6, 1.0, 0.7, 0.7, 1.0, 1.6, 2.0, 5.6],
    &[8.9, 3.0, 1.4, 1.1, 1.0, 0.5, 1.0, 1.1, 1.4, 3.0, 8.9],
    &[8.4, 3.0, 1.9, 1.3, 1.0, 0.7, 0.7, 1.0, 1.3, 1.9, 3.0, 8.4],
    &[10.0, 3.0, 1.6, 1.4, 1.1, 1.0, 0.5, 1.0, 1.1, 1.4, 1.6, 3.0, 10.0],
    &[8.1, 4.0, 3.0, 1.9, 1.2, 0.9, 0.7, 0.7, 0.9, 1.2, 1.9, 3.0, 4.0, 8.1],
    &[7.1, 4.0, 1.9, 1.4, 1.3, 1.1, 1.0, 0.5, 1.0, 1.1, 1.3, 1.4, 1.9, 4.0, 7.1],
    &[15.0, 8.0, 3.0, 2.0, 1.5, 1.1, 1.0, 0.7, 0.7, 1.0, 1.1, 1.5, 2.0, 3.0, 8.0, 15.0],
    &[16.0, 9.0, 2.0, 1.4, 1.4, 1.2, 1.1, 1.0, 0.5, 1.0, 1.1, 1.2, 1.4, 1.4, 2.0, 9.0, 16.0],
];

const MEDIUM: [&[f64]; 9] = [
    &[13.0, 3.0, 1.3, 0.7, 0.4, 0.7, 1.3, 3.0, 13.0],
    &[18.0, 4.0, 1.7, 0.9, 0.5, 0.5, 0.9, 1.7, 4.0, 18.0],
    &[22.0, 5.0, 2.0, 1.4, 0.6, 0.4, 0.6, 1.4, 2.0, 5.0, 22.0],
    &[24.0, 6.0, 3.0, 1.8, 0.7, 0.5, 0.5, 0.7, 1.8, 3.0, 6.0, 24.0],
    &[33.0, 11.0, 4.0, 2.0, 1.1, 0.6, 0.3, 0.6, 1.1, 2.0, 4.0, 11.0, 33.0],
    &[43.0, 13.0, 6.0, 3.0, 1.3, 0.7, 0.4, 0.4, 0.7, 1.3, 3.0, 6.0, 13.0, 43.0],
    &[58.0, 15.0, 7.0, 4.0, 1.9, 1.0, 0.5, 0.2, 0.5, 1.0, 1.9, 4.0, 7.0, 15.0, 58.0],
    &[88.0, 18.0, 11.0, 5.0, 3.0, 1.3, 0.5, 0.3, 0.3, 0.5, 1.3, 3.0, 5.0, 11.0, 18.0, 88.0],
    &[110.0, 41.0, 10.0, 5.0, 3.0, 1.5, 1.0, 0.5, 0.3, 0.5, 1.0, 1.5, 3.0, 5.0, 10.0, 41.0, 110.0],
];

const HIGH: [&[f64]; 9] = [
    &[29.0, 4.0, 1.5, 0.3, 0.2, 0.3, 1.5, 4.0, 29.0],
    &[43.0, 7.0, 2.0, 0.6, 0.2, 0.2, 0.6, 2.0, 7.0, 43.0],
    &[76.0, 10.0, 3.0, 0.9, 0.3, 0.2, 0.3, 0.9, 3.0, 10.0, 76.0],
    &[120.0, 14.0, 5.2, 1.4, 0.4, 0.2, 0.2, 0.4, 1.4, 5.2, 14.0, 120.0],
    &[170.0, 24.0, 8.1, 2.0, 0.7, 0.2, 0.2, 0.2, 0.7, 2.0, 8.1, 24.0, 170.0],
    &[260.0, 37.0, 11.0, 4.0, 1.0, 0.2, 0.2, 0.2, 0.2, 1.0, 4.0, 11.0, 37.0, 260.0],
    &[420.0, 56.0, 18.0, 5.0, 1.9, 0.3, 0.2, 0.2, 0.2, 0.3, 1.9, 5.0, 18.0, 56.0, 420.0],
    &[620.0, 83.0, 27.0, 8.0, 3.0, 0.5, 0.2, 0.2, 0.2, 0.2, 0.5, 3.0, 8.0, 27.0, 83.0, 620.0],
    &[1000.0, 130.0, 26.0, 9.0, 4.0, 2.0, 0.2, 0.2, 0.2, 0.2, 0.2, 2.0, 4.0, 9.0, 26.0, 130.0, 1000.0],
];

impl MultiplierTable {
    pub fn new(min_rows: u32, tiers: Vec<DifficultyTier>) -> Self {
        Self { min_rows, tiers }
    }

    /// Standard low/medium/high table for boards of 8 to 16 rows
    pub fn standard() -> Self {
        let tier = |name: &str, rows: &[&[f64]]| DifficultyTier {
            name: name.to_string(),
            rows: rows.iter().map(|row| row.to_vec()).collect(),
        };

        Self::new(
            STANDARD_MIN_ROWS,
            vec![
                tier("low", &LOW[..]),
                tier("medium", &MEDIUM[..]),
                tier("high", &HIGH[..]),
            ],
        )
    }

    /// Multiplier for one terminal bucket
    pub fn multiplier(&self, difficulty: u32, rows: u32, bucket: Bucket) -> Result<f64, GameError> {
        let invalid = || GameError::InvalidCombination {
            difficulty,
            rows,
            bucket,
        };

        let offset = rows.checked_sub(self.min_rows).ok_or_else(invalid)?;
        self.tiers
            .get(difficulty as usize)
            .and_then(|tier| tier.rows.get(offset as usize))
            .and_then(|row| row.get(bucket as usize))
            .copied()
            .ok_or_else(invalid)
    }

    pub fn tier_names(&self) -> Vec<String> {
        self.tiers.iter().map(|tier| tier.name.clone()).collect()
    }

    /// Check that every tier up to `max_difficulty` covers every row count in
    /// `min_rows..=max_rows` with one non-negative multiplier per bucket.
    pub fn validate(&self, min_rows: u32, max_rows: u32, max_difficulty: u32) -> Result<(), ConfigurationError> {
        if self.tiers.len() <= max_difficulty as usize {
            return Err(ConfigurationError::InvalidValue {
                field: "game.max_difficulty".to_string(),
                value: max_difficulty.to_string(),
                reason: format!("multiplier table only has {} tiers", self.tiers.len()),
            });
        }

        if min_rows < self.min_rows {
            return Err(ConfigurationError::InvalidValue {
                field: "game.min_rows".to_string(),
                value: min_rows.to_string(),
                reason: format!("multiplier table starts at {} rows", self.min_rows),
            });
        }

        for tier in &self.tiers[..=max_difficulty as usize] {
            for rows in min_rows..=max_rows {
                let row = tier
                    .rows
                    .get((rows - self.min_rows) as usize)
                    .ok_or_else(|| {
                        ConfigurationError::ValidationFailed(format!(
                            "tier '{}' has no multipliers for {} rows",
                            tier.name, rows
                        ))
                    })?;

                if row.len() != rows as usize + 1 {
                    return Err(ConfigurationError::ValidationFailed(format!(
                        "tier '{}' has {} multipliers for {} rows, expected {}",
                        tier.name,
                        row.len(),
                        rows,
                        rows + 1
                    )));
                }

                if let Some(bad) = row.iter().find(|m| !m.is_finite() || **m < 0.0) {
                    return Err(ConfigurationError::ValidationFailed(format!(
                        "tier '{}' has invalid multiplier {} for {} rows",
                        tier.name, bad, rows
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Round `num` to `decimals` places, half away from zero.
///
/// Zero is returned as-is; any other value is nudged by `f64::EPSILON` first
/// so representations like `1.005` (stored as 1.00499...) round up.
pub fn round_value(num: f64, decimals: i32) -> f64 {
    if num == 0.0 {
        return 0.0;
    }

    let factor = 10f64.powi(decimals);
    ((num + f64::EPSILON) * factor).round() / factor
}

/// Resolved multiplier and winnings for one play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payout {
    pub multiplier: f64,
    pub win: f64,
}

/// Look up the multiplier for a terminal bucket and compute the rounded win
pub fn resolve(
    table: &MultiplierTable,
    difficulty: u32,
    rows: u32,
    bucket: Bucket,
    bet: f64,
) -> Result<Payout, GameError> {
    let multiplier = table.multiplier(difficulty, rows, bucket)?;
    Ok(Payout {
        multiplier,
        win: round_value(bet * multiplier, 2),
    })
}
