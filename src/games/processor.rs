use crate::config::GameConfig;
use crate::errors::{GameError, PlinkoResult, ValidationError};
use crate::games::engine::PlinkoEngine;
use crate::games::path_cache::PathCache;
use crate::games::rng::{RandomSource, SeededRng};
use crate::games::types::{GameLimits, GameOutcome, PlayRequest, ValidatedPlay};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Validates play requests and hands them to the engine
pub struct GameProcessor {
    engine: PlinkoEngine,
    limits: GameLimits,
}

impl GameProcessor {
    /// Create a new game processor
    pub fn new(engine: PlinkoEngine, limits: GameLimits) -> Self {
        Self { engine, limits }
    }

    /// Build the path cache for the configured row range and seed the
    /// generator. Call once at startup, before serving traffic.
    pub fn from_config(config: &GameConfig) -> PlinkoResult<Self> {
        let limits = config.limits();
        config
            .multipliers
            .validate(limits.min_rows, limits.max_rows, limits.max_difficulty)?;

        let started = Instant::now();
        let cache = PathCache::build(limits.min_rows, limits.max_rows)?;
        let rng = match config.rng_seed {
            Some(seed) => SeededRng::from_seed(seed),
            None => SeededRng::from_entropy(),
        };
        match rng.seed() {
            Some(seed) => info!("🎲 Random source seeded with {}", seed),
            None => info!("🎲 Random source seeded from OS entropy"),
        }

        let rng: Arc<dyn RandomSource> = Arc::new(rng);
        let engine = PlinkoEngine::new(Arc::new(cache), Arc::new(config.multipliers.clone()), rng);

        let cache = engine.cache();
        if let Some(span) = cache.row_span() {
            info!(
                "🧮 Path cache ready: rows {}..={}, {} paths in {:?}",
                span.start(),
                span.end(),
                cache.total_paths(),
                started.elapsed()
            );
        }

        Ok(Self::new(engine, limits))
    }

    pub fn limits(&self) -> &GameLimits {
        &self.limits
    }

    pub fn engine(&self) -> &PlinkoEngine {
        &self.engine
    }

    /// Check a request against the limits. Rows, then difficulty, then bet.
    pub fn validate(&self, request: &PlayRequest) -> Result<ValidatedPlay, ValidationError> {
        let limits = &self.limits;

        let rows = whole_number_within(request.rows, limits.min_rows, limits.max_rows).ok_or(
            ValidationError::InvalidRows {
                min: limits.min_rows,
                max: limits.max_rows,
            },
        )?;

        let difficulty = whole_number_within(
            request.difficulty_level,
            limits.min_difficulty,
            limits.max_difficulty,
        )
        .ok_or(ValidationError::InvalidDifficulty {
            min: limits.min_difficulty,
            max: limits.max_difficulty,
        })?;

        let bet = request
            .bet
            .filter(|bet| bet.is_finite() && *bet > 0.0)
            .filter(|bet| *bet >= limits.min_bet && *bet <= limits.max_bet)
            .ok_or(ValidationError::InvalidBet {
                min: limits.min_bet,
                max: limits.max_bet,
            })?;

        Ok(ValidatedPlay {
            rows,
            difficulty,
            bet,
        })
    }

    /// Validate and play one game
    pub fn play(&self, request: &PlayRequest) -> PlinkoResult<GameOutcome> {
        let play = self.validate(request)?;
        Ok(self.play_validated(&play)?)
    }

    /// Play a request that already passed [`validate`](Self::validate)
    pub fn play_validated(&self, play: &ValidatedPlay) -> Result<GameOutcome, GameError> {
        self.engine.drop_ball(play.rows, play.difficulty, play.bet)
    }
}

fn whole_number_within(value: Option<f64>, min: u32, max: u32) -> Option<u32> {
    let value = value?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < min as f64 || value > max as f64 {
        return None;
    }
    Some(value as u32)
}
