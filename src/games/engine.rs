use crate::errors::GameError;
use crate::games::path_cache::PathCache;
use crate::games::payout::{resolve, MultiplierTable};
use crate::games::rng::{select_path, RandomSource};
use crate::games::types::GameOutcome;
use std::sync::Arc;

/// Core outcome generator: path cache, multiplier table and the shared
/// random source. Performs no input validation; callers pass row counts,
/// difficulties and bets that were already checked against the limits the
/// cache and table were built for.
#[derive(Clone)]
pub struct PlinkoEngine {
    cache: Arc<PathCache>,
    table: Arc<MultiplierTable>,
    rng: Arc<dyn RandomSource>,
}

impl PlinkoEngine {
    pub fn new(cache: Arc<PathCache>, table: Arc<MultiplierTable>, rng: Arc<dyn RandomSource>) -> Self {
        Self { cache, table, rng }
    }

    /// Draw a path for `rows` and pay it out at `difficulty`
    pub fn drop_ball(&self, rows: u32, difficulty: u32, bet: f64) -> Result<GameOutcome, GameError> {
        let selected = select_path(self.rng.as_ref(), &self.cache, rows)?;
        let final_location = selected.terminal_bucket();
        let payout = resolve(&self.table, difficulty, rows, final_location, bet)?;

        tracing::debug!(
            rows,
            difficulty,
            index = selected.index,
            final_location,
            multiplier = payout.multiplier,
            "Ball dropped"
        );

        Ok(GameOutcome {
            win: payout.win,
            path: selected.path.to_vec(),
            final_location,
            multiplier: payout.multiplier,
        })
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    pub fn table(&self) -> &MultiplierTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::payout::DifficultyTier;
    use crate::games::rng::{tests::ScriptedSource, SeededRng};

    fn standard_engine(rng: Arc<dyn RandomSource>) -> PlinkoEngine {
        PlinkoEngine::new(
            Arc::new(PathCache::build(8, 16).unwrap()),
            Arc::new(MultiplierTable::standard()),
            rng,
        )
    }

    #[test]
    fn test_zero_row_board() {
        let table = MultiplierTable::new(
            0,
            vec![DifficultyTier {
                name: "flat".to_string(),
                rows: vec![vec![1.5]],
            }],
        );
        let engine = PlinkoEngine::new(
            Arc::new(PathCache::build(0, 0).unwrap()),
            Arc::new(table),
            Arc::new(SeededRng::from_seed(5)),
        );

        let outcome = engine.drop_ball(0, 0, 10.0).unwrap();
        assert_eq!(outcome.path, vec![0]);
        assert_eq!(outcome.final_location, 0);
        assert_eq!(outcome.multiplier, 1.5);
        assert_eq!(outcome.win, 15.0);
    }

    #[test]
    fn test_scripted_drop() {
        let engine = standard_engine(Arc::new(ScriptedSource::new(vec![0.999_999_9])));
        let outcome = engine.drop_ball(16, 2, 1.0).unwrap();

        assert_eq!(outcome.path, (0..=16).collect::<Vec<u8>>());
        assert_eq!(outcome.final_location, 16);
        assert_eq!(outcome.multiplier, 1000.0);
        assert_eq!(outcome.win, 1000.0);
    }

    #[test]
    fn test_uncached_rows_are_internal_errors() {
        let engine = standard_engine(Arc::new(SeededRng::from_seed(1)));
        assert_eq!(
            engine.drop_ball(17, 0, 1.0),
            Err(GameError::RowsNotCached { rows: 17 })
        );
    }

    #[test]
    fn test_missing_tier_is_invalid_combination() {
        let engine = standard_engine(Arc::new(ScriptedSource::new(vec![0.0])));
        assert_eq!(
            engine.drop_ball(8, 5, 1.0),
            Err(GameError::InvalidCombination {
                difficulty: 5,
                rows: 8,
                bucket: 0
            })
        );
    }
}
