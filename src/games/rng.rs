//! Seeded random source and uniform path selection
//!
//! One generator instance is shared by every request. Its state advances on
//! each draw, so draws are serialised behind a mutex: replaying the same seed
//! replays the same sequence of outcomes (in request order).

use crate::errors::GameError;
use crate::games::path_cache::PathCache;
use crate::games::paths::{terminal_bucket, Bucket, PathSet};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> Result<f64, GameError>;
}

/// General-purpose seeded generator. Not cryptographic, not verifiable.
pub struct SeededRng {
    inner: Mutex<StdRng>,
    seed: Option<u64>,
}

impl SeededRng {
    /// Reproducible generator: same seed, same sequence
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            inner: Mutex::new(StdRng::from_entropy()),
            seed: None,
        }
    }

    /// Seed used at construction, if one was given
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&self) -> Result<f64, GameError> {
        let mut rng = self
            .inner
            .lock()
            .map_err(|e| GameError::RngUnavailable(e.to_string()))?;
        Ok(rng.gen::<f64>())
    }
}

/// A path drawn from the cache, borrowed from its path set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedPath<'a> {
    /// Choice-sequence index within the row count's path set
    pub index: usize,
    pub path: &'a [Bucket],
    bucket: Bucket,
}

impl SelectedPath<'_> {
    pub fn terminal_bucket(&self) -> Bucket {
        self.bucket
    }
}

/// Map a unit draw onto an index of a set with `len` entries
pub fn scale_to_index(draw: f64, len: usize) -> usize {
    let index = (draw * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

/// Draw one path uniformly from the cached set for `rows`.
///
/// Uniform over choice sequences, so the terminal bucket is binomially
/// distributed.
pub fn select_path<'a>(
    source: &dyn RandomSource,
    cache: &'a PathCache,
    rows: u32,
) -> Result<SelectedPath<'a>, GameError> {
    let paths = cache.require(rows)?;
    let draw = source.next_unit()?;
    pick(paths, draw)
}

fn pick(paths: &PathSet, draw: f64) -> Result<SelectedPath<'_>, GameError> {
    let index = scale_to_index(draw, paths.len());
    let path = paths
        .get(index)
        .ok_or(GameError::RowsNotCached { rows: paths.rows() })?;
    Ok(SelectedPath {
        index,
        path,
        bucket: terminal_bucket(paths.rows(), index as u64),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays a fixed list of draws, cycling
    pub(crate) struct ScriptedSource {
        draws: Vec<f64>,
        next: AtomicUsize,
    }

    impl ScriptedSource {
        pub(crate) fn new(draws: Vec<f64>) -> Self {
            Self {
                draws,
                next: AtomicUsize::new(0),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_unit(&self) -> Result<f64, GameError> {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            Ok(self.draws[i % self.draws.len()])
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SeededRng::from_seed(99);
        let b = SeededRng::from_seed(99);
        for _ in 0..100 {
            assert_eq!(a.next_unit().unwrap(), b.next_unit().unwrap());
        }
        assert_eq!(a.seed(), Some(99));
    }

    #[test]
    fn test_draws_in_unit_interval() {
        let rng = SeededRng::from_entropy();
        assert_eq!(rng.seed(), None);
        for _ in 0..10_000 {
            let draw = rng.next_unit().unwrap();
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn test_scripted_draws_map_to_indices() {
        let cache = PathCache::build(4, 4).unwrap();
        let source = ScriptedSource::new(vec![0.0, 0.5, 0.999_999, 0.0625]);

        let first = select_path(&source, &cache, 4).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.path, &[0, 0, 0, 0, 0]);

        let middle = select_path(&source, &cache, 4).unwrap();
        assert_eq!(middle.index, 8);
        assert_eq!(middle.path, &[0, 1, 1, 1, 1]);

        let last = select_path(&source, &cache, 4).unwrap();
        assert_eq!(last.index, 15);
        assert_eq!(last.terminal_bucket(), 4);
        assert_eq!(last.terminal_bucket(), *last.path.last().unwrap());

        let second = select_path(&source, &cache, 4).unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.path, &[0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_scale_clamps_to_last_index() {
        assert_eq!(scale_to_index(1.0, 16), 15);
        assert_eq!(scale_to_index(0.0, 1), 0);
    }

    #[test]
    fn test_uncached_rows_fail() {
        let cache = PathCache::build(8, 8).unwrap();
        let source = ScriptedSource::new(vec![0.3]);
        assert_eq!(
            select_path(&source, &cache, 9),
            Err(GameError::RowsNotCached { rows: 9 })
        );
    }

    #[test]
    fn test_selection_is_uniform() {
        // Chi-square over 16 indices (15 degrees of freedom); 37.7 is p = 0.001
        let rows = 4;
        let cache = PathCache::build(rows, rows).unwrap();
        let rng = SeededRng::from_seed(2024);
        let draws = 160_000usize;

        let mut counts = [0usize; 16];
        for _ in 0..draws {
            counts[select_path(&rng, &cache, rows).unwrap().index] += 1;
        }

        let expected = draws as f64 / 16.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(chi_square < 37.7, "chi-square {} counts {:?}", chi_square, counts);
    }
}
