use crate::errors::GameError;
use crate::games::paths::{enumerate, PathSet, MAX_SUPPORTED_ROWS};
use std::ops::RangeInclusive;

/// Enumerated path sets, indexed directly by row count.
///
/// Built once at startup and shared read-only afterwards (`Arc<PathCache>`);
/// no request path mutates it.
#[derive(Debug, Default)]
pub struct PathCache {
    sets: Vec<Option<PathSet>>,
}

impl PathCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache holding every row count in `min_rows..=max_rows`
    pub fn build(min_rows: u32, max_rows: u32) -> Result<Self, GameError> {
        let mut cache = Self::new();
        cache.populate(min_rows, max_rows)?;
        Ok(cache)
    }

    /// Enumerate and store every row count in the range.
    ///
    /// Row counts that are already present are regenerated and overwritten.
    pub fn populate(&mut self, min_rows: u32, max_rows: u32) -> Result<(), GameError> {
        if min_rows > max_rows || max_rows > MAX_SUPPORTED_ROWS {
            return Err(GameError::InvalidRowRange {
                min: min_rows,
                max: max_rows,
                limit: MAX_SUPPORTED_ROWS,
            });
        }

        let needed = max_rows as usize + 1;
        if self.sets.len() < needed {
            self.sets.resize(needed, None);
        }

        for rows in min_rows..=max_rows {
            self.sets[rows as usize] = Some(enumerate(rows));
            tracing::debug!("Cached {} paths for {} rows", 1u64 << rows, rows);
        }

        Ok(())
    }

    /// Path set for `rows`, if it was built
    pub fn get(&self, rows: u32) -> Option<&PathSet> {
        self.sets.get(rows as usize).and_then(Option::as_ref)
    }

    /// Like [`get`](Self::get), but a miss is an internal consistency error
    pub fn require(&self, rows: u32) -> Result<&PathSet, GameError> {
        self.get(rows).ok_or(GameError::RowsNotCached { rows })
    }

    /// Smallest and largest cached row counts
    pub fn row_span(&self) -> Option<RangeInclusive<u32>> {
        let mut cached = self
            .sets
            .iter()
            .enumerate()
            .filter(|(_, set)| set.is_some())
            .map(|(rows, _)| rows as u32);
        let first = cached.next()?;
        let last = cached.last().unwrap_or(first);
        Some(first..=last)
    }

    /// Total number of cached paths across all row counts
    pub fn total_paths(&self) -> usize {
        self.sets.iter().flatten().map(PathSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_round_trip() {
        let cache = PathCache::build(8, 16).unwrap();
        for rows in 8..=16 {
            assert_eq!(cache.get(rows), Some(&enumerate(rows)));
        }
        assert_eq!(cache.row_span(), Some(8..=16));
    }

    #[test]
    fn test_miss_outside_range() {
        let cache = PathCache::build(8, 10).unwrap();
        assert!(cache.get(7).is_none());
        assert!(cache.get(11).is_none());
        assert!(cache.get(200).is_none());
        assert_eq!(cache.require(11), Err(GameError::RowsNotCached { rows: 11 }));
    }

    #[test]
    fn test_empty_cache() {
        let cache = PathCache::new();
        assert!(cache.get(0).is_none());
        assert_eq!(cache.row_span(), None);
        assert_eq!(cache.total_paths(), 0);
    }

    #[test]
    fn test_populate_is_idempotent() {
        let mut cache = PathCache::build(3, 5).unwrap();
        let before = cache.get(4).cloned();
        cache.populate(4, 6).unwrap();

        assert_eq!(cache.get(4).cloned(), before);
        assert!(cache.get(3).is_some());
        assert_eq!(cache.row_span(), Some(3..=6));
        assert_eq!(cache.total_paths(), 8 + 16 + 32 + 64);
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(matches!(
            PathCache::build(10, 8),
            Err(GameError::InvalidRowRange { min: 10, max: 8, .. })
        ));
        assert!(matches!(
            PathCache::build(8, MAX_SUPPORTED_ROWS + 1),
            Err(GameError::InvalidRowRange { .. })
        ));
    }
}
