//! Drop paths through the peg lattice
//!
//! A path of an `N`-row board is `N + 1` bucket positions: it starts at `0`
//! and every drop either stays (left) or advances by one (right). Each of the
//! `2^N` left/right choice sequences is its own path, so the set is not
//! deduplicated by terminal bucket.
//!
//! Path index `i` encodes the choice sequence directly: the first drop is the
//! most significant of the `N` bits and a set bit means "advance". Enumerating
//! indices in ascending order yields the same order as a depth-first walk that
//! always tries "stay" before "advance".

/// Horizontal slot index; a board of `N` rows has buckets `0..=N`
pub type Bucket = u8;

/// Largest row count the service will enumerate (2^20 paths of 21 buckets)
pub const MAX_SUPPORTED_ROWS: u32 = 20;

/// Every drop path for one row count, stored as one contiguous buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    rows: u32,
    buckets: Box<[Bucket]>,
}

impl PathSet {
    /// Number of rows the paths were generated for
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of paths, always `2^rows`
    pub fn len(&self) -> usize {
        self.buckets.len() / self.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Path at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&[Bucket]> {
        let stride = self.stride();
        let start = index.checked_mul(stride)?;
        self.buckets.get(start..start + stride)
    }

    /// All paths in index order
    pub fn iter(&self) -> impl Iterator<Item = &[Bucket]> + '_ {
        self.buckets.chunks_exact(self.stride())
    }

    fn stride(&self) -> usize {
        self.rows as usize + 1
    }
}

/// Enumerate every path through a board with `rows` rows.
///
/// # Panics
///
/// Panics if `rows` exceeds [`MAX_SUPPORTED_ROWS`]; callers bound the row count
/// before asking for a full enumeration.
pub fn enumerate(rows: u32) -> PathSet {
    assert!(
        rows <= MAX_SUPPORTED_ROWS,
        "cannot enumerate {} rows (maximum {})",
        rows,
        MAX_SUPPORTED_ROWS
    );

    let count = 1usize << rows;
    let stride = rows as usize + 1;
    let mut buckets = vec![0; count * stride];

    for (index, path) in buckets.chunks_exact_mut(stride).enumerate() {
        write_path(rows, index as u64, path);
    }

    PathSet {
        rows,
        buckets: buckets.into_boxed_slice(),
    }
}

/// Build the single path for choice sequence `index` without enumerating.
pub fn path_for_index(rows: u32, index: u64) -> Vec<Bucket> {
    let mut path = vec![0; rows as usize + 1];
    write_path(rows, index, &mut path);
    path
}

/// Terminal bucket of choice sequence `index`: the number of right drops.
pub fn terminal_bucket(rows: u32, index: u64) -> Bucket {
    let mask = if rows >= 64 { u64::MAX } else { (1u64 << rows) - 1 };
    (index & mask).count_ones() as Bucket
}

fn write_path(rows: u32, index: u64, path: &mut [Bucket]) {
    let mut bucket: Bucket = 0;
    path[0] = bucket;
    for depth in 0..rows {
        let shift = rows - 1 - depth;
        bucket += ((index >> shift) & 1) as Bucket;
        path[depth as usize + 1] = bucket;
    }
}
