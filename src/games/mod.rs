//! Plinko outcome generation
//!
//! Leaves first: `paths` enumerates drop paths, `path_cache` holds them per
//! row count, `rng` draws one uniformly, `payout` turns its terminal bucket
//! into a multiplier and win. `engine` ties those together and `processor`
//! adds request validation on top.

pub mod engine;
pub mod path_cache;
pub mod paths;
pub mod payout;
pub mod processor;
pub mod rng;
pub mod types;

pub use engine::PlinkoEngine;
pub use path_cache::PathCache;
pub use paths::{enumerate, path_for_index, Bucket, PathSet, MAX_SUPPORTED_ROWS};
pub use payout::{resolve, round_value, DifficultyTier, MultiplierTable, Payout};
pub use processor::GameProcessor;
pub use rng::{select_path, RandomSource, SeededRng, SelectedPath};
pub use types::*;
