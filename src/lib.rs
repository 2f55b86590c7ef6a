//! Plinko - Outcome Generation Service
//!
//! Enumerates every drop path through an N-row board once at startup, draws
//! one uniformly per play from a seeded generator and pays out the terminal
//! bucket's multiplier. Served over HTTP by the `plinko` binary and driven in
//! bulk by `plinko-simulate`.

pub mod api;
pub mod config;
pub mod errors;
pub mod games;
pub mod logging;
pub mod simulation;

pub use config::{ConfigLoader, GameConfig, PlinkoConfig, ServerConfig};
pub use errors::{ConfigurationError, GameError, PlinkoError, PlinkoResult, ValidationError};
pub use games::{GameOutcome, GameProcessor, PlayRequest, PlinkoEngine};
