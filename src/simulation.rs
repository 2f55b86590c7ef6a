//! Offline batch simulation
//!
//! Plays many games through the same validation and engine path the API
//! uses and summarises the observed return-to-player and multiplier
//! distribution as a JSON report.

use crate::errors::{ConfigurationError, PlinkoResult};
use crate::games::payout::round_value;
use crate::games::processor::GameProcessor;
use crate::games::types::{GameOutcome, PlayRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Batches between progress log lines
const PROGRESS_EVERY_BATCHES: u64 = 10;

/// Simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub num_games: u64,
    pub rows: u32,
    pub difficulty: u32,
    pub bet: f64,
    pub batch_size: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_games: 10_000,
            rows: 16,
            difficulty: 1,
            bet: 100.0,
            batch_size: 100,
        }
    }
}

/// Written report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub configuration: ReportConfiguration,
    pub summary: SimulationSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfiguration {
    pub num_games: u64,
    pub rows: u32,
    pub difficulty_level: u32,
    pub bet: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub total_games: u64,
    pub total_wagered: f64,
    pub total_won: f64,
    /// Percent, four decimals
    pub return_to_player: f64,
    pub max_win: Option<f64>,
    pub min_win: Option<f64>,
    /// Highest multiplier first
    pub multiplier_statistics: Vec<MultiplierStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierStat {
    pub multiplier: f64,
    pub hits: u64,
    /// Share of requested games, e.g. `"12.5%"`
    pub percentage: String,
}

/// Running totals over successful games
#[derive(Debug, Default)]
struct Tally {
    completed: u64,
    failed: u64,
    total_wagered: f64,
    total_won: f64,
    max_win: Option<f64>,
    min_win: Option<f64>,
    // keyed by f64 bits; multipliers are non-negative so bit order is numeric order
    hits: BTreeMap<u64, u64>,
}

impl Tally {
    fn record(&mut self, bet: f64, outcome: &GameOutcome) {
        self.completed += 1;
        self.total_wagered += bet;
        self.total_won += outcome.win;
        self.max_win = Some(self.max_win.map_or(outcome.win, |m| m.max(outcome.win)));
        self.min_win = Some(self.min_win.map_or(outcome.win, |m| m.min(outcome.win)));
        *self.hits.entry(outcome.multiplier.to_bits()).or_insert(0) += 1;
    }
}

/// Runs a simulation against a game processor
pub struct SimulationRunner<'a> {
    processor: &'a GameProcessor,
    config: SimulationConfig,
}

impl<'a> SimulationRunner<'a> {
    pub fn new(processor: &'a GameProcessor, config: SimulationConfig) -> Self {
        Self { processor, config }
    }

    /// Play every game and build the report.
    ///
    /// The request is validated up front; an invalid one aborts before any
    /// game is played. Individual game failures are logged and skipped.
    pub fn run(&self) -> PlinkoResult<SimulationReport> {
        let config = &self.config;
        if config.batch_size == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "batch_size".to_string(),
                value: "0".to_string(),
                reason: "Batch size must be positive".to_string(),
            }
            .into());
        }

        let play = self.processor.validate(&PlayRequest::new(
            config.rows,
            config.difficulty,
            config.bet,
        ))?;

        info!("🎯 Starting simulation of {} games...", config.num_games);
        let started = Instant::now();
        let mut tally = Tally::default();

        let mut played = 0u64;
        let mut batch = 0u64;
        while played < config.num_games {
            let current = config.batch_size.min(config.num_games - played);
            for _ in 0..current {
                match self.processor.play_validated(&play) {
                    Ok(outcome) => tally.record(play.bet, &outcome),
                    Err(e) => {
                        tally.failed += 1;
                        warn!("Game failed, skipping: {}", e);
                    }
                }
            }
            played += current;
            batch += 1;

            if batch % PROGRESS_EVERY_BATCHES == 0 || played >= config.num_games {
                info!("Processed {} games...", played);
            }
        }

        info!(
            "⏱️  Simulation finished in {:?} ({} completed, {} failed)",
            started.elapsed(),
            tally.completed,
            tally.failed
        );

        Ok(self.build_report(tally))
    }

    fn build_report(&self, tally: Tally) -> SimulationReport {
        let config = &self.config;

        let return_to_player = if tally.total_wagered > 0.0 {
            tally.total_won / tally.total_wagered * 100.0
        } else {
            0.0
        };

        let multiplier_statistics = tally
            .hits
            .iter()
            .rev()
            .map(|(&bits, &hits)| {
                let share = hits as f64 / config.num_games as f64 * 100.0;
                MultiplierStat {
                    multiplier: f64::from_bits(bits),
                    hits,
                    percentage: format!("{}%", round_value(share, 4)),
                }
            })
            .collect();

        SimulationReport {
            configuration: ReportConfiguration {
                num_games: config.num_games,
                rows: config.rows,
                difficulty_level: config.difficulty,
                bet: config.bet,
            },
            summary: SimulationSummary {
                total_games: config.num_games,
                total_wagered: tally.total_wagered,
                total_won: round_value(tally.total_won, 2),
                return_to_player: round_value(return_to_player, 4),
                max_win: tally.max_win,
                min_win: tally.min_win,
                multiplier_statistics,
            },
        }
    }
}

/// `./simulations/simulation_{unix_ms}_{rows}_{difficulty}.json`
pub fn default_output_path(rows: u32, difficulty: u32) -> PathBuf {
    let stamp = chrono::Utc::now().timestamp_millis();
    PathBuf::from("simulations").join(format!("simulation_{}_{}_{}.json", stamp, rows, difficulty))
}

/// Write the report as pretty JSON, creating parent directories
pub fn write_report(report: &SimulationReport, path: &Path) -> PlinkoResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Log a human-readable summary
pub fn log_report(report: &SimulationReport) {
    let summary = &report.summary;
    info!("📊 Simulation Results:");
    info!("   Total Games: {}", summary.total_games);
    info!("   Total Wagered: {}", summary.total_wagered);
    info!("   Total Won: {}", summary.total_won);
    info!("   RTP: {}%", summary.return_to_player);
    match (summary.max_win, summary.min_win) {
        (Some(max), Some(min)) => {
            info!("   Highest Win: {}", max);
            info!("   Lowest Win: {}", min);
        }
        _ => info!("   No games completed"),
    }
    info!("   Multiplier Distribution:");
    for stat in &summary.multiplier_statistics {
        info!("   {}x: {} hits ({})", stat.multiplier, stat.hits, stat.percentage);
    }
}
