//! Core data types for the consistency pipeline.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// One roster entry from the active-player directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub name: String,
}

/// One raw game-log row as returned by the stats API, before cleaning.
///
/// Minutes and points stay as loose JSON values here; the upstream mixes
/// numbers and strings, and coercion is the cleaner's job.
#[derive(Debug, Clone)]
pub struct RawGameRow {
    pub player_id: i64,
    pub player_name: String,
    pub season: String,
    pub game_date: String,
    pub minutes: Value,
    pub points: Value,
}

/// One cleaned per-game record. Minutes are strictly positive.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub player_id: i64,
    pub player_name: String,
    pub season: String,
    pub game_date: NaiveDate,
    pub minutes: f64,
    pub points: f64,
}

/// Aggregate scoring summary for one (player id, player name) pair.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player_id: i64,
    pub player_name: String,
    pub games_played: usize,
    pub avg_minutes: f64,
    pub mean_points: f64,
    /// Sample standard deviation (n-1 divisor); NaN for a single game.
    pub std_points: f64,
    /// std_points / mean_points, filled in by the ranker.
    pub cv_points: f64,
    /// Fractional percentile rank of cv_points, per-player mode only.
    pub cv_percentile: Option<f64>,
}

/// Result of one player's fetch loop in per-player mode.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched { player: Player, rows: usize },
    Skipped { player: Player, reason: String },
}

impl FetchOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::Skipped { .. })
    }

    pub fn player(&self) -> &Player {
        match self {
            FetchOutcome::Fetched { player, .. } => player,
            FetchOutcome::Skipped { player, .. } => player,
        }
    }
}
