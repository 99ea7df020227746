//! Fetch → clean → aggregate → rank pipeline.

pub mod aggregate;
pub mod clean;
pub mod collect;
pub mod rank;
pub mod report;

use tracing::info;

use crate::adapters::GameLogSource;
use crate::config::AppConfig;
use crate::domain::{FetchOutcome, PlayerSummary};
use crate::error::{Result, SwishError};

pub use collect::CollectedLogs;

/// Outcome of a per-player run: the ranked table plus one fetch outcome
/// per roster entry.
#[derive(Debug)]
pub struct RunReport {
    pub rows: Vec<PlayerSummary>,
    pub outcomes: Vec<FetchOutcome>,
}

/// Bulk mode: league-wide game logs per season, no percentile column.
pub async fn run_league<S>(source: &S, config: &AppConfig) -> Result<Vec<PlayerSummary>>
where
    S: GameLogSource + Sync,
{
    let raw = collect::collect_league(source, &config.seasons).await?;
    rank_cleaned(raw, config, false)
}

/// Per-player mode: roster-driven fetch with skip-and-continue, plus the
/// percentile column.
pub async fn run_players<S>(source: &S, config: &AppConfig) -> Result<RunReport>
where
    S: GameLogSource + Sync,
{
    let delay = std::time::Duration::from_millis(config.sleep_ms);
    let collected = collect::collect_players(source, &config.seasons, delay).await?;

    let skipped = collected.skipped();
    if skipped > 0 {
        info!("{} players skipped due to fetch failures", skipped);
    }

    let rows = rank_cleaned(collected.rows, config, true)?;
    Ok(RunReport { rows, outcomes: collected.outcomes })
}

fn rank_cleaned(
    raw: Vec<crate::domain::RawGameRow>,
    config: &AppConfig,
    with_percentile: bool,
) -> Result<Vec<PlayerSummary>> {
    if raw.is_empty() {
        return Err(SwishError::EmptyDataset(config.season_scope()));
    }

    let records = clean::clean_rows(raw)?;
    if records.is_empty() {
        return Err(SwishError::EmptyDataset(config.season_scope()));
    }

    let summaries = aggregate::aggregate(&records);
    Ok(rank::filter_and_rank(summaries, config, with_percentile))
}
