//! Game-log collection: drives the source across seasons (and players).

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::adapters::GameLogSource;
use crate::domain::{FetchOutcome, RawGameRow};
use crate::error::Result;

/// Bulk mode: one league-wide fetch per season, concatenated.
///
/// A season-level failure propagates and ends the run; there is no
/// per-season skip here.
pub async fn collect_league<S>(source: &S, seasons: &[String]) -> Result<Vec<RawGameRow>>
where
    S: GameLogSource + Sync,
{
    let mut all_rows = Vec::new();
    for season in seasons {
        info!("Fetching {}...", season);
        let mut rows = source.league_game_log(season).await?;
        info!("{}: {} game-log rows", season, rows.len());
        all_rows.append(&mut rows);
    }
    Ok(all_rows)
}

/// Per-player collection result: the unified row set plus one outcome per
/// roster entry, so the caller can report skip counts.
#[derive(Debug, Default)]
pub struct CollectedLogs {
    pub rows: Vec<RawGameRow>,
    pub outcomes: Vec<FetchOutcome>,
}

impl CollectedLogs {
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }
}

/// Per-player mode: for every active player, fetch each season's log in
/// turn, pausing `delay` between players as rate-limiting courtesy.
///
/// A failure inside one player's loop abandons that player's remaining
/// seasons and moves on; it never aborts the run.
pub async fn collect_players<S>(
    source: &S,
    seasons: &[String],
    delay: Duration,
) -> Result<CollectedLogs>
where
    S: GameLogSource + Sync,
{
    let players = source.active_players().await?;
    info!("Collecting logs for {} active players", players.len());

    let mut collected = CollectedLogs::default();
    let total = players.len();

    for (i, player) in players.into_iter().enumerate() {
        info!("[{}/{}] {}", i + 1, total, player.name);

        let mut player_rows = Vec::new();
        let mut failure: Option<String> = None;

        for season in seasons {
            match source.player_game_log(&player, season).await {
                Ok(rows) => player_rows.extend(rows),
                Err(e) => {
                    warn!("Skipping {}: {}", player.name, e);
                    failure = Some(e.to_string());
                    break;
                }
            }
        }

        match failure {
            Some(reason) => {
                collected.outcomes.push(FetchOutcome::Skipped { player, reason });
            }
            None => {
                collected.outcomes.push(FetchOutcome::Fetched {
                    player,
                    rows: player_rows.len(),
                });
                collected.rows.extend(player_rows);
            }
        }

        if i + 1 < total {
            sleep(delay).await;
        }
    }

    info!(
        "Collected {} rows ({} players fetched, {} skipped)",
        collected.rows.len(),
        collected.outcomes.len() - collected.skipped(),
        collected.skipped()
    );
    Ok(collected)
}
