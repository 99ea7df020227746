//! Qualification filtering, CV derivation, percentile ranks, and ordering.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::AppConfig;
use crate::domain::PlayerSummary;

/// Filter to qualifying players, derive cv_points (and optionally its
/// percentile rank), and sort ascending by cv_points. Lower CV means a
/// more consistent scorer, so the most consistent players rank first.
pub fn filter_and_rank(
    summaries: Vec<PlayerSummary>,
    config: &AppConfig,
    with_percentile: bool,
) -> Vec<PlayerSummary> {
    let mut rows: Vec<PlayerSummary> = summaries
        .into_iter()
        .filter(|s| {
            s.games_played >= config.min_games
                && s.avg_minutes >= config.min_avg_minutes
                && s.mean_points > 0.0
        })
        .map(|mut s| {
            // NaN std (single game) yields NaN cv; tolerated, never a panic
            s.cv_points = s.std_points / s.mean_points;
            s
        })
        .collect();

    if with_percentile {
        let ranks = percentile_ranks(&rows.iter().map(|r| r.cv_points).collect::<Vec<_>>());
        for (row, rank) in rows.iter_mut().zip(ranks) {
            row.cv_percentile = Some(rank);
        }
    }

    // Stable ascending sort; NaN orders last
    rows.sort_by(|a, b| match (a.cv_points.is_nan(), b.cv_points.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a
            .cv_points
            .partial_cmp(&b.cv_points)
            .unwrap_or(Ordering::Equal),
    });

    debug!("{} players qualify", rows.len());
    rows
}

/// Fractional percentile ranks with the average-rank convention for ties:
/// tied values receive the mean of their 1-based positions, divided by the
/// total count. Range (0, 1].
fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Extend over the run of tied values
        let mut j = i + 1;
        while j < n && values[order[j]].total_cmp(&values[order[i]]) == Ordering::Equal {
            j += 1;
        }
        // Mean of 1-based positions i+1..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank / n as f64;
        }
        i = j;
    }
    ranks
}
