//! Per-player aggregation of cleaned game records.

use std::collections::HashMap;

use crate::domain::{GameRecord, PlayerSummary};

/// Group records by (player id, player name) and compute the scoring
/// summary for each group. Distinct name spellings under one id form
/// distinct groups; that mirrors the upstream data rather than repairing
/// it. Group order follows first appearance in the input, which makes the
/// later stable sort deterministic.
pub fn aggregate(records: &[GameRecord]) -> Vec<PlayerSummary> {
    let mut index: HashMap<(i64, &str), usize> = HashMap::new();
    let mut groups: Vec<(i64, String, Vec<&GameRecord>)> = Vec::new();

    for record in records {
        let key = (record.player_id, record.player_name.as_str());
        match index.get(&key) {
            Some(&i) => groups[i].2.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push((record.player_id, record.player_name.clone(), vec![record]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(player_id, player_name, games)| {
            let n = games.len();
            let avg_minutes = games.iter().map(|g| g.minutes).sum::<f64>() / n as f64;
            let mean_points = games.iter().map(|g| g.points).sum::<f64>() / n as f64;
            let std_points = sample_std(games.iter().map(|g| g.points), mean_points, n);

            PlayerSummary {
                player_id,
                player_name,
                games_played: n,
                avg_minutes,
                mean_points,
                std_points,
                cv_points: f64::NAN,
                cv_percentile: None,
            }
        })
        .collect()
}

/// Sample standard deviation (n-1 divisor). NaN for fewer than two
/// observations, matching the statistical convention.
fn sample_std(points: impl Iterator<Item = f64>, mean: f64, n: usize) -> f64 {
    if n < 2 {
        return f64::NAN;
    }
    let ss: f64 = points.map(|p| (p - mean).powi(2)).sum();
    (ss / (n as f64 - 1.0)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, name: &str, minutes: f64, points: f64) -> GameRecord {
        GameRecord {
            player_id: id,
            player_name: name.to_string(),
            season: "2024-25".to_string(),
            game_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            minutes,
            points,
        }
    }

    #[test]
    fn test_summary_statistics() {
        let records: Vec<_> = [10.0, 12.0, 11.0, 13.0]
            .iter()
            .map(|&p| record(1, "A", 30.0, p))
            .collect();

        let summaries = aggregate(&records);
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.games_played, 4);
        assert_eq!(s.avg_minutes, 30.0);
        assert!((s.mean_points - 11.5).abs() < 1e-12);
        // Sample std with Bessel's correction: sqrt(5/3)
        assert!((s.std_points - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_game_std_is_nan() {
        let summaries = aggregate(&[record(1, "A", 30.0, 18.0)]);
        assert_eq!(summaries[0].games_played, 1);
        assert!(summaries[0].std_points.is_nan());
    }

    #[test]
    fn test_name_spellings_form_distinct_groups() {
        let records = vec![
            record(1, "A. Player", 30.0, 10.0),
            record(1, "Aaron Player", 30.0, 20.0),
            record(1, "A. Player", 30.0, 12.0),
        ];
        let summaries = aggregate(&records);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].games_played, 2);
        assert_eq!(summaries[1].games_played, 1);
    }

    #[test]
    fn test_group_order_follows_first_appearance() {
        let records = vec![
            record(2, "B", 30.0, 10.0),
            record(1, "A", 30.0, 10.0),
            record(2, "B", 30.0, 12.0),
        ];
        let summaries = aggregate(&records);
        assert_eq!(summaries[0].player_name, "B");
        assert_eq!(summaries[1].player_name, "A");
    }
}
