//! Row cleaning: date parsing, numeric coercion, and qualification drops.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::domain::{GameRecord, RawGameRow};
use crate::error::{Result, SwishError};

/// League logs use ISO dates, the per-player endpoint uses "APR 01, 2025".
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%b %d, %Y"];

/// Coerce a JSON value to f64. Numbers pass through, numeric strings
/// parse, everything else is missing. "37:25"-style minute strings from
/// older endpoints fail the parse and drop the row, matching the
/// coerce-or-missing rule.
fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_game_date(row: &RawGameRow) -> Result<NaiveDate> {
    let raw = row.game_date.trim();
    // The per-player endpoint upper-cases the month abbreviation
    let titled = titlecase_month(raw);
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&titled, fmt) {
            return Ok(date);
        }
    }
    Err(SwishError::DateParse {
        player: row.player_name.clone(),
        value: row.game_date.clone(),
    })
}

fn titlecase_month(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if i < 3 {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Clean the unified row set: hard-parse dates, coerce minutes/points,
/// drop rows with missing values, drop rows with non-positive minutes.
pub fn clean_rows(rows: Vec<RawGameRow>) -> Result<Vec<GameRecord>> {
    let input_len = rows.len();
    let mut records = Vec::with_capacity(input_len);

    for row in rows {
        let game_date = parse_game_date(&row)?;

        let minutes = coerce_numeric(&row.minutes);
        let points = coerce_numeric(&row.points);
        let (minutes, points) = match (minutes, points) {
            (Some(m), Some(p)) => (m, p),
            _ => continue,
        };
        if minutes <= 0.0 {
            continue;
        }

        records.push(GameRecord {
            player_id: row.player_id,
            player_name: row.player_name,
            season: row.season,
            game_date,
            minutes,
            points,
        });
    }

    debug!("cleaned {} rows down to {}", input_len, records.len());
    Ok(records)
}
