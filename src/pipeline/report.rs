//! Report output: CSV file plus a console preview of the top rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::PlayerSummary;
use crate::error::Result;

/// Rows shown in the console preview.
const PREVIEW_ROWS: usize = 20;

/// Write the ranked table as a comma-delimited file with a header row and
/// no index column. Column order is fixed; cv_percentile appears only
/// when the rows carry it.
pub fn write_csv(rows: &[PlayerSummary], path: &Path) -> Result<()> {
    let with_percentile = rows.iter().any(|r| r.cv_percentile.is_some());

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    let mut header = "player_name,games_played,avg_minutes,mean_points,std_points,cv_points"
        .to_string();
    if with_percentile {
        header.push_str(",cv_percentile");
    }
    writeln!(out, "{}", header)?;

    for row in rows {
        write!(
            out,
            "{},{},{},{},{},{}",
            csv_field(&row.player_name),
            row.games_played,
            row.avg_minutes,
            row.mean_points,
            row.std_points,
            row.cv_points,
        )?;
        if with_percentile {
            write!(out, ",{}", row.cv_percentile.unwrap_or(f64::NAN))?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Quote a field if it contains a delimiter, quote, or newline.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Print the first 20 ranked rows for inspection.
pub fn print_preview(rows: &[PlayerSummary]) {
    let with_percentile = rows.iter().any(|r| r.cv_percentile.is_some());

    println!("\nTop {} Most Consistent Players:\n", PREVIEW_ROWS);
    print!(
        "{:<4} {:<28} {:>6} {:>8} {:>8} {:>8} {:>9}",
        "#", "player_name", "games", "avg_min", "mean_pts", "std_pts", "cv_pts"
    );
    if with_percentile {
        print!(" {:>7}", "cv_pct");
    }
    println!();

    for (i, row) in rows.iter().take(PREVIEW_ROWS).enumerate() {
        print!(
            "{:<4} {:<28} {:>6} {:>8.1} {:>8.2} {:>8.2} {:>9.4}",
            i + 1,
            row.player_name,
            row.games_played,
            row.avg_minutes,
            row.mean_points,
            row.std_points,
            row.cv_points,
        );
        if let Some(p) = row.cv_percentile {
            print!(" {:>7.3}", p);
        }
        println!();
    }
}
