use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "swish")]
#[command(version = "0.1.0")]
#[command(about = "NBA scoring consistency report (coefficient of variation)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "swish.toml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank players from league-wide game logs (one fetch per season)
    League {
        #[command(flatten)]
        overrides: ReportArgs,
    },
    /// Rank players by fetching each active player's log individually;
    /// adds the cv_percentile column
    Players {
        #[command(flatten)]
        overrides: ReportArgs,

        /// Pause between players, in milliseconds
        #[arg(long)]
        sleep_ms: Option<u64>,
    },
}

/// Report options shared by both modes; unset flags fall back to the
/// config file / defaults.
#[derive(Args)]
pub struct ReportArgs {
    /// Seasons to include, e.g. --season 2024-25 --season 2025-26
    #[arg(long = "season")]
    pub seasons: Vec<String>,

    /// Minimum qualifying games
    #[arg(long)]
    pub min_games: Option<usize>,

    /// Minimum average minutes per game
    #[arg(long)]
    pub min_avg_minutes: Option<f64>,

    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    pub fn apply_to(&self, config: &mut AppConfig) {
        if !self.seasons.is_empty() {
            config.seasons = self.seasons.clone();
        }
        if let Some(min_games) = self.min_games {
            config.min_games = min_games;
        }
        if let Some(min_avg_minutes) = self.min_avg_minutes {
            config.min_avg_minutes = min_avg_minutes;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
    }
}
