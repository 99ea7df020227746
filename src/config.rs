use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Output filename the report is written to unless overridden.
pub const DEFAULT_OUTPUT_FILE: &str = "nba_scoring_consistency_cv.csv";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Season labels to include, e.g. "2024-25"
    #[serde(default = "default_seasons")]
    pub seasons: Vec<String>,
    /// Minimum qualifying games for a player to appear in the report
    #[serde(default = "default_min_games")]
    pub min_games: usize,
    /// Minimum average minutes per game
    #[serde(default = "default_min_avg_minutes")]
    pub min_avg_minutes: f64,
    /// Fixed pause between per-player fetches, in milliseconds
    #[serde(default = "default_sleep_ms")]
    pub sleep_ms: u64,
    /// Report output path
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_seasons() -> Vec<String> {
    vec!["2024-25".to_string(), "2025-26".to_string()]
}

fn default_min_games() -> usize {
    55
}

fn default_min_avg_minutes() -> f64 {
    24.0
}

fn default_sleep_ms() -> u64 {
    600
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seasons: default_seasons(),
            min_games: default_min_games(),
            min_avg_minutes: default_min_avg_minutes(),
            sleep_ms: default_sleep_ms(),
            output: default_output(),
        }
    }
}

impl AppConfig {
    /// Load configuration: built-in defaults, then an optional TOML file,
    /// then SWISH_* environment variables (SWISH_MIN_GAMES=60, etc.)
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("seasons", default_seasons())?
            .set_default("min_games", default_min_games() as i64)?
            .set_default("min_avg_minutes", default_min_avg_minutes())?
            .set_default("sleep_ms", default_sleep_ms() as i64)?
            .set_default("output", DEFAULT_OUTPUT_FILE)?
            .add_source(File::from(config_file.as_ref()).required(false))
            .add_source(Environment::with_prefix("SWISH").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    /// Comma-joined season scope, used in diagnostics.
    pub fn season_scope(&self) -> String {
        self.seasons.join(", ")
    }
}
