pub mod nba_stats;

pub use nba_stats::{GameLogSource, NbaStatsClient, ResultSet};
