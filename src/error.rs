use thiserror::Error;

/// Main error type for the consistency report tool
#[derive(Error, Debug)]
pub enum SwishError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stats API error: {0}")]
    Api(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Data errors
    #[error("Unparsable game date {value:?} for player {player}")]
    DateParse { player: String, value: String },

    #[error("No game records fetched for seasons [{0}]")]
    EmptyDataset(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for SwishError
pub type Result<T> = std::result::Result<T, SwishError>;
