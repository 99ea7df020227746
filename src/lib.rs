//! NBA scoring consistency: fetch game logs, aggregate per-player points,
//! rank by coefficient of variation, write a CSV report.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;

pub use config::AppConfig;
pub use error::{Result, SwishError};
