use clap::Parser;
use swish::adapters::NbaStatsClient;
use swish::cli::{Cli, Commands};
use swish::config::AppConfig;
use swish::error::Result;
use swish::pipeline::{self, report};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = AppConfig::load(&cli.config)?;

    match &cli.command {
        Commands::League { overrides } => {
            overrides.apply_to(&mut config);
            run_league(&config).await?;
        }
        Commands::Players { overrides, sleep_ms } => {
            overrides.apply_to(&mut config);
            if let Some(sleep_ms) = sleep_ms {
                config.sleep_ms = *sleep_ms;
            }
            run_players(&config).await?;
        }
    }

    Ok(())
}

async fn run_league(config: &AppConfig) -> Result<()> {
    let client = NbaStatsClient::new(None)?;
    let rows = pipeline::run_league(&client, config).await?;

    report::write_csv(&rows, &config.output)?;
    report::print_preview(&rows);
    Ok(())
}

async fn run_players(config: &AppConfig) -> Result<()> {
    let roster_season = config.seasons.last().cloned().unwrap_or_default();
    let client = NbaStatsClient::new(None)?.with_roster_season(&roster_season);
    let run = pipeline::run_players(&client, config).await?;

    report::write_csv(&run.rows, &config.output)?;
    report::print_preview(&run.rows);

    let skipped = run.outcomes.iter().filter(|o| o.is_skipped()).count();
    info!(
        "Done: {} ranked players, {} of {} roster entries skipped",
        run.rows.len(),
        skipped,
        run.outcomes.len()
    );
    Ok(())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,swish=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
