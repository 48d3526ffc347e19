//! Duplicate-position closer - entry point.
//!
//! Intended to be triggered by an external scheduler (cron or similar);
//! each invocation is one self-contained run.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Duplicate-position closer for IG accounts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via DEDUP_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    dedup_telemetry::init_logging()?;

    info!("Starting dedup-bot v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > DEDUP_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("DEDUP_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = dedup_bot::AppConfig::load_or_default(&config_path)?;
    config.validate()?;

    let app = dedup_bot::Application::new(config)?;
    app.run().await?;

    info!("Run complete");
    Ok(())
}
