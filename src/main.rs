use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_sweeper::{
    config::{Config, MatcherMode},
    pipeline::Pipeline,
};

#[derive(Parser)]
#[command(name = "m3u-sweeper")]
#[command(version)]
#[command(about = "Aggregates M3U playlists, drops dead streams and cleans up channel categories")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Output playlist path (overrides config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Use fuzzy category matching instead of substring matching
    #[arg(long)]
    fuzzy: bool,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("m3u_sweeper={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting m3u-sweeper v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(output) = cli.output {
        config.output.path = output.into();
    }
    if cli.fuzzy {
        config.categories.matcher = MatcherMode::Fuzzy;
    }

    let summary = Pipeline::new(config).run().await?;

    info!(
        "Done: {} aggregated, {} alive, {} written to {}",
        summary.aggregated,
        summary.alive,
        summary.written,
        summary.output_path.display()
    );

    Ok(())
}
