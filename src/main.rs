use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trend_reel::{config::Config, data::HttpSource, media::Ffmpeg, ReelEngine};

#[derive(Parser)]
#[command(
    name = "trend-reel",
    version,
    about = "Turn a public time-series metric into an animated chart video",
    long_about = "trend-reel downloads a metric for one country from Our World in Data, \
                  animates it as a growing line chart and adds faded background music."
)]
struct Cli {
    /// Metric name, e.g. life_expectancy
    metric: String,

    /// Country or location name, e.g. India
    country: String,

    /// Configuration file (defaults to config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging, RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting trend-reel v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;

    let media = Ffmpeg::new();
    if !media.check_available().await {
        bail!("ffmpeg was not found on PATH. Install ffmpeg and ffprobe to render videos.");
    }

    let mut engine = ReelEngine::new(config, HttpSource::new(), media, rand::thread_rng());
    match engine.run(&cli.metric, &cli.country).await {
        Ok(output) => {
            info!(
                "{} observations ({:?} source), {:.1}s video",
                output.observations, output.source, output.mixed.duration
            );
            Ok(())
        }
        Err(e) => bail!(e.user_message()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Ok(Config::from_file(path)?)
        }
        None if Path::new(Config::DEFAULT_PATH).exists() => {
            info!("Loading configuration from {}", Config::DEFAULT_PATH);
            Ok(Config::from_file(Config::DEFAULT_PATH)?)
        }
        None => {
            info!("Using default configuration");
            Ok(Config::default())
        }
    }
}
