//! Snow Atlas Server
//!
//! Run with: cargo run --bin snowatlas
//!
//! # Configuration
//!
//! Read from `--config`, or the first of
//! `~/.config/snowatlas/config.toml`, `/etc/snowatlas/config.toml`, `./config.toml`.
//!
//! Environment variables override the file:
//! - `SNOWATLAS_DATASET`: Dataset CSV path (default: data/resorts.csv)
//! - `SNOWATLAS_ENCODING`: Dataset encoding, latin1 or utf8 (default: latin1)
//! - `SNOWATLAS_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SNOWATLAS_API_PORT`: Port to listen on (default: 5010)
//! - `SNOWATLAS_LOG_LEVEL`: Log level (default: info)
//! - `SNOWATLAS_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the log level

use clap::Parser;
use snowatlas::api::{serve, AppState};
use snowatlas::config::{Config, LoggingConfig};
use snowatlas::dataset::DatasetLoader;
use snowatlas::views::Dashboard;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "snowatlas")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ski resort dashboard server")]
struct Args {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset CSV, overriding the configuration
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = match &args.config {
        Some(path) => Config::load_with_env(path),
        None => Ok(Config::load_default()),
    };

    // Config problems are logged once the subscriber is installed
    let loaded = match loaded {
        Ok(loaded) => {
            init_tracing(&loaded.config.logging);
            loaded
        }
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            tracing::error!(error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    tracing::info!("Starting Snow Atlas server v{}", env!("CARGO_PKG_VERSION"));
    loaded.log();

    let mut config = loaded.config;
    if let Some(data) = args.data {
        config.dataset.path = data;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!("Dataset: {:?} ({:?})", config.dataset.path, config.dataset.encoding);

    let dataset = DatasetLoader::new()
        .with_encoding(config.dataset.encoding)
        .load_path(&config.dataset.path)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load dataset");
            e
        })?;

    let dashboard = Dashboard::new(Arc::new(dataset), config.dashboard.clone()).map_err(|e| {
        tracing::error!(error = %e, "Invalid dashboard defaults");
        e
    })?;

    let state = AppState::new(dashboard, config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state).await?;

    tracing::info!("Snow Atlas server stopped");
    Ok(())
}

/// Install the global subscriber: `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("snowatlas={},tower_http=info", logging.level))
    });

    let (json, pretty) = if logging.is_json() {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}
