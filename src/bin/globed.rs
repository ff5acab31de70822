//! `globed`: the LED globe daemon.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use globe_composer::{GlobeConfig, NullDriver, TraceDriver};
use globe_composer::daemon::Globe;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DriverKind {
    /// Log every frame at trace level
    Trace,
    /// Discard frames
    Null,
}

/// LED globe controller
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file; compiled defaults when omitted
    #[arg(short, long, env = "GLOBE_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP listen address (overrides `http.bind`)
    #[arg(short, long, env = "GLOBE_BIND")]
    bind: Option<String>,

    /// Number of pixels (overrides `render.led_count`)
    #[arg(long, env = "GLOBE_LED_COUNT")]
    led_count: Option<usize>,

    /// Output driver
    #[arg(long, env = "GLOBE_DRIVER", value_enum, default_value = "trace")]
    driver: DriverKind,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = GlobeConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(bind) = cli.bind {
        config.http.bind = bind;
    }
    if let Some(led_count) = cli.led_count {
        config.render.led_count = led_count;
    }

    let globe = match cli.driver {
        DriverKind::Trace => Globe::start(&config, TraceDriver).await,
        DriverKind::Null => Globe::start(&config, NullDriver).await,
    }
    .context("Failed to start globe")?;

    wait_for_signal().await?;
    globe.shutdown().await;

    Ok(())
}

/// Resolve on SIGINT (Ctrl+C) or SIGTERM (systemd)
async fn wait_for_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to set up SIGTERM handler")?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl+C")?;
                tracing::info!("Received SIGINT, shutting down");
            }
            _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down"),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl+C")?;
        tracing::info!("Received Ctrl+C, shutting down");
    }
    Ok(())
}
