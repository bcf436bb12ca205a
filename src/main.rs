// Main entrypoint for the badges service.

use badges::app::App;
use badges::config::{Config, ConfigTrait};
use badges::shutdown::GracefulShutdown;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "cfg/badges.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/badges.cfg.local.yaml";

/// Badges - serves catalog entity badges as SVG or JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        let cfg = Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path))?;
        info!(
            component = "config",
            event = "load_success",
            path = ?custom_path,
            "config loaded"
        );
        return Ok(cfg);
    }

    match Config::load(PathBuf::from(CONFIG_PATH_LOCAL)) {
        Ok(cfg) => {
            info!(
                component = "config",
                event = "load_success",
                path = CONFIG_PATH_LOCAL,
                "config loaded"
            );
            Ok(cfg)
        }
        Err(_) => {
            let cfg = Config::load(PathBuf::from(CONFIG_PATH))
                .with_context(|| format!("failed to load config from {}", CONFIG_PATH))?;
            info!(
                component = "config",
                event = "load_success",
                path = CONFIG_PATH,
                "config loaded"
            );
            Ok(cfg)
        }
    }
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_deref())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The recorder must be installed before the tokio runtime starts.
    if let Err(e) = badges::controller::metrics::init_prometheus_exporter() {
        eprintln!("Warning: Failed to initialize Prometheus metrics exporter: {}", e);
        eprintln!("Metrics endpoint will not be available");
    }

    tokio::runtime::Runtime::new()
        .context("Failed to create tokio runtime")?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    let shutdown_token = CancellationToken::new();

    let cfg = load_cfg(args.cfg)?;

    // Must be done after config is loaded.
    configure_logger(&cfg);

    if cfg.is_obfuscated() {
        info!(
            component = "main",
            event = "obfuscation_enabled",
            "badges are served by entity hash only"
        );
    } else if cfg.salt().is_some() {
        warn!(
            component = "main",
            event = "salt_unused",
            "salt is configured but obfuscation is disabled"
        );
    }

    let graceful_shutdown = GracefulShutdown::new(shutdown_token.clone());
    graceful_shutdown
        .set_graceful_timeout(Duration::from_secs(30))
        .await;

    let app = App::new(shutdown_token.clone(), cfg)?;

    graceful_shutdown.add(1);
    app.serve(Arc::new(graceful_shutdown.clone()));

    if let Err(e) = graceful_shutdown.await_shutdown().await {
        error!(
            component = "main",
            scope = "service",
            event = "graceful_shutdown_failed",
            error = %e,
            "failed to gracefully shut down service"
        );
        return Err(e);
    }

    Ok(())
}
