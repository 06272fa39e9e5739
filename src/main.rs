//! CardioDesk — headless service entry point
//!
//! Runs the REST API backend the desktop shell connects to. Reads
//! configuration from TOML (default `~/.config/cardiodesk/config.toml`).
//!
//! ```sh
//! # Run with default config
//! cardiodesk-service
//!
//! # Custom config path
//! cardiodesk-service --config /etc/cardiodesk/config.toml
//!
//! # Override the API port
//! cardiodesk-service --api-port 8080
//!
//! # Validate config without starting
//! cardiodesk-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use cardiodesk::config::{default_config_path, AppConfig};
use cardiodesk::server::{init_tracing, ServerHandle, ServerOptions};

/// CardioDesk — backend service of the heart-disease dataset explorer.
#[derive(Parser, Debug)]
#[command(
    name = "cardiodesk-service",
    version,
    about = "Backend service for the CardioDesk heart-disease dataset explorer",
    long_about = "CardioDesk backend: SQLite store, CSV import/export, \
                  chart summaries and risk estimation behind a local REST API.\n\n\
                  Default config: ~/.config/cardiodesk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CARDIODESK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip dataset seeding on startup.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let (mut app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| app_cfg.logging.level.clone());
    init_tracing(&level);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    if let Some(port) = cli.api_port {
        app_cfg.server.api_port = port;
    }

    if cli.check {
        info!("Configuration is valid");
        println!("{}", toml::to_string_pretty(&app_cfg)?);
        return Ok(());
    }

    // ── Run ────────────────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config: app_cfg,
        auto_migrate: !cli.no_migrate,
        create_default_admin: true,
        seed_dataset: !cli.no_seed,
    })
    .await?;

    info!("CardioDesk service started. Press Ctrl+C to shut down.");
    tokio::signal::ctrl_c().await?;

    handle.shutdown().await;
    info!("CardioDesk service shutdown complete");
    Ok(())
}
