//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Build the site and router before binding
//! - Start the config watcher and signal handler
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing_subscriber::util::TryInitError;

use crate::config::{load_config, ConfigError, ShellConfig};
use crate::config::watcher::ConfigWatcher;
use crate::http::{HttpServer, SiteError};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("site error: {0}")]
    Site(#[from] SiteError),

    #[error("logging error: {0}")]
    Logging(#[from] TryInitError),

    #[error("config watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Config file; defaults are used when absent.
    pub config_path: Option<PathBuf>,
    /// Overrides `listener.bind_address`.
    pub bind_address: Option<String>,
    /// Watch the config file and apply changes.
    pub watch: bool,
}

/// Resolve the configuration for `options`.
pub fn load(options: &StartupOptions) -> Result<ShellConfig, ConfigError> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => ShellConfig::default(),
    };
    if let Some(bind) = &options.bind_address {
        config.listener.bind_address = bind.clone();
    }
    Ok(config)
}

/// Start the shell server and run until a termination signal.
pub async fn run(options: StartupOptions) -> Result<(), StartupError> {
    let config = load(&options)?;
    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?options.config_path,
        "catalog-shell starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        location = ?config.location.mode,
        routes = config.routing.routes.len(),
        redirect_to = %config.routing.redirect_to,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    // Keep the watcher handle alive for the lifetime of the server
    let (config_updates, _watcher) = match (&options.config_path, options.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path, server.config().clone());
            (updates, Some(watcher.run()?))
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let listener = TcpListener::bind(&bind_address).await?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
