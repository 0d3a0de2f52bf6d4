//! Catalog Shell Server
//!
//! Serves the catalog application's shell page for every declared client
//! route and redirects every other path to the fallback.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────────┐
//!     ────────────────────┼─▶ request id ─▶ trace ─▶ timeout                 │
//!                         │                            │                     │
//!                         │            ┌───────────────┴──────────┐          │
//!                         │            ▼                          ▼          │
//!                         │   /templates/* (ServeDir)     navigate handler   │
//!                         │                                       │          │
//!                         │                                       ▼          │
//!                         │                          routing: RouteTable     │
//!                         │                          first exact match       │
//!                         │                           │               │      │
//!     Client Response     │                           ▼               ▼      │
//!     ◀───────────────────┼────────────────── shell page      redirect "/"   │
//!                         │                                                  │
//!                         │  config (TOML, watch) · lifecycle · observability│
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use catalog_shell::lifecycle::{startup, StartupOptions};
use clap::Parser;

#[derive(Parser)]
#[command(name = "catalog-shell")]
#[command(about = "Application shell server for the catalog client", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "CATALOG_SHELL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the configuration file when it changes
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    startup::run(StartupOptions {
        config_path: args.config,
        bind_address: args.bind,
        watch: args.watch,
    })
    .await?;

    Ok(())
}
