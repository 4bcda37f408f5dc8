//! Braid calculator web server.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 127.0.0.1:5000, embedded catalog, ./braid-calc.toml if present
//! braid-web
//!
//! # Custom catalog and port
//! braid-web --catalog data/braids.json --port 8080
//!
//! # Explicit config file
//! braid-web --config /etc/braid-calc.toml
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calc_web::config::Config;
use calc_web::web;

/// Paracord braid calculator - web form and JSON API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML). Defaults to ./braid-calc.toml when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Braid catalog JSON file (overrides config). Uses the embedded catalog when unset.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(catalog) = self.catalog {
            config.catalog.path = Some(catalog);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(args.config.as_deref())?;
    let config = args.apply(config);
    config.validate()?;

    match &config.catalog.path {
        Some(path) => info!("Catalog file: {}", path.display()),
        None => info!("Catalog file: embedded default"),
    }

    web::run_server(config).await
}
