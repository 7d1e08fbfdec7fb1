//! Payroll engine HTTP service.
//!
//! Usage:
//!   payroll-engine                          - Serve using config/payroll.yaml
//!   payroll-engine --config <file>          - Serve using another config file
//!   payroll-engine --port 9000 --log-level debug

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::{ConfigLoader, LoggingConfig};
use payroll_engine::error::EngineError;
use payroll_engine::store::open_store;

/// payroll-engine - employees, hours, adjustments and payroll over HTTP
#[derive(Parser, Debug)]
#[command(name = "payroll-engine")]
#[command(version, about, long_about = None)]
struct CliArgs {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config/payroll.yaml")]
    config: PathBuf,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log filter such as "info" or "payroll_engine=debug" (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let (mut loader, missing_config) = match ConfigLoader::load(&args.config) {
        Ok(loader) => (loader, false),
        Err(EngineError::ConfigNotFound { .. }) => (ConfigLoader::default(), true),
        Err(err) => return Err(err.into()),
    };
    if let Some(port) = args.port {
        loader.set_port(port);
    }
    if let Some(level) = args.log_level {
        loader.set_log_level(level);
    }

    init_logging(loader.logging());

    if missing_config {
        warn!(
            path = %args.config.display(),
            "Configuration file not found, using defaults"
        );
    }

    let store = open_store(loader.storage())?;
    let router = create_router(AppState::new(store));

    let addr = loader.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, version = env!("CARGO_PKG_VERSION"), "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
