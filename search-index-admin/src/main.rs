//! Search Index Admin Entry Point
//!
//! Runs a single gateway operation against the configured search engine.

use clap::Parser;
use dotenv::dotenv;
use search_index_admin::{commands, AdminConfig, AdminError, Cli, Dependencies};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// Logs go to stderr so command output on stdout stays machine readable.
fn init_tracing() -> Result<(), AdminError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("search_index_admin=info,search_index_gateway=info")
    });

    let json_logs = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| AdminError::config(format!("Failed to initialize tracing: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| AdminError::config(format!("Failed to initialize tracing: {}", e)))?;
    }

    info!(
        service_name = "search-index-admin",
        service_version = env!("CARGO_PKG_VERSION"),
        json_logs,
        "Tracing initialized"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AdminError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    let cli = Cli::parse();

    let mut config = AdminConfig::from_env();
    if let Some(index) = cli.index {
        config.index_name = index;
    }

    let deps = Dependencies::new(&config)?;

    match commands::run(&deps.gateway, cli.command).await {
        Ok(Some(output)) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e)
        }
    }
}
