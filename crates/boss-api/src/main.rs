//! Game API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p boss-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use boss_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_format = std::env::var("LOG_FORMAT").ok();
    let tracing_config = TracingConfig::for_environment(config.app.env, log_format.as_deref());
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        request_timeout_secs = config.app.request_timeout_secs,
        "Starting game API server"
    );

    boss_api::run(config).await?;

    Ok(())
}
