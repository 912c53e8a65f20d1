use clap::Parser;
use tracing_subscriber::EnvFilter;

use itt_census_api::cli::{self, Cli};
use itt_census_api::{config, is_development};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECURITY_JWT_SECRET, DATABASE_PATH, etc.
    let _ = dotenvy::dotenv();

    let default_level = if is_development!() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = config::config();
    config.validate()?;
    tracing::info!("Starting ITT Census API in {:?} mode", config.environment);

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli, config.clone()).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
