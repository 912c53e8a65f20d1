use anyhow::Context;
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::routes;
use crate::state::AppState;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "SQLite database file (overrides DATABASE_PATH)")]
    pub database: Option<PathBuf>,

    #[arg(long, help = "Skip seeding empty statistic tables on startup")]
    pub no_seed: bool,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(database) = args.database {
        config.database.path = database;
    }
    if args.no_seed {
        config.database.seed_on_startup = false;
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));
    let state = AppState::bootstrap(config).await?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("ITT Census API listening on http://{}", addr);

    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
