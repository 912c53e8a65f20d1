use anyhow::Context;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::models::Entity;
use crate::database::{connect, ensure_schema, seed, Repository};

/// Shared handles passed to every handler through axum `State`
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        let tokens = TokenService::from_config(&config.security);
        Self {
            pool,
            config: Arc::new(config),
            tokens,
        }
    }

    /// Open the store, create missing tables and seed empty statistic tables
    pub async fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        let pool = connect(&config.database)
            .await
            .with_context(|| format!("failed to open {}", config.database.path.display()))?;
        ensure_schema(&pool).await.context("failed to create schema")?;

        if config.database.seed_on_startup {
            let path = &config.database.seed_path;
            if path.exists() {
                let report = seed::seed_from_file(&pool, path)
                    .await
                    .context("failed to seed database")?;
                info!("Seed check complete, {} rows added", report.total());
            } else {
                warn!("Seed file {} not found, skipping seed", path.display());
            }
        }

        Ok(Self::new(pool, config))
    }

    pub fn repo<T: Entity>(&self) -> Repository<T> {
        Repository::new(self.pool.clone())
    }
}
