use anyhow::Context;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{connect, ensure_schema, seed};

#[derive(Debug, Default, Args)]
pub struct SeedArgs {
    #[arg(long, help = "SQLite database file (overrides DATABASE_PATH)")]
    pub database: Option<PathBuf>,

    #[arg(long, help = "Seed CSV file (overrides DATABASE_SEED_PATH)")]
    pub csv: Option<PathBuf>,
}

pub async fn handle(args: SeedArgs, mut config: AppConfig, output: OutputFormat) -> anyhow::Result<()> {
    if let Some(database) = args.database {
        config.database.path = database;
    }
    let csv = args.csv.unwrap_or_else(|| config.database.seed_path.clone());

    let pool = connect(&config.database)
        .await
        .with_context(|| format!("failed to open {}", config.database.path.display()))?;
    ensure_schema(&pool).await.context("failed to create schema")?;

    let report = seed::seed_from_file(&pool, &csv)
        .await
        .with_context(|| format!("failed to seed from {}", csv.display()))?;
    pool.close().await;

    match output {
        OutputFormat::Json => {
            let tables: serde_json::Map<String, serde_json::Value> = report
                .tables
                .iter()
                .map(|(table, rows)| (table.to_string(), json!(rows)))
                .collect();
            println!("{}", json!({ "database": config.database.path, "tables": tables }));
        }
        OutputFormat::Text => {
            for (table, rows) in &report.tables {
                if *rows == 0 {
                    println!("{:<18} already populated", table);
                } else {
                    println!("{:<18} {} rows", table, rows);
                }
            }
            println!("Seeded {} rows into {}", report.total(), config.database.path.display());
        }
    }
    Ok(())
}
