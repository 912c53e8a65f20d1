pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "itt-census-api")]
#[command(about = "REST API over initial teacher training census statistics")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output command results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the schema and load seed data into empty tables")]
    Seed(commands::seed::SeedArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::Seed(args)) => commands::seed::handle(args, config, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::parse_from(["itt-census-api"]);
        assert!(cli.command.is_none());
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);
    }

    #[test]
    fn parses_seed_overrides() {
        let cli = Cli::parse_from(["itt-census-api", "--json", "seed", "--csv", "other.csv"]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        match cli.command {
            Some(Commands::Seed(args)) => {
                assert_eq!(args.csv.as_deref(), Some(std::path::Path::new("other.csv")));
                assert!(args.database.is_none());
            }
            _ => panic!("expected seed command"),
        }
    }

    #[test]
    fn parses_serve_port() {
        let cli = Cli::parse_from(["itt-census-api", "serve", "--port", "8080", "--no-seed"]);
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.no_seed);
            }
            _ => panic!("expected serve command"),
        }
    }
}
