//! CLI for executing data migrations
//!
//! Operator-invoked (unlike the worker's timer-driven tasks), so failures
//! here are loud: errors print and the process exits nonzero.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use server_core::config::Config;
use server_core::data_migrations::{
    all_migrations, find_migration, MigrationContext, MigrationOutcome, VerifyResult,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Data migration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all registered migrations
    List,

    /// Run a migration
    Run {
        name: String,
        #[arg(long)]
        dry_run: bool,
    },

    /// Verify migration completion
    Verify { name: String },
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationInfo>>,
}

#[derive(Serialize)]
struct MigrationInfo {
    name: String,
    description: String,
}

impl Response {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            migrations: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            migrations: None,
        }
    }

    fn print(&self) {
        println!("{}", serde_json::to_string_pretty(self).expect("serialize response"));
    }
}

async fn connect() -> Result<PgPool> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let database_url = config
        .database_url
        .context("DATABASE_URL must be set to run data migrations")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let migrations = all_migrations()
                .iter()
                .map(|e| MigrationInfo {
                    name: e.migration.name().to_string(),
                    description: e.migration.description().to_string(),
                })
                .collect();
            Response {
                success: true,
                message: None,
                migrations: Some(migrations),
            }
            .print();
        }

        Commands::Run { name, dry_run } => {
            let entry =
                find_migration(&name).with_context(|| format!("Unknown migration: {}", name))?;
            let ctx = MigrationContext {
                db_pool: connect().await?,
                dry_run,
            };

            let outcome = entry.migration.run(&ctx).await?;
            let message = match outcome {
                MigrationOutcome::Migrated => "migrated",
                MigrationOutcome::Skipped => "skipped (nothing to do)",
                MigrationOutcome::WouldMigrate => "dry-run: would migrate",
            };
            Response::ok(message).print();
        }

        Commands::Verify { name } => {
            let entry =
                find_migration(&name).with_context(|| format!("Unknown migration: {}", name))?;
            let db = connect().await?;

            match entry.migration.verify(&db).await? {
                VerifyResult::Passed => Response::ok("verification passed").print(),
                VerifyResult::Failed { issues } => {
                    Response::failed(format!("verification failed: {}", issues.join("; ")))
                        .print();
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
