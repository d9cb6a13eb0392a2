//! Data migration framework for surgical database transformations
//!
//! Data migrations are different from schema migrations:
//! - Schema migrations change the database structure
//! - Data migrations transform data within existing structures
//!
//! Migrations here are one-shot and idempotent: each one inspects the
//! database, decides whether its transformation applies, and either runs
//! it inside a single transaction or skips. Re-running a completed
//! migration is always a no-op.
//!
//! # Usage
//!
//! 1. Implement the `DataMigration` trait for your migration
//! 2. Register it in `all_migrations()`
//! 3. Run via `migrate_cli run <name>` (supports `--dry-run`)

pub mod ensure_primary_human_id;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Result of running a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The transformation was applied
    Migrated,
    /// Nothing to do (already migrated or preconditions not met)
    Skipped,
    /// Dry-run: the transformation would have been applied
    WouldMigrate,
}

/// Result of verification check
#[derive(Debug)]
pub enum VerifyResult {
    /// The migration's end state holds
    Passed,
    /// Verification failed with issues
    Failed { issues: Vec<String> },
}

/// Context passed to migration execution
pub struct MigrationContext {
    /// Database connection pool
    pub db_pool: PgPool,
    /// Whether this is a dry-run (no mutations)
    pub dry_run: bool,
}

/// Trait for implementing data migrations
///
/// Each migration must be idempotent and verifiable.
#[async_trait]
pub trait DataMigration: Send + Sync + 'static {
    /// Unique name for this migration
    fn name(&self) -> &'static str;

    /// Optional description shown in migration list
    fn description(&self) -> &'static str {
        ""
    }

    /// Run the migration (or report what it would do under dry-run)
    async fn run(&self, ctx: &MigrationContext) -> Result<MigrationOutcome>;

    /// Verify that the migration's end state holds
    async fn verify(&self, db: &PgPool) -> Result<VerifyResult>;
}

/// Registry entry for a migration
pub struct MigrationEntry {
    pub migration: Box<dyn DataMigration>,
}

impl MigrationEntry {
    pub fn new<M: DataMigration>(m: M) -> Self {
        Self {
            migration: Box::new(m),
        }
    }
}

/// Get all registered migrations
///
/// Add new migrations to this function.
pub fn all_migrations() -> Vec<MigrationEntry> {
    vec![MigrationEntry::new(
        ensure_primary_human_id::EnsurePrimaryHumanIdMigration,
    )]
}

/// Find a migration by name
pub fn find_migration(name: &str) -> Option<MigrationEntry> {
    all_migrations()
        .into_iter()
        .find(|e| e.migration.name() == name)
}
