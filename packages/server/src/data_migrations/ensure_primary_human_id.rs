//! Data migration: move the single human employee to id 1
//!
//! A lot of tooling and seed data assumes the primary human user is
//! employee_id=1. When a database was seeded before that convention, the
//! human can sit at an arbitrary id. This migration remaps it:
//!
//! 1. Only runs when there is exactly one human employee
//! 2. Only runs when employee id 1 is currently unused
//! 3. Rewrites all known FKs that point at the old id, then the PK itself

use super::{DataMigration, MigrationContext, MigrationOutcome, VerifyResult};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

/// Every (table, column) known to reference employees.id.
const EMPLOYEE_FK_COLUMNS: &[(&str, &str)] = &[
    ("departments", "head_employee_id"),
    ("teams", "lead_employee_id"),
    ("employees", "manager_id"),
    ("activities", "actor_employee_id"),
    ("project_members", "employee_id"),
    ("tasks", "assignee_employee_id"),
    ("tasks", "reviewer_employee_id"),
    ("tasks", "created_by_employee_id"),
    ("task_comments", "author_employee_id"),
];

pub struct EnsurePrimaryHumanIdMigration;

impl EnsurePrimaryHumanIdMigration {
    /// The old id of the single human employee, if the remap applies.
    async fn remappable_id(db: &PgPool) -> Result<Option<i32>> {
        let human_ids: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM employees WHERE employee_type = 'human' ORDER BY id")
                .fetch_all(db)
                .await?;

        // Only attempt the rewrite in the typical single-human scenario.
        if human_ids.len() != 1 || human_ids[0] == 1 {
            return Ok(None);
        }

        let id1_taken: Option<i32> = sqlx::query_scalar("SELECT 1 FROM employees WHERE id = 1")
            .fetch_optional(db)
            .await?;
        if id1_taken.is_some() {
            return Ok(None);
        }

        Ok(Some(human_ids[0]))
    }
}

#[async_trait]
impl DataMigration for EnsurePrimaryHumanIdMigration {
    fn name(&self) -> &'static str {
        "ensure_primary_human_id"
    }

    fn description(&self) -> &'static str {
        "Move the single human employee to employee id 1 and rewrite referencing rows"
    }

    async fn run(&self, ctx: &MigrationContext) -> Result<MigrationOutcome> {
        let old_id = match Self::remappable_id(&ctx.db_pool).await? {
            Some(id) => id,
            None => return Ok(MigrationOutcome::Skipped),
        };

        if ctx.dry_run {
            info!("Would remap human employee {} to id 1", old_id);
            return Ok(MigrationOutcome::WouldMigrate);
        }

        let mut tx = ctx.db_pool.begin().await?;

        for (table, column) in EMPLOYEE_FK_COLUMNS {
            sqlx::query(&format!(
                "UPDATE {table} SET {column} = 1 WHERE {column} = $1"
            ))
            .bind(old_id)
            .execute(&mut *tx)
            .await?;
        }

        // Finally, rewrite the employee PK itself.
        sqlx::query("UPDATE employees SET id = 1 WHERE id = $1")
            .bind(old_id)
            .execute(&mut *tx)
            .await?;

        // Keep the id sequence in sync.
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('employees', 'id'), \
             (SELECT COALESCE(MAX(id), 1) FROM employees), true)",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Remapped human employee {} to id 1", old_id);
        Ok(MigrationOutcome::Migrated)
    }

    async fn verify(&self, db: &PgPool) -> Result<VerifyResult> {
        match Self::remappable_id(db).await? {
            Some(old_id) => Ok(VerifyResult::Failed {
                issues: vec![format!(
                    "human employee still at id {} with id 1 unused",
                    old_id
                )],
            }),
            None => Ok(VerifyResult::Passed),
        }
    }
}
