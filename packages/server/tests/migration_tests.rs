//! Integration tests for the ensure_primary_human_id data migration.
//!
//! Each test runs against a throwaway Postgres container with the subset
//! of the schema the migration touches.

use server_core::data_migrations::ensure_primary_human_id::EnsurePrimaryHumanIdMigration;
use server_core::data_migrations::{
    DataMigration, MigrationContext, MigrationOutcome, VerifyResult,
};
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

const SCHEMA: &str = r#"
    CREATE TABLE employees (
        id SERIAL PRIMARY KEY,
        employee_type TEXT NOT NULL,
        manager_id INT
    );
    CREATE TABLE departments (id SERIAL PRIMARY KEY, head_employee_id INT);
    CREATE TABLE teams (id SERIAL PRIMARY KEY, lead_employee_id INT);
    CREATE TABLE activities (id SERIAL PRIMARY KEY, actor_employee_id INT);
    CREATE TABLE project_members (id SERIAL PRIMARY KEY, employee_id INT);
    CREATE TABLE tasks (
        id SERIAL PRIMARY KEY,
        assignee_employee_id INT,
        reviewer_employee_id INT,
        created_by_employee_id INT
    );
    CREATE TABLE task_comments (id SERIAL PRIMARY KEY, author_employee_id INT);
"#;

/// Start Postgres and create the schema subset the migration touches.
/// The container must outlive the pool, so it is handed back to the caller.
async fn setup() -> (ContainerAsync<Postgres>, PgPool) {
    let postgres = Postgres::default()
        .start()
        .await
        .expect("Failed to start Postgres container");

    let host = postgres.get_host().await.expect("container host");
    let port = postgres
        .get_host_port_ipv4(5432)
        .await
        .expect("container port");
    let url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to create schema");

    (postgres, pool)
}

async fn seed_single_human_at(pool: &PgPool, id: i32) {
    sqlx::query("INSERT INTO employees (id, employee_type) VALUES ($1, 'human')")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to insert human");
    sqlx::query("INSERT INTO employees (id, employee_type, manager_id) VALUES (2, 'agent', $1)")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to insert agent");
    sqlx::query(
        "INSERT INTO tasks (assignee_employee_id, reviewer_employee_id, created_by_employee_id) \
         VALUES ($1, $1, $1)",
    )
    .bind(id)
    .execute(pool)
    .await
    .expect("Failed to insert task");
    sqlx::query("INSERT INTO activities (actor_employee_id) VALUES ($1)")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to insert activity");
}

async fn human_ids(pool: &PgPool) -> Vec<i32> {
    sqlx::query_scalar("SELECT id FROM employees WHERE employee_type = 'human' ORDER BY id")
        .fetch_all(pool)
        .await
        .expect("Failed to query human ids")
}

#[tokio::test]
async fn remaps_single_human_and_referencing_rows_to_id_1() {
    let (_container, pool) = setup().await;
    seed_single_human_at(&pool, 7).await;

    let ctx = MigrationContext {
        db_pool: pool.clone(),
        dry_run: false,
    };
    let outcome = EnsurePrimaryHumanIdMigration.run(&ctx).await.unwrap();
    assert_eq!(outcome, MigrationOutcome::Migrated);

    assert_eq!(human_ids(&pool).await, vec![1]);

    let manager_id: Option<i32> =
        sqlx::query_scalar("SELECT manager_id FROM employees WHERE id = 2")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(manager_id, Some(1));

    let task: (Option<i32>, Option<i32>, Option<i32>) = sqlx::query_as(
        "SELECT assignee_employee_id, reviewer_employee_id, created_by_employee_id FROM tasks",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(task, (Some(1), Some(1), Some(1)));

    let actor: Option<i32> = sqlx::query_scalar("SELECT actor_employee_id FROM activities")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(actor, Some(1));

    // Running again is a no-op.
    let outcome = EnsurePrimaryHumanIdMigration.run(&ctx).await.unwrap();
    assert_eq!(outcome, MigrationOutcome::Skipped);

    match EnsurePrimaryHumanIdMigration.verify(&pool).await.unwrap() {
        VerifyResult::Passed => {}
        VerifyResult::Failed { issues } => panic!("verification failed: {:?}", issues),
    }
}

#[tokio::test]
async fn skips_when_multiple_humans_exist() {
    let (_container, pool) = setup().await;
    sqlx::query(
        "INSERT INTO employees (id, employee_type) VALUES (5, 'human'), (6, 'human')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let ctx = MigrationContext {
        db_pool: pool.clone(),
        dry_run: false,
    };
    let outcome = EnsurePrimaryHumanIdMigration.run(&ctx).await.unwrap();

    assert_eq!(outcome, MigrationOutcome::Skipped);
    assert_eq!(human_ids(&pool).await, vec![5, 6]);
}

#[tokio::test]
async fn dry_run_reports_without_writing() {
    let (_container, pool) = setup().await;
    seed_single_human_at(&pool, 7).await;

    let ctx = MigrationContext {
        db_pool: pool.clone(),
        dry_run: true,
    };
    let outcome = EnsurePrimaryHumanIdMigration.run(&ctx).await.unwrap();

    assert_eq!(outcome, MigrationOutcome::WouldMigrate);
    assert_eq!(human_ids(&pool).await, vec![7]);

    // Still outstanding, so verification reports it.
    match EnsurePrimaryHumanIdMigration.verify(&pool).await.unwrap() {
        VerifyResult::Failed { issues } => assert_eq!(issues.len(), 1),
        VerifyResult::Passed => panic!("expected verification to fail before the remap"),
    }
}
