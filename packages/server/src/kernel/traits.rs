// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "reconcile the runner cron job") lives in kernel
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseCronGateway)

use async_trait::async_trait;
use openclaw_client::{CronJobDefinition, CronJobListing, OpenClawError};

// =============================================================================
// Cron Gateway Trait (Infrastructure - OpenClaw gateway cron API)
// =============================================================================

#[async_trait]
pub trait BaseCronGateway: Send + Sync {
    /// Fetch the gateway's current cron jobs
    async fn list_cron_jobs(&self) -> Result<CronJobListing, OpenClawError>;

    /// Create or replace a cron job, keyed by name.
    /// The gateway guarantees this is atomic and idempotent.
    async fn upsert_cron_job(&self, job: &CronJobDefinition) -> Result<(), OpenClawError>;
}
