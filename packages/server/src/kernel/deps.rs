//! Gateway adapters (using traits for testability)
//!
//! Wraps the concrete OpenClaw client in the `BaseCronGateway` trait so the
//! reconciler can be tested against a mock gateway.

use async_trait::async_trait;
use openclaw_client::{CronJobDefinition, CronJobListing, OpenClawClient, OpenClawError};
use std::sync::Arc;

use crate::kernel::traits::BaseCronGateway;

/// Wrapper around OpenClawClient that implements BaseCronGateway
pub struct OpenClawAdapter(pub Arc<OpenClawClient>);

impl OpenClawAdapter {
    pub fn new(client: Arc<OpenClawClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseCronGateway for OpenClawAdapter {
    async fn list_cron_jobs(&self) -> Result<CronJobListing, OpenClawError> {
        self.0.list_cron_jobs().await
    }

    async fn upsert_cron_job(&self, job: &CronJobDefinition) -> Result<(), OpenClawError> {
        self.0.upsert_cron_job(job).await
    }
}
