//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! This module provides periodic tasks that run on schedules:
//! - Reconciling the Mission Control runner cron job in the gateway
//!
//! # Architecture
//!
//! Each tick is independent and stateless; a tick that fails simply logs
//! and waits for the next one, so no retry logic lives here.
//!
//! ```text
//! Scheduler (every 10 minutes)
//!     │
//!     └─► CronReconciler::reconcile()
//!             └─► list → compare by name → upsert
//! ```

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::kernel::cron_jobs::CronReconciler;
use crate::kernel::traits::BaseCronGateway;

/// Start all scheduled tasks
pub async fn start_scheduler(gateway: Arc<dyn BaseCronGateway>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Gateway cron reconcile - runs every 10 minutes
    let reconcile_gateway = gateway.clone();
    let reconcile_job = Job::new_async("0 */10 * * * *", move |_uuid, _lock| {
        let gateway = reconcile_gateway.clone();
        Box::pin(async move {
            let outcome = CronReconciler::new(gateway).reconcile().await;
            tracing::debug!(?outcome, "Gateway cron reconcile tick complete");
        })
    })?;

    scheduler.add(reconcile_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (gateway cron reconcile every 10 minutes)");
    Ok(scheduler)
}
