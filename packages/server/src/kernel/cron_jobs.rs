//! Gateway cron job reconciliation.
//!
//! The Mission Control runner is driven by a single recurring job stored in
//! the OpenClaw gateway. This module owns the desired definition of that
//! job and the reconcile pass that keeps the gateway in line with it.
//!
//! # Architecture
//!
//! ```text
//! Tick (startup + every 10 minutes)
//!     │
//!     └─► CronReconciler::reconcile()
//!             ├─► list_cron_jobs()  ── failed? log + skip, try again next tick
//!             ├─► match desired name against listing
//!             └─► upsert_cron_job(desired)
//! ```
//!
//! The reconciler never retries within a tick and never raises: the tick
//! is externally scheduled, so a failed pass simply waits for the next one.
//! Create vs update is decided for logging only; the write is always the
//! same upsert, and the gateway owns its atomicity. Two overlapping ticks
//! therefore race harmlessly.

use std::sync::Arc;
use tracing::{info, warn};

use openclaw_client::{CronJobDefinition, CronPayload, CronSchedule, SessionTarget};

use crate::kernel::traits::BaseCronGateway;

/// Name of the single cron job this worker manages. Stable identity key.
pub const MISSION_CONTROL_CRON_NAME: &str = "mission-control-runner/10m";

/// Runner cadence: every 10 minutes.
const MISSION_CONTROL_CRON_INTERVAL_MS: u64 = 600_000;

fn mission_control_runner_message() -> String {
    concat!(
        "You are the Mission Control Runner agent.\n\n",
        "On this scheduled tick:\n",
        "- Run the HEARTBEAT.md procedure for Mission Control (check-in, list boards, ",
        "list tasks).\n",
        "- If any task is already in_progress, stop (do not claim another).\n",
        "- Otherwise, find the oldest inbox task across all boards, claim it by moving ",
        "to in_progress.\n",
        "- Execute the task fully.\n",
        "- When complete, move it to review.\n",
        "- If no inbox tasks exist, do nothing.\n",
        "Only update Mission Control (no chat messages)."
    )
    .to_string()
}

/// Build the desired definition of the Mission Control runner job.
///
/// Pure and deterministic; rebuilt fresh on every tick rather than cached.
pub fn build_mission_control_cron_job() -> CronJobDefinition {
    CronJobDefinition {
        name: MISSION_CONTROL_CRON_NAME.to_string(),
        schedule: CronSchedule::Every {
            every_ms: MISSION_CONTROL_CRON_INTERVAL_MS,
        },
        session_target: SessionTarget::Isolated,
        enabled: true,
        payload: CronPayload {
            kind: "agentTurn".to_string(),
            message: mission_control_runner_message(),
        },
    }
}

/// What a reconcile pass did. Used for logging, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No job with the desired name existed; one was written.
    Created,
    /// A job with the desired name existed; it was replaced.
    Updated,
    /// Listing the gateway failed; no write was attempted.
    SkippedListFailed,
    /// Listing succeeded but the upsert failed.
    SkippedUpsertFailed,
}

/// Keeps the runner cron job present and correct in the gateway.
pub struct CronReconciler {
    gateway: Arc<dyn BaseCronGateway>,
}

impl CronReconciler {
    pub fn new(gateway: Arc<dyn BaseCronGateway>) -> Self {
        Self { gateway }
    }

    /// Run one reconcile pass.
    ///
    /// Fail-soft: gateway errors are logged at warn level and folded into
    /// the outcome. If the listing cannot be fetched, no upsert is
    /// attempted; writing blind could duplicate the job or mask an outage.
    pub async fn reconcile(&self) -> ReconcileOutcome {
        let desired = build_mission_control_cron_job();

        let listing = match self.gateway.list_cron_jobs().await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Gateway cron list failed: {}", e);
                return ReconcileOutcome::SkippedListFailed;
            }
        };

        // Name is the only identity; schedule/payload differences do not
        // matter here, the upsert overwrites them wholesale.
        let exists = listing
            .into_records()
            .iter()
            .any(|record| record.name.as_deref() == Some(desired.name.as_str()));

        if exists {
            info!("Updating gateway cron job: {}", desired.name);
        } else {
            info!("Creating gateway cron job: {}", desired.name);
        }

        if let Err(e) = self.gateway.upsert_cron_job(&desired).await {
            warn!("Gateway cron upsert failed: {}", e);
            return ReconcileOutcome::SkippedUpsertFailed;
        }

        if exists {
            ReconcileOutcome::Updated
        } else {
            ReconcileOutcome::Created
        }
    }
}
