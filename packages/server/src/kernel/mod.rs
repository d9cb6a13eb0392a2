//! Kernel module - worker infrastructure and dependencies.

pub mod cron_jobs;
pub mod deps;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use cron_jobs::{
    build_mission_control_cron_job, CronReconciler, ReconcileOutcome, MISSION_CONTROL_CRON_NAME,
};
pub use deps::OpenClawAdapter;
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::MockCronGateway;
pub use traits::*;
