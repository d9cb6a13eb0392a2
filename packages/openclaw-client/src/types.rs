//! Wire types for the gateway cron API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cron job definition as the gateway stores it.
///
/// `name` is the unique key: upserting a definition whose name already
/// exists replaces that job in place. No other field participates in
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobDefinition {
    pub name: String,
    pub schedule: CronSchedule,
    pub session_target: SessionTarget,
    pub enabled: bool,
    pub payload: CronPayload,
}

/// When the gateway should fire the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CronSchedule {
    /// Fixed interval in milliseconds.
    Every { every_ms: u64 },
}

/// Which session the gateway runs the job in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionTarget {
    Main,
    Isolated,
}

/// The message delivered when the job fires. Opaque to this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronPayload {
    pub kind: String,
    pub message: String,
}

/// Response shape of the cron list endpoint.
///
/// Gateways have shipped two shapes for this endpoint: a bare array of
/// jobs, and an object wrapping the array in a `jobs` field. Anything
/// else deserializes into `Other` and normalizes to an empty listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CronJobListing {
    Jobs(Vec<CronJobRecord>),
    Wrapped { jobs: Vec<CronJobRecord> },
    Other(Value),
}

impl CronJobListing {
    /// Normalize into a flat sequence of records.
    pub fn into_records(self) -> Vec<CronJobRecord> {
        match self {
            CronJobListing::Jobs(jobs) => jobs,
            CronJobListing::Wrapped { jobs } => jobs,
            CronJobListing::Other(_) => Vec::new(),
        }
    }
}

/// One job record as returned by the gateway.
///
/// Only `name` is interpreted; every other field rides along untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct CronJobRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
