//! Pure OpenClaw gateway REST API client.
//!
//! A minimal client for the OpenClaw gateway's cron API. Supports listing
//! the gateway's recurring jobs and upserting a job definition keyed by
//! name. The upsert is create-or-replace and is atomic on the gateway
//! side, so callers never observe partial writes.
//!
//! # Example
//!
//! ```rust,ignore
//! use openclaw_client::OpenClawClient;
//!
//! let client = OpenClawClient::new("http://127.0.0.1:18789".into(), None)?;
//!
//! let listing = client.list_cron_jobs().await?;
//! for job in listing.into_records() {
//!     println!("{}", job.name.as_deref().unwrap_or("(unnamed)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{OpenClawError, Result};
pub use types::{
    CronJobDefinition, CronJobListing, CronJobRecord, CronPayload, CronSchedule, SessionTarget,
};

use std::time::Duration;

/// Request timeout for all gateway calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenClawClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl OpenClawClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetch the gateway's current cron jobs.
    ///
    /// The listing arrives in one of two known shapes (bare array or
    /// `{"jobs": [...]}`); both are preserved for the caller to normalize
    /// via [`CronJobListing::into_records`].
    pub async fn list_cron_jobs(&self) -> Result<CronJobListing> {
        let url = format!("{}/api/cron/jobs", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OpenClawError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let listing: CronJobListing = resp.json().await?;
        Ok(listing)
    }

    /// Create or replace a cron job, keyed by `job.name`.
    pub async fn upsert_cron_job(&self, job: &CronJobDefinition) -> Result<()> {
        let url = format!("{}/api/cron/jobs", self.base_url);
        let mut request = self.client.post(&url).json(job);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OpenClawError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(name = %job.name, "Upserted gateway cron job");
        Ok(())
    }
}
