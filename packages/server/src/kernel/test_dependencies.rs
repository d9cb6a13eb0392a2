// Test dependencies - mock implementations for testing
//
// Provides a mock gateway that can be injected into CronReconciler for tests.

use async_trait::async_trait;
use openclaw_client::{CronJobDefinition, CronJobListing, OpenClawError};
use serde_json::Value;
use std::sync::Mutex;

use super::traits::BaseCronGateway;

// =============================================================================
// Mock Cron Gateway
// =============================================================================

/// In-memory gateway double.
///
/// By default it behaves like a persisting gateway: upserted jobs are
/// stored (keyed by name) and served back by subsequent lists. Scripted
/// list responses can be queued with `with_list_response` to exercise the
/// raw wire shapes, and either operation can be made to fail.
pub struct MockCronGateway {
    list_responses: Mutex<Vec<Value>>,
    stored_jobs: Mutex<Vec<CronJobDefinition>>,
    upsert_calls: Mutex<Vec<CronJobDefinition>>,
    fail_list: bool,
    fail_upsert: bool,
}

impl MockCronGateway {
    pub fn new() -> Self {
        Self {
            list_responses: Mutex::new(Vec::new()),
            stored_jobs: Mutex::new(Vec::new()),
            upsert_calls: Mutex::new(Vec::new()),
            fail_list: false,
            fail_upsert: false,
        }
    }

    /// Queue a raw list response. Queued responses are consumed in order
    /// before the mock falls back to serving its stored jobs.
    pub fn with_list_response(self, response: Value) -> Self {
        self.list_responses.lock().unwrap().push(response);
        self
    }

    /// Make every list call fail.
    pub fn with_list_failure(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Make every upsert call fail.
    pub fn with_upsert_failure(mut self) -> Self {
        self.fail_upsert = true;
        self
    }

    /// All definitions passed to upsert, in call order.
    pub fn upsert_calls(&self) -> Vec<CronJobDefinition> {
        self.upsert_calls.lock().unwrap().clone()
    }

    /// Jobs currently persisted by the mock.
    pub fn stored_jobs(&self) -> Vec<CronJobDefinition> {
        self.stored_jobs.lock().unwrap().clone()
    }

    fn gateway_error() -> OpenClawError {
        OpenClawError::Api {
            status: 502,
            message: "gateway unavailable".to_string(),
        }
    }
}

impl Default for MockCronGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCronGateway for MockCronGateway {
    async fn list_cron_jobs(&self) -> Result<CronJobListing, OpenClawError> {
        if self.fail_list {
            return Err(Self::gateway_error());
        }

        let mut queued = self.list_responses.lock().unwrap();
        let value = if queued.is_empty() {
            serde_json::to_value(&*self.stored_jobs.lock().unwrap())
                .expect("stored jobs serialize")
        } else {
            queued.remove(0)
        };

        // CronJobListing has a catch-all variant, so this cannot fail for
        // any JSON value.
        Ok(serde_json::from_value(value).expect("listing deserializes"))
    }

    async fn upsert_cron_job(&self, job: &CronJobDefinition) -> Result<(), OpenClawError> {
        if self.fail_upsert {
            return Err(Self::gateway_error());
        }

        self.upsert_calls.lock().unwrap().push(job.clone());

        let mut stored = self.stored_jobs.lock().unwrap();
        match stored.iter_mut().find(|existing| existing.name == job.name) {
            Some(existing) => *existing = job.clone(),
            None => stored.push(job.clone()),
        }
        Ok(())
    }
}
