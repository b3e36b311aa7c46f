//! Final hand-off of the record to an external collaborator.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{OnboardingRecord, RecordPatch};
use crate::errors::{SubmissionError, WizardError};

use super::controller::{NavigationState, SubmissionStart, Transition, WizardController};
use super::steps::WizardStep;

/// Acknowledgement returned by a collaborator that accepted the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SubmissionReceipt {
    pub fn new(location: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            location,
        }
    }
}

/// External collaborator that receives the finished record.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(SubmissionReceipt),
    /// Another submit call holds the lock; nothing was sent.
    AlreadyInFlight,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionEnvelope<'a> {
    id: Uuid,
    submitted_at: DateTime<Utc>,
    record: &'a OnboardingRecord,
}

/// Writes each submission as pretty JSON into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SubmissionSink for JsonFileSink {
    async fn submit(&self, record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let mut receipt = SubmissionReceipt::new(None);
        let path = self.dir.join(format!("onboarding-{}.json", receipt.id));
        let envelope = SubmissionEnvelope {
            id: receipt.id,
            submitted_at: receipt.submitted_at,
            record,
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        tokio::fs::write(&path, json).await?;
        debug!(path = %path.display(), "submission written");
        receipt.location = Some(path.display().to_string());
        Ok(receipt)
    }
}

/// Shareable wizard: the controller behind a lock plus its collaborator.
///
/// The lock is only held for synchronous transitions, never across the
/// collaborator call, so concurrent `submit` calls observe the in-flight
/// phase instead of blocking.
#[derive(Clone)]
pub struct WizardHandle {
    controller: Arc<Mutex<WizardController>>,
    sink: Arc<dyn SubmissionSink>,
    timeout: Option<Duration>,
}

impl WizardHandle {
    pub fn new(controller: WizardController, sink: Arc<dyn SubmissionSink>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            sink,
            timeout: None,
        }
    }

    /// Fails submissions whose collaborator takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn lock(&self) -> MutexGuard<'_, WizardController> {
        self.controller
            .lock()
            .expect("WizardController lock poisoned")
    }

    pub fn current_step(&self) -> WizardStep {
        self.lock().current_step()
    }

    pub fn record(&self) -> OnboardingRecord {
        self.lock().record().clone()
    }

    pub fn navigation(&self) -> NavigationState {
        self.lock().navigation()
    }

    pub fn merge_slice(&self, patch: RecordPatch) -> Result<(), WizardError> {
        self.lock().merge_slice(patch)
    }

    pub fn advance(&self) -> Result<Transition, WizardError> {
        self.lock().advance()
    }

    pub fn retreat(&self) -> Result<Transition, WizardError> {
        self.lock().retreat()
    }

    /// Sends the record to the collaborator once and awaits the result.
    ///
    /// Dropping the returned future before it resolves releases the lock as
    /// a failed attempt.
    pub async fn submit(&self) -> Result<SubmitOutcome, WizardError> {
        let start = self.lock().begin_submission()?;
        let record = match start {
            SubmissionStart::Ready(record) => record,
            SubmissionStart::InFlight => {
                debug!("submit ignored, another submission is in flight");
                return Ok(SubmitOutcome::AlreadyInFlight);
            }
        };
        let in_flight = InFlight::new(self);

        info!(step = %WizardStep::LAST, "submitting onboarding record");
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.sink.submit(&record))
                .await
                .unwrap_or(Err(SubmissionError::TimedOut(limit))),
            None => self.sink.submit(&record).await,
        };

        match result {
            Ok(receipt) => {
                in_flight.settle(true);
                info!(id = %receipt.id, "onboarding submitted");
                Ok(SubmitOutcome::Submitted(receipt))
            }
            Err(err) => {
                in_flight.settle(false);
                warn!(error = %err, "submission failed; record kept for retry");
                Err(WizardError::SubmissionFailure(err))
            }
        }
    }
}

/// Holds the submission lock for one `submit` call.
struct InFlight<'a> {
    handle: &'a WizardHandle,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn new(handle: &'a WizardHandle) -> Self {
        Self {
            handle,
            settled: false,
        }
    }

    fn settle(mut self, succeeded: bool) {
        self.settled = true;
        self.handle.lock().finish_submission(succeeded);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("submission abandoned before the collaborator answered");
        if let Ok(mut controller) = self.handle.controller.lock() {
            controller.finish_submission(false);
        }
    }
}
