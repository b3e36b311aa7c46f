#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use onboarding_core::{
    domain::{CompanySize, Feature, Industry, Role, Theme},
    wizard::{SubmissionReceipt, SubmissionSink},
    OnboardingRecord, RecordPatch, SubmissionError, WizardController, WizardStep,
};
use tokio::sync::Notify;

pub fn identity_patch() -> RecordPatch {
    RecordPatch {
        first_name: Some("Jo".into()),
        last_name: Some("Doe".into()),
        email: Some("jo@x.co".into()),
        ..RecordPatch::default()
    }
}

pub fn organization_patch() -> RecordPatch {
    RecordPatch {
        company_name: Some("Acme".into()),
        company_size: Some(CompanySize::UpToFifty),
        industry: Some(Industry::Technology),
        ..RecordPatch::default()
    }
}

pub fn role_patch() -> RecordPatch {
    RecordPatch {
        role: Some(Role::Manager),
        use_case: Some("Track team onboarding".into()),
        ..RecordPatch::default()
    }
}

pub fn preference_patch() -> RecordPatch {
    RecordPatch {
        notifications: Some(false),
        theme: Some(Theme::Dark),
        features: Some(BTreeSet::from([Feature::Analytics])),
        ..RecordPatch::default()
    }
}

/// A controller parked on the summary step with every slice filled in.
pub fn controller_on_summary() -> WizardController {
    let mut controller = WizardController::new();
    for patch in [
        identity_patch(),
        organization_patch(),
        role_patch(),
        preference_patch(),
    ] {
        controller.merge_slice(patch).expect("merge while editing");
        controller.advance().expect("step validates");
    }
    assert_eq!(controller.current_step(), WizardStep::Summary);
    controller
}

/// Accepts every record and remembers what it saw.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<OnboardingRecord>>,
}

impl RecordingSink {
    pub fn calls(&self) -> usize {
        self.records.lock().expect("sink lock").len()
    }

    pub fn records(&self) -> Vec<OnboardingRecord> {
        self.records.lock().expect("sink lock").clone()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn submit(&self, record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError> {
        self.records.lock().expect("sink lock").push(record.clone());
        Ok(SubmissionReceipt::new(None))
    }
}

/// Rejects the first `failures` calls, then accepts.
pub struct FlakySink {
    failures: AtomicUsize,
    calls: AtomicUsize,
}

impl FlakySink {
    pub fn new(failures: usize) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionSink for FlakySink {
    async fn submit(&self, _record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(SubmissionError::Rejected("service unavailable".into()));
        }
        Ok(SubmissionReceipt::new(None))
    }
}

/// Blocks inside `submit` until released, so tests can observe the in-flight phase.
#[derive(Default)]
pub struct GatedSink {
    pub entered: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl GatedSink {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionSink for GatedSink {
    async fn submit(&self, _record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(SubmissionReceipt::new(None))
    }
}

/// Never answers within any reasonable timeout.
pub struct StalledSink;

#[async_trait]
impl SubmissionSink for StalledSink {
    async fn submit(&self, _record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(SubmissionReceipt::new(None))
    }
}

pub fn shared<S: SubmissionSink + 'static>(sink: S) -> Arc<S> {
    Arc::new(sink)
}
