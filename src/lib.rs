#![doc(test(attr(deny(warnings))))]

//! Onboarding Core models a multi-step onboarding wizard: per-step validation
//! schemas, a gated step state machine over one canonical record, and the
//! final hand-off of that record to a submission collaborator.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod utils;
pub mod validation;
pub mod wizard;

use std::sync::Once;

pub use domain::{OnboardingRecord, RecordPatch};
pub use errors::{SubmissionError, WizardError};
pub use wizard::{WizardController, WizardHandle, WizardStep};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Onboarding Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
