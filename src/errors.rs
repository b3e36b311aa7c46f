use std::time::Duration;

use thiserror::Error;

use crate::domain::Field;
use crate::validation::FieldErrors;
use crate::wizard::WizardStep;

/// Failures raised by the wizard state machine.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Please fill out all required fields before proceeding ({step}): {errors}")]
    ValidationIncomplete {
        step: WizardStep,
        errors: FieldErrors,
    },
    #[error("Submission is only available from the summary step (currently on {step})")]
    NotOnFinalStep { step: WizardStep },
    #[error("The {step} step does not own fields {fields:?}")]
    FieldsOutsideStep { step: WizardStep, fields: Vec<Field> },
    #[error("A submission is already in progress")]
    SubmissionInProgress,
    #[error("Onboarding has already been submitted")]
    AlreadySubmitted,
    #[error("Submission failed: {0}")]
    SubmissionFailure(#[from] SubmissionError),
}

impl WizardError {
    /// Whether the user can try the same action again without re-entering data.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WizardError::ValidationIncomplete { .. } | WizardError::SubmissionFailure(_)
        )
    }
}

/// Failures reported by a submission collaborator.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Error type that captures configuration load/save failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors surfaced by the terminal front-end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}
