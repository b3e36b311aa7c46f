//! Wizard state machine, step modules and the submission hand-off.

pub mod controller;
pub mod draft;
pub mod steps;
pub mod submission;
pub mod summary;

pub use controller::{
    NavigationState, PrimaryAction, SubmissionStart, Transition, WizardController, WizardPhase,
};
pub use draft::{DraftStatus, MergeCallback, StepDraft};
pub use steps::{StepDefinition, StepKind, WizardStep};
pub use submission::{
    JsonFileSink, SubmissionReceipt, SubmissionSink, SubmitOutcome, WizardHandle,
};
pub use summary::{SummaryEntry, SummarySection, SummaryView};
