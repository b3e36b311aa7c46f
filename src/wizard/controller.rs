use tracing::{debug, warn};

use crate::domain::{Field, OnboardingRecord, RecordPatch};
use crate::errors::WizardError;
use crate::validation::FieldErrors;

use super::steps::WizardStep;

/// Where the wizard is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitting,
    Submitted,
}

/// Result of a navigation request that passed its gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: WizardStep, to: WizardStep },
    Stayed(WizardStep),
}

/// Outcome of [`WizardController::begin_submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStart {
    /// Lock taken; the snapshot must be handed to the collaborator.
    Ready(OnboardingRecord),
    /// Another submission holds the lock.
    InFlight,
}

/// The primary button offered on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Continue,
    Submit,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::Continue => "Continue",
            PrimaryAction::Submit => "Complete Setup",
        }
    }
}

/// Snapshot consumed by navigation and progress renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current: WizardStep,
    pub total: usize,
    pub can_retreat: bool,
    pub primary: PrimaryAction,
    pub submitting: bool,
}

impl NavigationState {
    /// Completion in percent, 0 on the first step and 100 on the last.
    pub fn percent(&self) -> usize {
        if self.total <= 1 {
            return 100;
        }
        self.current.index() * 100 / (self.total - 1)
    }
}

/// Owns the canonical record and the current step.
#[derive(Debug, Clone)]
pub struct WizardController {
    record: OnboardingRecord,
    step: WizardStep,
    phase: WizardPhase,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            record: OnboardingRecord::default(),
            step: WizardStep::FIRST,
            phase: WizardPhase::Editing,
        }
    }

    pub fn record(&self) -> &OnboardingRecord {
        &self.record
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn navigation(&self) -> NavigationState {
        NavigationState {
            current: self.step,
            total: WizardStep::COUNT,
            can_retreat: !self.step.is_first() && self.phase == WizardPhase::Editing,
            primary: if self.step.is_last() {
                PrimaryAction::Submit
            } else {
                PrimaryAction::Continue
            },
            submitting: self.phase == WizardPhase::Submitting,
        }
    }

    fn ensure_editing(&self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Submitting => Err(WizardError::SubmissionInProgress),
            WizardPhase::Submitted => Err(WizardError::AlreadySubmitted),
        }
    }

    /// Overwrites the keys present in `patch`. Only fields owned by the
    /// current step may be written.
    pub fn merge_slice(&mut self, patch: RecordPatch) -> Result<(), WizardError> {
        self.ensure_editing()?;
        let owned = self.step.definition().fields;
        let foreign: Vec<Field> = patch
            .fields()
            .into_iter()
            .filter(|field| !owned.contains(field))
            .collect();
        if !foreign.is_empty() {
            warn!(step = %self.step, ?foreign, "merge outside the current step");
            return Err(WizardError::FieldsOutsideStep {
                step: self.step,
                fields: foreign,
            });
        }
        debug!(step = %self.step, fields = ?patch.fields(), "merging slice");
        self.record.apply(&patch);
        Ok(())
    }

    pub fn current_step_errors(&self) -> Result<(), FieldErrors> {
        self.step.validate(&self.record)
    }

    pub fn is_current_step_valid(&self) -> bool {
        self.current_step_errors().is_ok()
    }

    fn gate(&self) -> Result<(), WizardError> {
        self.current_step_errors().map_err(|errors| {
            warn!(step = %self.step, %errors, "step gate rejected");
            WizardError::ValidationIncomplete {
                step: self.step,
                errors,
            }
        })
    }

    /// Moves forward one step when the current step validates.
    pub fn advance(&mut self) -> Result<Transition, WizardError> {
        self.ensure_editing()?;
        self.gate()?;
        let Some(next) = self.step.next() else {
            return Ok(Transition::Stayed(self.step));
        };
        let from = std::mem::replace(&mut self.step, next);
        debug!(%from, to = %next, "advanced");
        Ok(Transition::Moved { from, to: next })
    }

    /// Moves back one step. Never validates.
    pub fn retreat(&mut self) -> Result<Transition, WizardError> {
        self.ensure_editing()?;
        let Some(previous) = self.step.previous() else {
            return Ok(Transition::Stayed(self.step));
        };
        let from = std::mem::replace(&mut self.step, previous);
        debug!(%from, to = %previous, "retreated");
        Ok(Transition::Moved { from, to: previous })
    }

    /// Takes the submission lock after re-running the gate.
    ///
    /// A second call while a submission is running reports
    /// [`SubmissionStart::InFlight`] and changes nothing.
    pub fn begin_submission(&mut self) -> Result<SubmissionStart, WizardError> {
        match self.phase {
            WizardPhase::Submitting => return Ok(SubmissionStart::InFlight),
            WizardPhase::Submitted => return Err(WizardError::AlreadySubmitted),
            WizardPhase::Editing => {}
        }
        if !self.step.is_last() {
            return Err(WizardError::NotOnFinalStep { step: self.step });
        }
        self.gate()?;
        self.phase = WizardPhase::Submitting;
        Ok(SubmissionStart::Ready(self.record.clone()))
    }

    /// Releases the submission lock. Success is terminal; failure returns to
    /// editing on the summary step with the record intact.
    pub fn finish_submission(&mut self, succeeded: bool) {
        if self.phase != WizardPhase::Submitting {
            return;
        }
        self.phase = if succeeded {
            WizardPhase::Submitted
        } else {
            WizardPhase::Editing
        };
    }
}
