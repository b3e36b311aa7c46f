//! Step modules: private, possibly invalid working copies of one slice.
//!
//! A draft is seeded from the canonical record, re-validated on every edit
//! and pushed upward through its merge callback only while it validates.
//! Half-typed values stay here and never reach the controller.

use crate::domain::{Field, OnboardingRecord, RecordPatch};
use crate::validation::{FieldErrors, Slice};

/// Receives the slice patch each time the draft becomes (or stays) valid.
pub type MergeCallback<'a> = Box<dyn FnMut(RecordPatch) + 'a>;

/// What happened to the canonical record after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStatus {
    Merged,
    Invalid,
}

pub struct StepDraft<'a, S: Slice> {
    draft: S,
    errors: FieldErrors,
    on_merge: MergeCallback<'a>,
}

impl<'a, S: Slice> StepDraft<'a, S> {
    /// Seeds the draft from `record`. Nothing is merged until the first edit.
    pub fn new(record: &OnboardingRecord, on_merge: impl FnMut(RecordPatch) + 'a) -> Self {
        let draft = S::from_record(record);
        let errors = draft.validate().err().unwrap_or_default();
        Self {
            draft,
            errors,
            on_merge: Box::new(on_merge),
        }
    }

    pub fn draft(&self) -> &S {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Applies `change` to the draft, re-validates, and merges when valid.
    pub fn edit(&mut self, change: impl FnOnce(&mut S)) -> DraftStatus {
        change(&mut self.draft);
        match self.draft.validate() {
            Ok(valid) => {
                self.errors = FieldErrors::new();
                (self.on_merge)(valid.to_patch());
                DraftStatus::Merged
            }
            Err(errors) => {
                self.errors = errors;
                DraftStatus::Invalid
            }
        }
    }
}
