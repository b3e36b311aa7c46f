//! Per-step validation schemas.
//!
//! Validators are pure: they look at a slice of the record and either hand it
//! back or describe what is wrong with each field. Nothing here touches the
//! wizard state, so every rule can be exercised on its own.

mod slices;

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::domain::{Field, OnboardingRecord};

pub use slices::{IdentitySlice, OrganizationSlice, PreferenceSlice, RoleSlice, Slice};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_USE_CASE_CHARS: usize = 10;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All failures for one slice, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure. The first message reported for a field wins.
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| ValidationError::new(*field, message.clone()))
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl FromIterator<ValidationError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for error in iter {
            errors.push(error.field, error.message);
        }
        errors
    }
}

/// Inclusive lower bound, counted in characters. No trimming.
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

const LOCAL_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

/// Accepts `local@domain`: a dot-atom local part, dot-separated domain labels
/// and an alphabetic top-level label of at least two characters.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    is_dot_atom(local) && is_domain(domain)
}

fn is_dot_atom(local: &str) -> bool {
    !local.is_empty()
        && local.split('.').all(|atom| {
            !atom.is_empty()
                && atom
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(ch))
        })
}

fn is_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some(tld) = labels.last() else {
        return false;
    };
    labels.len() >= 2
        && tld.chars().count() >= 2
        && tld.chars().all(|ch| ch.is_ascii_alphabetic())
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
        })
}

/// Validates the slice `S` as currently stored in `record`.
pub fn validate_slice<S: Slice>(record: &OnboardingRecord) -> Result<(), FieldErrors> {
    S::from_record(record).validate().map(|_| ())
}
