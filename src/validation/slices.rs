use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{
    CompanySize, Feature, Field, Industry, OnboardingRecord, RecordPatch, Role, Theme,
};

use super::{has_min_chars, is_valid_email, FieldErrors, MIN_NAME_CHARS, MIN_USE_CASE_CHARS};

/// The subset of record fields owned by one wizard step.
pub trait Slice: Clone + fmt::Debug + PartialEq {
    /// Fields this slice reads and writes, in display order.
    const FIELDS: &'static [Field];

    fn from_record(record: &OnboardingRecord) -> Self;

    /// Returns the slice unchanged when every constraint holds.
    fn validate(&self) -> Result<Self, FieldErrors>;

    fn to_patch(&self) -> RecordPatch;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySlice {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Slice for IdentitySlice {
    const FIELDS: &'static [Field] = &[Field::FirstName, Field::LastName, Field::Email];

    fn from_record(record: &OnboardingRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
        }
    }

    fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !has_min_chars(&self.first_name, MIN_NAME_CHARS) {
            errors.push(
                Field::FirstName,
                "First name must be at least 2 characters",
            );
        }
        if !has_min_chars(&self.last_name, MIN_NAME_CHARS) {
            errors.push(Field::LastName, "Last name must be at least 2 characters");
        }
        if !is_valid_email(&self.email) {
            errors.push(Field::Email, "Please enter a valid email address");
        }
        errors.into_result(self.clone())
    }

    fn to_patch(&self) -> RecordPatch {
        RecordPatch {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            ..RecordPatch::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationSlice {
    pub name: String,
    pub size: Option<CompanySize>,
    pub industry: Option<Industry>,
}

impl Slice for OrganizationSlice {
    const FIELDS: &'static [Field] = &[Field::CompanyName, Field::CompanySize, Field::Industry];

    fn from_record(record: &OnboardingRecord) -> Self {
        Self {
            name: record.company_name.clone(),
            size: record.company_size,
            industry: record.industry,
        }
    }

    fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !has_min_chars(&self.name, MIN_NAME_CHARS) {
            errors.push(
                Field::CompanyName,
                "Company name must be at least 2 characters",
            );
        }
        if self.size.is_none() {
            errors.push(Field::CompanySize, "Please select a company size");
        }
        if self.industry.is_none() {
            errors.push(Field::Industry, "Please select an industry");
        }
        errors.into_result(self.clone())
    }

    fn to_patch(&self) -> RecordPatch {
        RecordPatch {
            company_name: Some(self.name.clone()),
            company_size: self.size,
            industry: self.industry,
            ..RecordPatch::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSlice {
    pub role: Option<Role>,
    pub use_case: String,
}

impl Slice for RoleSlice {
    const FIELDS: &'static [Field] = &[Field::Role, Field::UseCase];

    fn from_record(record: &OnboardingRecord) -> Self {
        Self {
            role: record.role,
            use_case: record.use_case.clone(),
        }
    }

    fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.role.is_none() {
            errors.push(Field::Role, "Please select your role");
        }
        if !has_min_chars(&self.use_case, MIN_USE_CASE_CHARS) {
            errors.push(
                Field::UseCase,
                "Please describe your use case in at least 10 characters",
            );
        }
        errors.into_result(self.clone())
    }

    fn to_patch(&self) -> RecordPatch {
        RecordPatch {
            role: self.role,
            use_case: Some(self.use_case.clone()),
            ..RecordPatch::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSlice {
    pub notifications: bool,
    pub theme: Theme,
    pub features: BTreeSet<Feature>,
}

impl Default for PreferenceSlice {
    fn default() -> Self {
        Self::from_record(&OnboardingRecord::default())
    }
}

impl PreferenceSlice {
    /// Adds the feature when absent, removes it otherwise.
    pub fn toggle_feature(&mut self, feature: Feature) {
        if !self.features.remove(&feature) {
            self.features.insert(feature);
        }
    }
}

impl Slice for PreferenceSlice {
    const FIELDS: &'static [Field] = &[Field::Notifications, Field::Theme, Field::Features];

    fn from_record(record: &OnboardingRecord) -> Self {
        Self {
            notifications: record.notifications,
            theme: record.theme,
            features: record.features.clone(),
        }
    }

    fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.features.is_empty() {
            errors.push(Field::Features, "Please select at least one feature");
        }
        errors.into_result(self.clone())
    }

    fn to_patch(&self) -> RecordPatch {
        RecordPatch {
            notifications: Some(self.notifications),
            theme: Some(self.theme),
            features: Some(self.features.clone()),
            ..RecordPatch::default()
        }
    }
}
