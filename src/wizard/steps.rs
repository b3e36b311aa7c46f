//! Step lookup table.
//!
//! Every step is described once here: its title, the fields it owns and the
//! validator that gates leaving it. The controller and the renderers both
//! dispatch through [`WizardStep::definition`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Field, OnboardingRecord};
use crate::validation::{
    validate_slice, FieldErrors, IdentitySlice, OrganizationSlice, PreferenceSlice, RoleSlice,
    Slice,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Profile,
    Organization,
    Role,
    Preferences,
    Summary,
}

/// Whether a step edits a slice or only reviews the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Form,
    Review,
}

type StepValidator = fn(&OnboardingRecord) -> Result<(), FieldErrors>;

pub struct StepDefinition {
    pub step: WizardStep,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub kind: StepKind,
    pub fields: &'static [Field],
    validator: StepValidator,
}

impl StepDefinition {
    pub fn validate(&self, record: &OnboardingRecord) -> Result<(), FieldErrors> {
        (self.validator)(record)
    }
}

fn review_only(_record: &OnboardingRecord) -> Result<(), FieldErrors> {
    Ok(())
}

static STEPS: [StepDefinition; WizardStep::COUNT] = [
    StepDefinition {
        step: WizardStep::Profile,
        title: "Personal Information",
        subtitle: "Let's start with some basic information about you",
        kind: StepKind::Form,
        fields: IdentitySlice::FIELDS,
        validator: validate_slice::<IdentitySlice>,
    },
    StepDefinition {
        step: WizardStep::Organization,
        title: "Company Details",
        subtitle: "Tell us about your organization",
        kind: StepKind::Form,
        fields: OrganizationSlice::FIELDS,
        validator: validate_slice::<OrganizationSlice>,
    },
    StepDefinition {
        step: WizardStep::Role,
        title: "Role & Use Case",
        subtitle: "Help us understand how you'll use our platform",
        kind: StepKind::Form,
        fields: RoleSlice::FIELDS,
        validator: validate_slice::<RoleSlice>,
    },
    StepDefinition {
        step: WizardStep::Preferences,
        title: "Preferences",
        subtitle: "Customize your experience with our platform",
        kind: StepKind::Form,
        fields: PreferenceSlice::FIELDS,
        validator: validate_slice::<PreferenceSlice>,
    },
    StepDefinition {
        step: WizardStep::Summary,
        title: "Summary",
        subtitle: "Please review your information before completing the setup",
        kind: StepKind::Review,
        fields: &[],
        validator: review_only,
    },
];

impl WizardStep {
    pub const COUNT: usize = 5;
    pub const ALL: [WizardStep; WizardStep::COUNT] = [
        WizardStep::Profile,
        WizardStep::Organization,
        WizardStep::Role,
        WizardStep::Preferences,
        WizardStep::Summary,
    ];

    pub const FIRST: WizardStep = WizardStep::Profile;
    pub const LAST: WizardStep = WizardStep::Summary;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn definition(self) -> &'static StepDefinition {
        &STEPS[self.index()]
    }

    pub fn title(self) -> &'static str {
        self.definition().title
    }

    pub fn validate(self, record: &OnboardingRecord) -> Result<(), FieldErrors> {
        self.definition().validate(record)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_step() {
        for (index, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), index);
            assert_eq!(step.definition().step, *step);
            assert_eq!(WizardStep::from_index(index), Some(*step));
        }
        assert_eq!(WizardStep::from_index(WizardStep::COUNT), None);
    }

    #[test]
    fn neighbours_move_by_one() {
        assert_eq!(WizardStep::Profile.previous(), None);
        assert_eq!(WizardStep::Profile.next(), Some(WizardStep::Organization));
        assert_eq!(WizardStep::Summary.next(), None);
        assert_eq!(WizardStep::Summary.previous(), Some(WizardStep::Preferences));
    }

    #[test]
    fn only_summary_reviews() {
        let reviews: Vec<_> = WizardStep::ALL
            .iter()
            .filter(|step| step.definition().kind == StepKind::Review)
            .collect();
        assert_eq!(reviews, vec![&WizardStep::Summary]);
    }

    #[test]
    fn summary_is_always_valid() {
        assert!(WizardStep::Summary
            .validate(&OnboardingRecord::default())
            .is_ok());
    }

    #[test]
    fn form_steps_reject_defaults() {
        let record = OnboardingRecord::default();
        for step in [
            WizardStep::Profile,
            WizardStep::Organization,
            WizardStep::Role,
            WizardStep::Preferences,
        ] {
            let errors = step.validate(&record).unwrap_err();
            assert!(
                errors.fields().all(|field| step.definition().fields.contains(&field)),
                "{step} reported a field it does not own"
            );
        }
    }

    #[test]
    fn titles_match_progress_labels() {
        let titles: Vec<_> = WizardStep::ALL.iter().map(|step| step.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Personal Information",
                "Company Details",
                "Role & Use Case",
                "Preferences",
                "Summary"
            ]
        );
    }
}
