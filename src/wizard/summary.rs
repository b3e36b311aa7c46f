use crate::domain::{Choice, Field, OnboardingRecord};

use super::steps::{StepKind, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub step: WizardStep,
    pub title: &'static str,
    pub entries: Vec<SummaryEntry>,
}

/// Read-only review of the whole record, one section per form step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub sections: Vec<SummarySection>,
}

impl SummaryView {
    pub fn from_record(record: &OnboardingRecord) -> Self {
        let sections = WizardStep::ALL
            .iter()
            .map(|step| step.definition())
            .filter(|definition| definition.kind == StepKind::Form)
            .map(|definition| SummarySection {
                step: definition.step,
                title: definition.title,
                entries: definition
                    .fields
                    .iter()
                    .map(|field| SummaryEntry {
                        field: *field,
                        label: field.label(),
                        value: display_value(record, *field),
                    })
                    .collect(),
            })
            .collect();
        Self { sections }
    }
}

fn label_or_blank<T: Choice>(value: Option<T>) -> String {
    value.map(|v| v.label().to_string()).unwrap_or_default()
}

fn display_value(record: &OnboardingRecord, field: Field) -> String {
    match field {
        Field::FirstName => record.first_name.clone(),
        Field::LastName => record.last_name.clone(),
        Field::Email => record.email.clone(),
        Field::CompanyName => record.company_name.clone(),
        Field::CompanySize => label_or_blank(record.company_size),
        Field::Industry => label_or_blank(record.industry),
        Field::Role => label_or_blank(record.role),
        Field::UseCase => record.use_case.clone(),
        Field::Notifications => {
            let state = if record.notifications {
                "Enabled"
            } else {
                "Disabled"
            };
            state.to_string()
        }
        Field::Theme => record.theme.label().to_string(),
        Field::Features => record
            .features
            .iter()
            .map(|feature| feature.label())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
