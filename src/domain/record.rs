use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{CompanySize, Feature, Industry, Role, Theme};

/// Every field of the onboarding record, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    CompanyName,
    CompanySize,
    Industry,
    Role,
    UseCase,
    Notifications,
    Theme,
    Features,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::CompanyName,
        Field::CompanySize,
        Field::Industry,
        Field::Role,
        Field::UseCase,
        Field::Notifications,
        Field::Theme,
        Field::Features,
    ];

    /// Key used when the record is serialized.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::CompanyName => "companyName",
            Field::CompanySize => "companySize",
            Field::Industry => "industry",
            Field::Role => "role",
            Field::UseCase => "useCase",
            Field::Notifications => "notifications",
            Field::Theme => "theme",
            Field::Features => "features",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::CompanyName => "Company Name",
            Field::CompanySize => "Company Size",
            Field::Industry => "Industry",
            Field::Role => "Your Role",
            Field::UseCase => "Use Case",
            Field::Notifications => "Email Notifications",
            Field::Theme => "Theme Preference",
            Field::Features => "Selected Features",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The canonical data collected by the wizard.
///
/// Always fully populated: text fields start empty, catalog selections start
/// unselected and preferences start at their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_name: String,
    pub company_size: Option<CompanySize>,
    pub industry: Option<Industry>,
    pub role: Option<Role>,
    pub use_case: String,
    pub notifications: bool,
    pub theme: Theme,
    pub features: BTreeSet<Feature>,
}

impl Default for OnboardingRecord {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            company_name: String::new(),
            company_size: None,
            industry: None,
            role: None,
            use_case: String::new(),
            notifications: true,
            theme: Theme::System,
            features: BTreeSet::new(),
        }
    }
}

impl OnboardingRecord {
    /// Overwrites every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(value) = &patch.first_name {
            self.first_name = value.clone();
        }
        if let Some(value) = &patch.last_name {
            self.last_name = value.clone();
        }
        if let Some(value) = &patch.email {
            self.email = value.clone();
        }
        if let Some(value) = &patch.company_name {
            self.company_name = value.clone();
        }
        if let Some(value) = patch.company_size {
            self.company_size = Some(value);
        }
        if let Some(value) = patch.industry {
            self.industry = Some(value);
        }
        if let Some(value) = patch.role {
            self.role = Some(value);
        }
        if let Some(value) = &patch.use_case {
            self.use_case = value.clone();
        }
        if let Some(value) = patch.notifications {
            self.notifications = value;
        }
        if let Some(value) = patch.theme {
            self.theme = value;
        }
        if let Some(value) = &patch.features {
            self.features = value.clone();
        }
    }

    pub fn merged(&self, patch: &RecordPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

/// A partial record. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<CompanySize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeSet<Feature>>,
}

impl RecordPatch {
    /// Fields this patch would overwrite.
    pub fn fields(&self) -> BTreeSet<Field> {
        let present = [
            (Field::FirstName, self.first_name.is_some()),
            (Field::LastName, self.last_name.is_some()),
            (Field::Email, self.email.is_some()),
            (Field::CompanyName, self.company_name.is_some()),
            (Field::CompanySize, self.company_size.is_some()),
            (Field::Industry, self.industry.is_some()),
            (Field::Role, self.role.is_some()),
            (Field::UseCase, self.use_case.is_some()),
            (Field::Notifications, self.notifications.is_some()),
            (Field::Theme, self.theme.is_some()),
            (Field::Features, self.features.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(field, set)| set.then_some(field))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    pub fn is_disjoint(&self, other: &RecordPatch) -> bool {
        self.fields().is_disjoint(&other.fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_patch() -> RecordPatch {
        RecordPatch {
            first_name: Some("Jo".into()),
            last_name: Some("Doe".into()),
            email: Some("jo@x.co".into()),
            ..RecordPatch::default()
        }
    }

    fn preference_patch() -> RecordPatch {
        RecordPatch {
            theme: Some(Theme::Dark),
            features: Some(BTreeSet::from([Feature::Mobile])),
            ..RecordPatch::default()
        }
    }

    #[test]
    fn default_record_is_fully_populated() {
        let record = OnboardingRecord::default();
        assert!(record.first_name.is_empty());
        assert!(record.company_size.is_none());
        assert!(record.notifications);
        assert_eq!(record.theme, Theme::System);
        assert!(record.features.is_empty());

        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        for field in Field::ALL {
            assert!(object.contains_key(field.key()), "missing {}", field.key());
        }
    }

    #[test]
    fn apply_only_touches_present_keys() {
        let mut record = OnboardingRecord {
            company_name: "Acme".into(),
            ..OnboardingRecord::default()
        };
        record.apply(&identity_patch());
        assert_eq!(record.first_name, "Jo");
        assert_eq!(record.email, "jo@x.co");
        assert_eq!(record.company_name, "Acme");
        assert!(record.notifications);
    }

    #[test]
    fn apply_is_idempotent() {
        let once = OnboardingRecord::default().merged(&identity_patch());
        let twice = once.merged(&identity_patch());
        assert_eq!(once, twice);
    }

    #[test]
    fn disjoint_patches_commute() {
        let a = identity_patch();
        let b = preference_patch();
        assert!(a.is_disjoint(&b));
        let base = OnboardingRecord::default();
        assert_eq!(base.merged(&a).merged(&b), base.merged(&b).merged(&a));
    }

    #[test]
    fn patch_reports_its_fields() {
        assert_eq!(
            preference_patch().fields(),
            BTreeSet::from([Field::Theme, Field::Features])
        );
        assert!(RecordPatch::default().is_empty());
    }

    #[test]
    fn patch_skips_absent_keys_when_serialized() {
        let json = serde_json::to_string(&preference_patch()).unwrap();
        assert_eq!(json, r#"{"theme":"dark","features":["mobile"]}"#);
    }
}
