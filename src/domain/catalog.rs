//! Fixed option catalogs offered by the onboarding steps.
//!
//! Each catalog is a closed enum. Values are what gets serialized into the
//! submitted record; labels are what the user sees. Both parse back, as does
//! a 1-based position in the catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::levenshtein;
use thiserror::Error;

const SUGGESTION_DISTANCE: usize = 3;

/// Behaviour shared by every catalog enum.
pub trait Choice: Copy + Eq + fmt::Debug + 'static {
    /// Human readable name of the catalog, used in error messages.
    const KIND: &'static str;
    /// Every option in display order.
    const ALL: &'static [Self];

    fn value(self) -> &'static str;

    fn label(self) -> &'static str;

    fn description(self) -> Option<&'static str> {
        None
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or_default()
    }
}

/// Raised when free text does not name any option of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{input}`{}", suggestion_hint(.suggestion))]
pub struct UnknownOption {
    pub kind: &'static str,
    pub input: String,
    pub suggestion: Option<&'static str>,
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(best) => format!(" (did you mean `{best}`?)"),
        None => String::new(),
    }
}

/// Resolves user input against a catalog.
pub fn parse_choice<T: Choice>(input: &str) -> Result<T, UnknownOption> {
    let needle = input.trim().to_lowercase();
    let needle = needle.as_str();

    if let Ok(index) = needle.parse::<usize>() {
        if let Some(option) = index.checked_sub(1).and_then(|i| T::ALL.get(i)) {
            return Ok(*option);
        }
    }

    if let Some(option) = T::ALL.iter().find(|option| {
        option.value().to_lowercase() == needle || option.label().to_lowercase() == needle
    }) {
        return Ok(*option);
    }

    let suggestion = T::ALL
        .iter()
        .flat_map(|option| {
            [option.value(), option.label()]
                .into_iter()
                .map(move |name| (levenshtein(&name.to_lowercase(), needle), *option))
        })
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .map(|(_, option)| option.value());

    Err(UnknownOption {
        kind: T::KIND,
        input: input.trim().to_string(),
        suggestion,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10 employees")]
    UpToTen,
    #[serde(rename = "11-50 employees")]
    UpToFifty,
    #[serde(rename = "51-200 employees")]
    UpToTwoHundred,
    #[serde(rename = "201-500 employees")]
    UpToFiveHundred,
    #[serde(rename = "501-1000 employees")]
    UpToThousand,
    #[serde(rename = "1000+ employees")]
    OverThousand,
}

impl Choice for CompanySize {
    const KIND: &'static str = "company size";
    const ALL: &'static [Self] = &[
        CompanySize::UpToTen,
        CompanySize::UpToFifty,
        CompanySize::UpToTwoHundred,
        CompanySize::UpToFiveHundred,
        CompanySize::UpToThousand,
        CompanySize::OverThousand,
    ];

    fn value(self) -> &'static str {
        match self {
            CompanySize::UpToTen => "1-10 employees",
            CompanySize::UpToFifty => "11-50 employees",
            CompanySize::UpToTwoHundred => "51-200 employees",
            CompanySize::UpToFiveHundred => "201-500 employees",
            CompanySize::UpToThousand => "501-1000 employees",
            CompanySize::OverThousand => "1000+ employees",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Retail,
    Manufacturing,
    #[serde(rename = "Media & Entertainment")]
    MediaEntertainment,
    Government,
    #[serde(rename = "Non-profit")]
    NonProfit,
    Other,
}

impl Choice for Industry {
    const KIND: &'static str = "industry";
    const ALL: &'static [Self] = &[
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Retail,
        Industry::Manufacturing,
        Industry::MediaEntertainment,
        Industry::Government,
        Industry::NonProfit,
        Industry::Other,
    ];

    fn value(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Retail => "Retail",
            Industry::Manufacturing => "Manufacturing",
            Industry::MediaEntertainment => "Media & Entertainment",
            Industry::Government => "Government",
            Industry::NonProfit => "Non-profit",
            Industry::Other => "Other",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Executive,
    Manager,
    Individual,
    Consultant,
}

impl Choice for Role {
    const KIND: &'static str = "role";
    const ALL: &'static [Self] = &[
        Role::Executive,
        Role::Manager,
        Role::Individual,
        Role::Consultant,
    ];

    fn value(self) -> &'static str {
        match self {
            Role::Executive => "executive",
            Role::Manager => "manager",
            Role::Individual => "individual",
            Role::Consultant => "consultant",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Role::Executive => "Executive / C-Level",
            Role::Manager => "Manager / Team Lead",
            Role::Individual => "Individual Contributor",
            Role::Consultant => "Consultant / Advisor",
        }
    }

    fn description(self) -> Option<&'static str> {
        Some(match self {
            Role::Executive => "Strategic decision maker for the organization",
            Role::Manager => "Responsible for team performance and outcomes",
            Role::Individual => "Hands-on professional focused on execution",
            Role::Consultant => "External expert providing specialized guidance",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Choice for Theme {
    const KIND: &'static str = "theme";
    const ALL: &'static [Self] = &[Theme::Light, Theme::Dark, Theme::System];

    fn value(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System Default",
        }
    }
}

/// Product features a user can opt into. Ordering follows the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Analytics,
    Collaboration,
    Automation,
    Integration,
    Mobile,
}

impl Choice for Feature {
    const KIND: &'static str = "feature";
    const ALL: &'static [Self] = &[
        Feature::Analytics,
        Feature::Collaboration,
        Feature::Automation,
        Feature::Integration,
        Feature::Mobile,
    ];

    fn value(self) -> &'static str {
        match self {
            Feature::Analytics => "analytics",
            Feature::Collaboration => "collaboration",
            Feature::Automation => "automation",
            Feature::Integration => "integration",
            Feature::Mobile => "mobile",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Feature::Analytics => "Analytics Dashboard",
            Feature::Collaboration => "Team Collaboration",
            Feature::Automation => "Workflow Automation",
            Feature::Integration => "Third-party Integrations",
            Feature::Mobile => "Mobile Access",
        }
    }

    fn description(self) -> Option<&'static str> {
        Some(match self {
            Feature::Analytics => "Access to detailed analytics and reporting",
            Feature::Collaboration => "Tools for working together with your team",
            Feature::Automation => "Automate repetitive tasks and processes",
            Feature::Integration => "Connect with your existing tools and services",
            Feature::Mobile => "Access your account on mobile devices",
        })
    }
}

macro_rules! impl_display_and_parse {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownOption;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_choice(s)
                }
            }
        )+
    };
}

impl_display_and_parse!(CompanySize, Industry, Role, Theme, Feature);
