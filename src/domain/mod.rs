//! Record shape and option catalogs for the onboarding flow.

pub mod catalog;
pub mod record;

pub use catalog::{parse_choice, Choice, CompanySize, Feature, Industry, Role, Theme, UnknownOption};
pub use record::{Field, OnboardingRecord, RecordPatch};
