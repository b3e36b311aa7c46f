mod common;

use insta::assert_snapshot;
use onboarding_core::{
    cli::render::{navigation_line, progress_lines, summary_lines},
    wizard::SummaryView,
    OnboardingRecord, WizardController,
};

#[test]
fn progress_on_the_second_step() {
    let mut controller = WizardController::new();
    controller.merge_slice(common::identity_patch()).unwrap();
    controller.advance().unwrap();
    let nav = controller.navigation();

    assert_snapshot!(progress_lines(&nav).join("\n"), @r###"
Step 2 of 5 — Company Details
[#####---------------]  25%
✓ Personal Information  ● Company Details  ○ Role & Use Case  ○ Preferences  ○ Summary
"###);
    assert_eq!(navigation_line(&nav), "← Back  |  Continue →");
}

#[test]
fn summary_step_offers_complete_setup() {
    let controller = common::controller_on_summary();
    let nav = controller.navigation();

    assert_eq!(progress_lines(&nav)[1], "[####################] 100%");
    assert_eq!(navigation_line(&nav), "← Back  |  Complete Setup →");
}

#[test]
fn summary_lists_each_section() {
    let controller = common::controller_on_summary();
    let view = SummaryView::from_record(controller.record());

    assert_snapshot!(summary_lines(&view).join("\n"), @r###"
Personal Information
  First Name           Jo
  Last Name            Doe
  Email                jo@x.co
Company Details
  Company Name         Acme
  Company Size         11-50 employees
  Industry             Technology
Role & Use Case
  Your Role            Manager / Team Lead
  Use Case             Track team onboarding
Preferences
  Email Notifications  Disabled
  Theme Preference     Dark
  Selected Features    Analytics Dashboard
"###);
}

#[test]
fn unfilled_fields_are_marked() {
    let view = SummaryView::from_record(&OnboardingRecord::default());
    let lines = summary_lines(&view);

    assert!(lines.contains(&"  First Name           [unfilled]".to_string()));
    assert!(lines.contains(&"  Email Notifications  Enabled".to_string()));
    assert!(lines.contains(&"  Theme Preference     System Default".to_string()));
    assert!(lines.contains(&"  Selected Features    [unfilled]".to_string()));
}
