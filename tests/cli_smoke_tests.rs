mod cli_support;

use assert_cmd::Command;
use cli_support::{WizardTestHarness, ORGANIZATION, PREFERENCES, PROFILE, ROLE};
use predicates::prelude::*;
use regex::Regex;

fn full_run(extra: &[&'static str]) -> Vec<&'static str> {
    let mut inputs = Vec::new();
    inputs.extend(PROFILE);
    inputs.extend(ORGANIZATION);
    inputs.extend(ROLE);
    inputs.extend(PREFERENCES);
    inputs.extend(extra);
    inputs
}

#[test]
fn completes_and_writes_the_submission() {
    let harness = WizardTestHarness::new();
    let output = harness.run(&full_run(&["submit"]));

    assert!(output.stdout.contains("Step 1 of 5 — Personal Information"));
    assert!(output.stdout.contains("Step 5 of 5 — Summary"));
    assert!(output.stdout.contains("Onboarding completed successfully!"));

    let reference = Regex::new(r"Reference: ([0-9a-f-]{36})").unwrap();
    let id = &reference
        .captures(&output.stdout)
        .expect("receipt id printed")[1];
    let file = harness.submissions_dir().join(format!("onboarding-{id}.json"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file).expect("submission written"))
            .expect("valid json");
    assert_eq!(json["record"]["email"], "jo@x.co");
    assert_eq!(json["record"]["industry"], "Technology");
    assert_eq!(json["record"]["notifications"], false);
    assert_eq!(
        json["record"]["features"],
        serde_json::json!(["analytics", "mobile"])
    );
}

#[test]
fn invalid_answers_are_reprompted() {
    let harness = WizardTestHarness::new();
    let mut inputs = vec!["J", "Jo", "Doe", "jo-at-x.co", "jo@x.co"];
    inputs.extend(["Acme", "huge", "6", "technology"]);
    inputs.extend(["manager", "short", "Track team onboarding"]);
    inputs.extend(["<KEEP>", "<KEEP>", "<BLANK>", "analytics"]);
    inputs.push("submit");
    let output = harness.run(&inputs);

    assert!(output.stdout.contains("First name must be at least 2 characters"));
    assert!(output.stdout.contains("Please enter a valid email address"));
    assert!(output.stdout.contains("unknown company size `huge`"));
    assert!(output
        .stdout
        .contains("Please describe your use case in at least 10 characters"));
    assert!(output.stdout.contains("Please select at least one feature"));
    assert!(output.stdout.contains("1000+ employees"));
    assert!(output.stdout.contains("Onboarding completed successfully!"));
}

#[test]
fn back_revisits_previous_step_with_answers_kept() {
    let harness = WizardTestHarness::new();
    let mut inputs = Vec::new();
    inputs.extend(PROFILE);
    inputs.push("<BACK>");
    inputs.extend(["<KEEP>", "<KEEP>", "<KEEP>"]);
    inputs.extend(ORGANIZATION);
    inputs.extend(ROLE);
    inputs.extend(PREFERENCES);
    inputs.extend(["back", "<KEEP>", "<KEEP>", "<KEEP>", "submit"]);
    let output = harness.run(&inputs);

    assert!(output.stdout.contains("First Name (current: Jo)"));
    assert!(output.stdout.contains("Email Notifications (current: no)"));
    assert!(output.stdout.contains("Onboarding completed successfully!"));
    assert_eq!(
        std::fs::read_dir(harness.submissions_dir())
            .expect("submissions dir")
            .count(),
        1
    );
}

#[test]
fn cancel_leaves_nothing_behind() {
    let harness = WizardTestHarness::new();
    let output = harness.run(&["Jo", "<CANCEL>"]);

    assert!(output.stdout.contains("Onboarding cancelled."));
    assert!(!output.stdout.contains("completed successfully"));
    assert!(!harness.submissions_dir().exists());
}

#[test]
fn exhausted_script_cancels() {
    let harness = WizardTestHarness::new();
    let output = harness.run(&full_run(&[]));

    assert!(output.stdout.contains("Step 5 of 5 — Summary"));
    assert!(output.stdout.contains("Onboarding cancelled."));
}

#[test]
fn failed_submission_returns_to_summary() {
    let harness = WizardTestHarness::new();
    let blocker = harness.home().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    harness.write_config(
        &serde_json::json!({ "submissions_dir": blocker.join("out") }).to_string(),
    );

    let output = harness.run(&full_run(&["submit", "cancel"]));

    assert!(output.stdout.contains("Submission failed"));
    assert!(output.stdout.contains("Choose Complete Setup to try again."));
    assert!(output.stdout.contains("Onboarding cancelled."));
}

#[test]
fn malformed_config_exits_with_an_error() {
    let harness = WizardTestHarness::new();
    harness.write_config("{ not json");

    Command::cargo_bin("onboarding_cli")
        .unwrap()
        .env("ONBOARDING_HOME", harness.home())
        .env("ONBOARDING_TEST_INPUTS", "Jo")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Serialization error"));
}
