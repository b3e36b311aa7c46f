use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::output::{self, OutputPreferences};
use crate::cli::prompts::{self, PromptResult};
use crate::cli::render;
use crate::cli::test_mode;
use crate::config::ConfigManager;
use crate::domain::{Choice, Field};
use crate::errors::{CliError, WizardError};
use crate::validation::{IdentitySlice, OrganizationSlice, PreferenceSlice, RoleSlice, Slice};
use crate::wizard::{
    JsonFileSink, StepDraft, SubmissionReceipt, SubmitOutcome, SummaryView, Transition,
    WizardController, WizardHandle, WizardStep,
};

/// What the user picked on the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewAction {
    Submit,
    Back,
    Cancel,
}

impl Choice for ReviewAction {
    const KIND: &'static str = "action";
    const ALL: &'static [Self] = &[ReviewAction::Submit, ReviewAction::Back, ReviewAction::Cancel];

    fn value(self) -> &'static str {
        match self {
            ReviewAction::Submit => "submit",
            ReviewAction::Back => "back",
            ReviewAction::Cancel => "cancel",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ReviewAction::Submit => "Complete Setup",
            ReviewAction::Back => "Back",
            ReviewAction::Cancel => "Cancel",
        }
    }
}

enum FieldFlow {
    Next,
    Back,
    Cancel,
}

enum StepFlow {
    Advance,
    Retreat,
    Cancel,
}

enum ReviewFlow {
    Submitted(SubmissionReceipt),
    Stay,
    Back,
    Cancel,
}

enum WizardExit {
    Completed(SubmissionReceipt),
    Cancelled,
}

type FieldPrompt<S> = fn(&mut StepDraft<'_, S>, Field) -> Result<FieldFlow, CliError>;

/// Runs the interactive onboarding wizard until it is submitted or cancelled.
pub async fn run_cli() -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output || test_mode::is_enabled(),
    });

    let sink = Arc::new(JsonFileSink::new(manager.submissions_dir(&config)));
    let handle =
        WizardHandle::new(WizardController::new(), sink).with_timeout(config.submit_timeout());

    output::section("Welcome to Our Platform");
    output::detail("Let's get you set up in just a few steps");
    output::detail("Type :back to revisit the previous field, :cancel or Esc to quit.");

    match run_wizard(&handle).await? {
        WizardExit::Completed(receipt) => {
            output::success("Onboarding completed successfully!");
            if let Some(location) = &receipt.location {
                output::info(format!("Saved to {location}"));
            }
            output::detail(format!("Reference: {}", receipt.id));
        }
        WizardExit::Cancelled => {
            info!(step = %handle.current_step(), "onboarding cancelled");
            output::warning("Onboarding cancelled.");
        }
    }
    Ok(())
}

async fn run_wizard(handle: &WizardHandle) -> Result<WizardExit, CliError> {
    loop {
        let nav = handle.navigation();
        let mut header = render::progress_lines(&nav).into_iter();
        if let Some(title) = header.next() {
            output::section(title);
        }
        output::lines(header);
        output::detail(nav.current.definition().subtitle);

        let flow = match nav.current {
            WizardStep::Profile => collect::<IdentitySlice>(handle, identity_field)?,
            WizardStep::Organization => collect::<OrganizationSlice>(handle, organization_field)?,
            WizardStep::Role => collect::<RoleSlice>(handle, role_field)?,
            WizardStep::Preferences => collect::<PreferenceSlice>(handle, preference_field)?,
            WizardStep::Summary => match review(handle).await? {
                ReviewFlow::Submitted(receipt) => return Ok(WizardExit::Completed(receipt)),
                ReviewFlow::Stay => continue,
                ReviewFlow::Back => StepFlow::Retreat,
                ReviewFlow::Cancel => StepFlow::Cancel,
            },
        };

        match flow {
            StepFlow::Advance => match handle.advance() {
                Ok(_) => {}
                Err(WizardError::ValidationIncomplete { errors, .. }) => {
                    output::warning("Please fill out all required fields before proceeding.");
                    for error in errors.iter() {
                        output::detail(format!("  {}: {}", error.field.label(), error.message));
                    }
                }
                Err(err) => return Err(err.into()),
            },
            StepFlow::Retreat => {
                if let Transition::Stayed(_) = handle.retreat()? {
                    output::info("Already at the first step.");
                }
            }
            StepFlow::Cancel => return Ok(WizardExit::Cancelled),
        }
    }
}

/// Walks the fields of one step through a draft seeded from the record.
fn collect<S: Slice>(handle: &WizardHandle, prompt: FieldPrompt<S>) -> Result<StepFlow, CliError> {
    let seed = handle.record();
    let target = handle.clone();
    let mut draft = StepDraft::<S>::new(&seed, move |patch| {
        if let Err(err) = target.merge_slice(patch) {
            warn!(error = %err, "merge rejected");
        }
    });

    let mut index = 0;
    while let Some(&field) = S::FIELDS.get(index) {
        match prompt(&mut draft, field)? {
            FieldFlow::Next => match draft.error_for(field) {
                Some(message) => output::warning(message),
                None => index += 1,
            },
            FieldFlow::Back if index == 0 => return Ok(StepFlow::Retreat),
            FieldFlow::Back => index -= 1,
            FieldFlow::Cancel => return Ok(StepFlow::Cancel),
        }
    }
    Ok(StepFlow::Advance)
}

/// Applies a prompt answer to the draft and reports where to go next.
fn settle<S: Slice, V>(
    draft: &mut StepDraft<'_, S>,
    answer: PromptResult<V>,
    set: impl FnOnce(&mut S, V),
) -> FieldFlow {
    match answer {
        PromptResult::Value(value) => {
            draft.edit(|slice| set(slice, value));
            FieldFlow::Next
        }
        PromptResult::Keep => FieldFlow::Next,
        PromptResult::Back => FieldFlow::Back,
        PromptResult::Cancel => FieldFlow::Cancel,
    }
}

fn text_field<S: Slice>(
    draft: &mut StepDraft<'_, S>,
    field: Field,
    current: &str,
    set: impl FnOnce(&mut S, String),
) -> Result<FieldFlow, CliError> {
    let default = (!current.is_empty()).then_some(current);
    let answer = prompts::text_input(field.label(), default)?;
    Ok(settle(draft, answer, set))
}

fn choice_field<S: Slice, T: Choice>(
    draft: &mut StepDraft<'_, S>,
    field: Field,
    current: Option<T>,
    set: impl FnOnce(&mut S, T),
) -> Result<FieldFlow, CliError> {
    let answer = prompts::choose::<T>(field.label(), current)?;
    Ok(settle(draft, answer, set))
}

fn identity_field(
    draft: &mut StepDraft<'_, IdentitySlice>,
    field: Field,
) -> Result<FieldFlow, CliError> {
    let current = draft.draft().clone();
    match field {
        Field::FirstName => {
            text_field(draft, field, &current.first_name, |d, v| d.first_name = v)
        }
        Field::LastName => text_field(draft, field, &current.last_name, |d, v| d.last_name = v),
        Field::Email => text_field(draft, field, &current.email, |d, v| d.email = v),
        _ => Ok(FieldFlow::Next),
    }
}

fn organization_field(
    draft: &mut StepDraft<'_, OrganizationSlice>,
    field: Field,
) -> Result<FieldFlow, CliError> {
    let current = draft.draft().clone();
    match field {
        Field::CompanyName => text_field(draft, field, &current.name, |d, v| d.name = v),
        Field::CompanySize => choice_field(draft, field, current.size, |d, v| d.size = Some(v)),
        Field::Industry => {
            choice_field(draft, field, current.industry, |d, v| d.industry = Some(v))
        }
        _ => Ok(FieldFlow::Next),
    }
}

fn role_field(draft: &mut StepDraft<'_, RoleSlice>, field: Field) -> Result<FieldFlow, CliError> {
    let current = draft.draft().clone();
    match field {
        Field::Role => choice_field(draft, field, current.role, |d, v| d.role = Some(v)),
        Field::UseCase => text_field(draft, field, &current.use_case, |d, v| d.use_case = v),
        _ => Ok(FieldFlow::Next),
    }
}

fn preference_field(
    draft: &mut StepDraft<'_, PreferenceSlice>,
    field: Field,
) -> Result<FieldFlow, CliError> {
    let current = draft.draft().clone();
    match field {
        Field::Notifications => {
            let answer = prompts::toggle(field.label(), current.notifications)?;
            Ok(settle(draft, answer, |d, v| d.notifications = v))
        }
        Field::Theme => choice_field(draft, field, Some(current.theme), |d, v| d.theme = v),
        Field::Features => {
            let answer = prompts::choose_many(field.label(), &current.features)?;
            Ok(settle(draft, answer, |d, v| d.features = v))
        }
        _ => Ok(FieldFlow::Next),
    }
}

async fn review(handle: &WizardHandle) -> Result<ReviewFlow, CliError> {
    let view = SummaryView::from_record(&handle.record());
    output::lines(render::summary_lines(&view));
    output::detail(
        "By completing this setup, you agree to our Terms of Service and Privacy Policy.",
    );
    output::detail(render::navigation_line(&handle.navigation()));

    let action = match prompts::choose::<ReviewAction>("Ready?", Some(ReviewAction::Submit))? {
        PromptResult::Value(action) => action,
        PromptResult::Keep => ReviewAction::Submit,
        PromptResult::Back => ReviewAction::Back,
        PromptResult::Cancel => ReviewAction::Cancel,
    };

    match action {
        ReviewAction::Back => return Ok(ReviewFlow::Back),
        ReviewAction::Cancel => return Ok(ReviewFlow::Cancel),
        ReviewAction::Submit => {}
    }

    output::detail("Submitting…");
    match handle.submit().await {
        Ok(SubmitOutcome::Submitted(receipt)) => Ok(ReviewFlow::Submitted(receipt)),
        Ok(SubmitOutcome::AlreadyInFlight) => {
            output::info("A submission is already in progress.");
            Ok(ReviewFlow::Stay)
        }
        Err(err) if err.is_retryable() => {
            output::error(&err);
            output::info("Your answers are kept. Choose Complete Setup to try again.");
            Ok(ReviewFlow::Stay)
        }
        Err(err) => Err(err.into()),
    }
}
