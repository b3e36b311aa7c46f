//! Stateless renderers for progress, navigation and the summary review.
//!
//! Everything here returns plain lines; colouring happens at print time.

use crate::wizard::{NavigationState, SummaryView, WizardStep};

const BAR_WIDTH: usize = 20;

/// "Step 2 of 5 — Company Details" plus a bar and the step checklist.
pub fn progress_lines(nav: &NavigationState) -> Vec<String> {
    let filled = nav.percent() * BAR_WIDTH / 100;
    let bar = format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        nav.percent()
    );

    let checklist = WizardStep::ALL
        .iter()
        .map(|step| {
            let marker = match step.cmp(&nav.current) {
                std::cmp::Ordering::Less => "✓",
                std::cmp::Ordering::Equal => "●",
                std::cmp::Ordering::Greater => "○",
            };
            format!("{marker} {}", step.title())
        })
        .collect::<Vec<_>>()
        .join("  ");

    vec![
        format!(
            "Step {} of {} — {}",
            nav.current.index() + 1,
            nav.total,
            nav.current.title()
        ),
        bar,
        checklist,
    ]
}

/// The actions available from the current step.
pub fn navigation_line(nav: &NavigationState) -> String {
    if nav.submitting {
        return "Submitting…".to_string();
    }
    let back = if nav.can_retreat {
        "← Back"
    } else {
        "(Back unavailable)"
    };
    format!("{back}  |  {} →", nav.primary.label())
}

pub fn summary_lines(view: &SummaryView) -> Vec<String> {
    let width = view
        .sections
        .iter()
        .flat_map(|section| section.entries.iter())
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for section in &view.sections {
        lines.push(section.title.to_string());
        for entry in &section.entries {
            let value = if entry.value.is_empty() {
                "[unfilled]"
            } else {
                entry.value.as_str()
            };
            lines.push(format!("  {:<width$}  {}", entry.label, value, width = width));
        }
    }
    lines
}
