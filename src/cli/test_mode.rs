//! Scripted answers for non-interactive runs.
//!
//! When `ONBOARDING_TEST_INPUTS` is set, every prompt pops the next
//! pipe-separated token instead of reading the terminal.

use once_cell::sync::Lazy;
use std::{collections::VecDeque, env, sync::Mutex};

pub const INPUTS_ENV: &str = "ONBOARDING_TEST_INPUTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    Value(String),
    Keep,
    Back,
    Cancel,
}

struct InputQueue {
    enabled: bool,
    inputs: VecDeque<ScriptedInput>,
}

impl InputQueue {
    fn from_env() -> Self {
        match env::var(INPUTS_ENV) {
            Ok(raw) => Self {
                enabled: true,
                inputs: parse_sequence(&raw),
            },
            Err(_) => Self {
                enabled: false,
                inputs: VecDeque::new(),
            },
        }
    }
}

static INPUTS: Lazy<Mutex<InputQueue>> = Lazy::new(|| Mutex::new(InputQueue::from_env()));

pub fn is_enabled() -> bool {
    INPUTS.lock().map(|guard| guard.enabled).unwrap_or(false)
}

/// Next scripted answer, `None` when scripting is off. An exhausted script
/// cancels the wizard.
pub fn next_input(label: &str) -> Option<ScriptedInput> {
    let mut guard = INPUTS.lock().ok()?;
    if !guard.enabled {
        return None;
    }
    let next = guard.inputs.pop_front();
    if next.is_none() {
        tracing::warn!(prompt = label, "scripted inputs exhausted");
    }
    Some(next.unwrap_or(ScriptedInput::Cancel))
}

pub fn install_inputs(inputs: Vec<ScriptedInput>) {
    if let Ok(mut guard) = INPUTS.lock() {
        guard.enabled = true;
        guard.inputs = inputs.into();
    }
}

pub fn reset_inputs() {
    if let Ok(mut guard) = INPUTS.lock() {
        guard.enabled = false;
        guard.inputs.clear();
    }
}

fn parse_input(token: &str) -> ScriptedInput {
    match token.to_ascii_uppercase().as_str() {
        "<CANCEL>" | "<ESC>" => ScriptedInput::Cancel,
        "<BACK>" => ScriptedInput::Back,
        "<KEEP>" => ScriptedInput::Keep,
        "<BLANK>" | "<EMPTY>" => ScriptedInput::Value(String::new()),
        _ => ScriptedInput::Value(token.to_string()),
    }
}

fn parse_sequence(raw: &str) -> VecDeque<ScriptedInput> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_input)
        .collect()
}
