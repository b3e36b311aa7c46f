use std::collections::BTreeSet;
use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect, Select};

use crate::cli::output;
use crate::cli::test_mode::{self, ScriptedInput};
use crate::domain::{parse_choice, Choice};
use crate::errors::CliError;

const BACK_LABEL: &str = "← Back";

/// Answer to a single field prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult<T> {
    Value(T),
    /// Keep the current value.
    Keep,
    Back,
    Cancel,
}

fn from_scripted_text(input: ScriptedInput) -> PromptResult<String> {
    match input {
        ScriptedInput::Value(value) => PromptResult::Value(value),
        ScriptedInput::Keep => PromptResult::Keep,
        ScriptedInput::Back => PromptResult::Back,
        ScriptedInput::Cancel => PromptResult::Cancel,
    }
}

fn print_label(label: &str, default: Option<&str>) {
    match default {
        Some(current) => output::info(format!("{label} (current: {current})")),
        None => output::info(label),
    }
}

/// Free text entry. Enter on an empty line keeps `default` when there is one.
///
/// `:back` returns to the previous field; `:cancel`, Esc or Ctrl-C abort.
pub fn text_input(label: &str, default: Option<&str>) -> io::Result<PromptResult<String>> {
    print_label(label, default);
    if let Some(scripted) = test_mode::next_input(label) {
        return Ok(from_scripted_text(scripted));
    }

    let mut guard = RawModeGuard::activate()?;
    let mut stdout = io::stdout();
    redraw_input(&mut stdout, "")?;
    let mut buffer = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    guard.deactivate();
                    println!();
                    return Ok(PromptResult::Cancel);
                }
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    buffer.clear();
                    redraw_input(&mut stdout, &buffer)?;
                    continue;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                guard.deactivate();
                println!();
                return Ok(PromptResult::Cancel);
            }
            KeyCode::Enter => {
                guard.deactivate();
                println!();
                return Ok(interpret_buffer(&buffer, default));
            }
            KeyCode::Backspace => {
                buffer.pop();
                redraw_input(&mut stdout, &buffer)?;
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                redraw_input(&mut stdout, &buffer)?;
            }
            KeyCode::Delete => {
                buffer.clear();
                redraw_input(&mut stdout, &buffer)?;
            }
            _ => {}
        }
    }
}

/// Single selection from a catalog.
pub fn choose<T: Choice>(label: &str, current: Option<T>) -> Result<PromptResult<T>, CliError> {
    if test_mode::is_enabled() {
        print_label(label, current.map(|value| value.label()));
        loop {
            let Some(scripted) = test_mode::next_input(label) else {
                return Ok(PromptResult::Cancel);
            };
            match scripted {
                ScriptedInput::Value(raw) => match parse_choice::<T>(&raw) {
                    Ok(value) => return Ok(PromptResult::Value(value)),
                    Err(err) => output::warning(err),
                },
                ScriptedInput::Keep => return Ok(PromptResult::Keep),
                ScriptedInput::Back => return Ok(PromptResult::Back),
                ScriptedInput::Cancel => return Ok(PromptResult::Cancel),
            }
        }
    }

    let mut items: Vec<String> = T::ALL.iter().map(|option| option_line(*option)).collect();
    items.push(BACK_LABEL.to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .items(&items)
        .default(current.map(T::position).unwrap_or(0))
        .interact_opt()?;

    Ok(match selection {
        Some(index) => match T::ALL.get(index) {
            Some(value) => PromptResult::Value(*value),
            None => PromptResult::Back,
        },
        None => PromptResult::Cancel,
    })
}

/// Any number of options from a catalog. Scripted answers are comma separated.
pub fn choose_many<T: Choice + Ord>(
    label: &str,
    current: &BTreeSet<T>,
) -> Result<PromptResult<BTreeSet<T>>, CliError> {
    if test_mode::is_enabled() {
        let shown = current
            .iter()
            .map(|value| value.value())
            .collect::<Vec<_>>()
            .join(", ");
        print_label(label, (!shown.is_empty()).then_some(shown.as_str()));
        loop {
            let Some(scripted) = test_mode::next_input(label) else {
                return Ok(PromptResult::Cancel);
            };
            match scripted {
                ScriptedInput::Value(raw) => match parse_many::<T>(&raw) {
                    Ok(values) => return Ok(PromptResult::Value(values)),
                    Err(err) => output::warning(err),
                },
                ScriptedInput::Keep => return Ok(PromptResult::Keep),
                ScriptedInput::Back => return Ok(PromptResult::Back),
                ScriptedInput::Cancel => return Ok(PromptResult::Cancel),
            }
        }
    }

    let items: Vec<String> = T::ALL.iter().map(|option| option_line(*option)).collect();
    let checked: Vec<bool> = T::ALL.iter().map(|option| current.contains(option)).collect();

    let selection = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{label} (space to toggle, Esc to cancel)"))
        .items(&items)
        .defaults(&checked)
        .interact_opt()?;

    Ok(match selection {
        Some(indices) => PromptResult::Value(
            indices
                .into_iter()
                .filter_map(|index| T::ALL.get(index).copied())
                .collect(),
        ),
        None => PromptResult::Cancel,
    })
}

/// Yes / no question.
pub fn toggle(label: &str, current: bool) -> Result<PromptResult<bool>, CliError> {
    if test_mode::is_enabled() {
        print_label(label, Some(if current { "yes" } else { "no" }));
        loop {
            let Some(scripted) = test_mode::next_input(label) else {
                return Ok(PromptResult::Cancel);
            };
            match scripted {
                ScriptedInput::Value(raw) => match parse_bool(&raw) {
                    Some(value) => return Ok(PromptResult::Value(value)),
                    None => output::warning(
                        "Enter yes/no, true/false, or 1/0 to indicate boolean values",
                    ),
                },
                ScriptedInput::Keep => return Ok(PromptResult::Keep),
                ScriptedInput::Back => return Ok(PromptResult::Back),
                ScriptedInput::Cancel => return Ok(PromptResult::Cancel),
            }
        }
    }

    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .default(current)
        .interact_opt()?;

    Ok(match answer {
        Some(value) => PromptResult::Value(value),
        None => PromptResult::Cancel,
    })
}

fn option_line<T: Choice>(option: T) -> String {
    match option.description() {
        Some(description) => format!("{} — {}", option.label(), description),
        None => option.label().to_string(),
    }
}

fn parse_many<T: Choice + Ord>(raw: &str) -> Result<BTreeSet<T>, crate::domain::UnknownOption> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_choice::<T>)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Some(true),
        "n" | "no" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn redraw_input(stdout: &mut Stdout, buffer: &str) -> io::Result<()> {
    stdout.execute(cursor::MoveToColumn(0))?;
    stdout.execute(terminal::Clear(ClearType::CurrentLine))?;
    write!(stdout, "> {}", buffer)?;
    stdout.flush()
}

fn interpret_buffer(buffer: &str, default: Option<&str>) -> PromptResult<String> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return if default.is_some() {
            PromptResult::Keep
        } else {
            PromptResult::Value(buffer.to_string())
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        ":cancel" => PromptResult::Cancel,
        ":back" => PromptResult::Back,
        ":clear" => PromptResult::Value(String::new()),
        _ => PromptResult::Value(buffer.to_string()),
    }
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}
