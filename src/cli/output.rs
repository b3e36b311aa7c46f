use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
    Detail,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No colour, no decoration beyond the textual label.
    pub plain_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> Option<(&'static str, &'static str)> {
    match kind {
        MessageKind::Info => Some(("INFO", "[i]")),
        MessageKind::Success => Some(("SUCCESS", "[✓]")),
        MessageKind::Warning => Some(("WARNING", "[!]")),
        MessageKind::Error => Some(("ERROR", "[x]")),
        MessageKind::Section | MessageKind::Detail => None,
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Detail => text,
        _ => match build_label(kind) {
            Some((label, icon)) => format!("{label}: {icon} {text}"),
            None => text,
        },
    };

    if prefs.plain_mode {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Detail => formatted.dimmed().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn detail(message: impl fmt::Display) {
    print(MessageKind::Detail, message);
}

/// Prints pre-rendered lines verbatim.
pub fn lines<I, S>(lines: I)
where
    I: IntoIterator<Item = S>,
    S: fmt::Display,
{
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_keeps_labels_without_colour() {
        let prefs = OutputPreferences { plain_mode: true };
        assert_eq!(
            apply_style(MessageKind::Warning, "Check the email", &prefs),
            "WARNING: [!] Check the email"
        );
        assert_eq!(
            apply_style(MessageKind::Section, " Summary ", &prefs),
            "=== Summary ==="
        );
        assert_eq!(apply_style(MessageKind::Detail, "hint", &prefs), "hint");
    }
}
