//! Terminal front-end for the onboarding wizard.

pub mod output;
pub mod prompts;
pub mod render;
mod runner;
pub mod test_mode;

pub use runner::run_cli;
