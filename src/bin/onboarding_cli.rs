use std::process::ExitCode;

use onboarding_core::cli::{output, run_cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    onboarding_core::init();
    match run_cli().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
