use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Once,
};

use dirs::home_dir;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIR_NAME: &str = ".onboarding_core";
const HOME_ENV: &str = "ONBOARDING_HOME";
const DEFAULT_DIRECTIVE: &str = "onboarding_core=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Logs go to stderr so they never interleave with wizard prompts.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter(env::var(EnvFilter::DEFAULT_ENV).ok()))
            .with_writer(io::stderr)
            .try_init();
    });
}

/// `RUST_LOG` directives when present, otherwise `onboarding_core=info`.
fn env_filter(directives: Option<String>) -> EnvFilter {
    match directives {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

/// Returns the application data directory, defaulting to `~/.onboarding_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
