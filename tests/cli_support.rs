use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

pub struct WizardTestHarness {
    home: TempDir,
}

impl WizardTestHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    #[allow(dead_code)]
    pub fn submissions_dir(&self) -> PathBuf {
        self.home().join("submissions")
    }

    #[allow(dead_code)]
    pub fn write_config(&self, json: &str) {
        std::fs::write(self.home().join("config.json"), json).expect("write config");
    }

    /// Runs the wizard with `inputs` answered in order, one per prompt.
    pub fn run(&self, inputs: &[&str]) -> CliOutput {
        let mut cmd = Command::cargo_bin("onboarding_cli").expect("binary exists");
        cmd.env("ONBOARDING_HOME", self.home())
            .env("ONBOARDING_TEST_INPUTS", inputs.join("|"))
            .env_remove("RUST_LOG");
        let output = cmd.output().expect("run onboarding CLI");
        if !output.status.success() {
            panic!(
                "onboarding CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

#[allow(dead_code)]
pub const PROFILE: [&str; 3] = ["Jo", "Doe", "jo@x.co"];
#[allow(dead_code)]
pub const ORGANIZATION: [&str; 3] = ["Acme", "2", "technology"];
#[allow(dead_code)]
pub const ROLE: [&str; 2] = ["manager", "Track team onboarding"];
#[allow(dead_code)]
pub const PREFERENCES: [&str; 3] = ["no", "dark", "analytics, mobile"];
