use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::errors::ConfigError;
use crate::utils::{app_data_dir, ensure_dir};

const CONFIG_FILE: &str = "config.json";
const SUBMISSIONS_DIR: &str = "submissions";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where finished records are written. Defaults under the data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions_dir: Option<PathBuf>,
    /// Collaborator timeout in seconds; `0` waits forever.
    pub submit_timeout_secs: u64,
    /// Uncoloured output for screen readers and logs.
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submissions_dir: None,
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
            plain_output: false,
        }
    }
}

impl Config {
    pub fn submit_timeout(&self) -> Option<Duration> {
        (self.submit_timeout_secs > 0).then(|| Duration::from_secs(self.submit_timeout_secs))
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Resolves the submissions directory for `config`.
    pub fn submissions_dir(&self, config: &Config) -> PathBuf {
        config
            .submissions_dir
            .clone()
            .unwrap_or_else(|| self.base.join(SUBMISSIONS_DIR))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, ConfigManager) {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        (temp, manager)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (_temp, manager) = manager();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.submit_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let (temp, manager) = manager();
        let config = Config {
            submissions_dir: Some(temp.path().join("out")),
            submit_timeout_secs: 0,
            plain_output: true,
        };
        manager.save(&config).unwrap();
        assert!(!tmp_path(manager.path()).exists());
        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.submit_timeout(), None);
        assert_eq!(manager.submissions_dir(&loaded), temp.path().join("out"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let (temp, manager) = manager();
        fs::write(manager.path(), r#"{ "plain_output": true }"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.plain_output);
        assert_eq!(config.submit_timeout_secs, 30);
        assert_eq!(
            manager.submissions_dir(&config),
            temp.path().join("submissions")
        );
    }

    #[test]
    fn malformed_file_is_reported() {
        let (_temp, manager) = manager();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    }
}
