use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration: where data lives and how the server runs.
///
/// Distinct from [`crate::settings::Settings`], which is the admin-editable
/// form document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub logs_dir: String,
    pub settings_file: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub admin_token: Option<String>,
    #[serde(default = "default_visitor_ttl")]
    pub visitor_ttl_minutes: u64,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_visitor_ttl() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        let dir = Self::config_dir();
        Self {
            logs_dir: dir.join("logs").to_string_lossy().to_string(),
            settings_file: dir.join("settings.json").to_string_lossy().to_string(),
            bind: default_bind(),
            admin_token: None,
            visitor_ttl_minutes: default_visitor_ttl(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rcheckin")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rcheckin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Load configuration from `path`, or return defaults if not found
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        Ok(cfg)
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn logs_path(&self) -> PathBuf {
        expand_tilde(&self.logs_dir)
    }

    pub fn settings_path(&self) -> PathBuf {
        expand_tilde(&self.settings_file)
    }
}
