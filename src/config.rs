//! Engine configuration
//!
//! Layers, lowest priority first: built-in defaults, TOML file, `INNERVERSE_*`
//! environment variables. CLI flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::SCREENING_WINDOW;

pub const ENV_STATE_FILE: &str = "INNERVERSE_STATE_FILE";
pub const ENV_HISTORY_FILE: &str = "INNERVERSE_HISTORY_FILE";
pub const ENV_ADDR: &str = "INNERVERSE_ADDR";
pub const ENV_STORE_SNIPPETS: &str = "INNERVERSE_STORE_SNIPPETS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Heat level file
    pub state_file: PathBuf,
    /// Mood history file
    pub history_file: PathBuf,
    /// HTTP bind address
    pub addr: String,
    /// Keep the first 100 chars of each entry in history
    pub store_snippets: bool,
    /// Heavy turns in a row before suggesting a screening
    pub screening_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("house_state.json"),
            history_file: PathBuf::from("journal.json"),
            addr: "127.0.0.1:5000".to_string(),
            store_snippets: false,
            screening_window: SCREENING_WINDOW,
        }
    }
}

impl EngineConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the file if it exists, then environment
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `INNERVERSE_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_STATE_FILE) {
            self.state_file = PathBuf::from(val);
        }
        if let Some(val) = lookup(ENV_HISTORY_FILE) {
            self.history_file = PathBuf::from(val);
        }
        if let Some(val) = lookup(ENV_ADDR) {
            self.addr = val;
        }
        if let Some(val) = lookup(ENV_STORE_SNIPPETS) {
            self.store_snippets = parse_bool(&val).ok_or_else(|| {
                ConfigError::Validation(format!("Invalid {}: {}", ENV_STORE_SNIPPETS, val))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.addr.trim().is_empty() {
            return Err(ConfigError::Validation("addr must not be empty".to_string()));
        }
        if self.screening_window == 0 {
            return Err(ConfigError::Validation(
                "screening_window must be at least 1".to_string(),
            ));
        }
        if self.state_file.as_os_str().is_empty() || self.history_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "state_file and history_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
