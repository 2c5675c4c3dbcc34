//! User configuration stored as JSON in `~/.rmitconfig`.
//!
//! The configuration is resolved once at process start and passed down as a
//! value; nothing below `main` reads the environment or the file again.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::ConfigError;

/// Default chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Config file name, relative to the home directory.
pub const CONFIG_FILE_NAME: &str = ".rmitconfig";

/// Environment variable that overrides the stored API key at load time.
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub default_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Fill empty `api_url` / `default_model` with the defaults.
    pub fn apply_defaults(&mut self) {
        if self.api_url.is_empty() {
            self.api_url = DEFAULT_API_URL.to_string();
        }
        if self.default_model.is_empty() {
            self.default_model = DEFAULT_MODEL.to_string();
        }
    }

    /// Replace the API key with `env_key` when it is set and non-empty.
    pub fn with_env_override(mut self, env_key: Option<String>) -> Self {
        if let Some(key) = env_key.filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
        self
    }

    /// Model to use: the explicit override, else `default_model`.
    pub fn model_or_default<'a>(&'a self, override_model: Option<&'a str>) -> &'a str {
        override_model
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str())
    }

    /// Update one key after validating the value.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        match key {
            ConfigKey::ApiKey => {
                if value.is_empty() {
                    return Err(ConfigError::EmptyValue("API key"));
                }
                self.api_key = value.to_string();
            }
            ConfigKey::ApiUrl => {
                if value.is_empty() {
                    return Err(ConfigError::EmptyValue("API URL"));
                }
                self.api_url = value.to_string();
            }
            ConfigKey::DefaultModel => {
                self.default_model = value.to_string();
            }
        }
        Ok(())
    }

    /// Display value for `key`. The API key is never shown.
    pub fn display_value(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiKey => self.api_key_status().to_string(),
            ConfigKey::ApiUrl => self.api_url.clone(),
            ConfigKey::DefaultModel => self.default_model.clone(),
        }
    }

    /// Fail before any request is sent when no key is configured.
    pub fn ensure_api_key(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    pub fn api_key_status(&self) -> &'static str {
        if self.api_key.is_empty() {
            "[NOT SET]"
        } else {
            "[SET]"
        }
    }
}

/// Keys accepted by `set` and `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiKey,
    ApiUrl,
    DefaultModel,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::ApiKey, ConfigKey::ApiUrl, ConfigKey::DefaultModel];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "api_key",
            ConfigKey::ApiUrl => "api_url",
            ConfigKey::DefaultModel => "default_model",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Location of the config file on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.rmitconfig`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file on top of the defaults, without the environment override.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is
    /// logged and also yields the defaults.
    pub fn load_file(&self) -> Config {
        let mut config = match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("failed to parse config file (will use defaults): {e}");
                    Config::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                warn!("failed to read config file (will use defaults): {e}");
                Config::default()
            }
        };

        config.apply_defaults();
        config
    }

    /// Load the file and apply `OPENROUTER_API_KEY`.
    pub fn load(&self) -> Config {
        self.load_file()
            .with_env_override(std::env::var(API_KEY_ENV_VAR).ok())
    }

    /// Atomically write `config` as pretty-printed JSON.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let mut config = config.clone();
        config.apply_defaults();

        let json = serde_json::to_string_pretty(&config).map_err(ConfigError::SerializeFailed)?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
        tmp.write_all(json.as_bytes())
            .map_err(ConfigError::WriteFailed)?;
        tmp.persist(&self.path)
            .map_err(|e| ConfigError::WriteFailed(e.error))?;

        Ok(())
    }
}
