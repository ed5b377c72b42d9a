use crate::core::error::AdvisorError;
use crate::providers::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables checked, in order, for the Gemini credential
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_recommendation_temperature() -> f32 {
    0.7
}

fn default_chat_temperature() -> f32 {
    0.8
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recommendation_temperature")]
    pub recommendation_temperature: f32,
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            recommendation_temperature: default_recommendation_temperature(),
            chat_temperature: default_chat_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".smartcareer")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Loads the config file at `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, AdvisorError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config = serde_yml::from_str::<Config>(&contents)
            .map_err(|e| AdvisorError::Config(format!("Parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.model.trim().is_empty() {
            return Err(AdvisorError::Config("model must not be empty".to_string()));
        }
        for (key, value) in [
            ("recommendation_temperature", self.recommendation_temperature),
            ("chat_temperature", self.chat_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(AdvisorError::Config(format!(
                    "{} must be between 0.0 and 2.0, got {}",
                    key, value
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(AdvisorError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reads the API credential from the environment.
    ///
    /// There is nothing useful to do without it, so callers treat the error as fatal.
    pub fn api_key_from_env() -> Result<String, AdvisorError> {
        API_KEY_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or_else(|| {
                AdvisorError::Config(format!(
                    "API key not set: export {} (or {}) before starting",
                    API_KEY_VARS[0], API_KEY_VARS[1]
                ))
            })
    }
}
