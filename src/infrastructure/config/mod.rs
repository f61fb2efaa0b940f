//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Backend used when neither the build nor the environment names one
const FALLBACK_ENDPOINT: &str = "https://backend-chatbot-9cp9.onrender.com/";

/// Environment variable naming the backend, read at build time and at deploy time
pub const ENDPOINT_ENV: &str = "CITYGYM_BACKEND_URL";

/// Chat client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssistantConfig {
    /// Base URL; `/api/chat` is appended
    pub endpoint: String,
    /// Unset means wait for the backend indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConsoleConfig {
    pub name: String,
    pub prompt: String,
    pub show_suggestions: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint().to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            name: "CityGym AI".to_string(),
            prompt: "> ".to_string(),
            show_suggestions: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

fn default_endpoint() -> &'static str {
    option_env!("CITYGYM_BACKEND_URL").unwrap_or(FALLBACK_ENDPOINT)
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.assistant.endpoint = endpoint;
        }

        config
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.assistant.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(format!(
                "assistant.endpoint must be an http(s) URL, got '{}'",
                self.assistant.endpoint
            )));
        }
        if self.assistant.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "assistant.request-timeout-secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
