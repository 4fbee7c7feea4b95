use crate::core::error::ChefError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400.png";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variables checked for a Gemini key, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Fake,
}

impl Provider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "googleai" => Some(Provider::Gemini),
            "fake" => Some(Provider::Fake),
            _ => None,
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Gemini
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub image_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    pub active_provider: Option<Provider>,
    #[serde(default)]
    pub placeholder_image: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub providers: HashMap<Provider, ProviderConfig>,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pantrychef")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn history_path() -> PathBuf {
        Self::config_dir().join("history")
    }

    /// Load `~/.pantrychef/config.yaml`, writing a default file on first run.
    pub fn load() -> Result<Config, ChefError> {
        let path = Self::config_path();

        if path.exists() {
            return Self::load_from(&path);
        }

        let config = Config::default();
        if let Err(e) = config.save_to(&path) {
            tracing::debug!(path = %path.display(), error = %e, "Could not write default config");
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Config, ChefError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
            .map_err(|e| ChefError::Config(format!("Parse {}: {}", path.display(), e)))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Config, ChefError> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yml::from_str::<Config>(contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ChefError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    pub fn placeholder_image(&self) -> String {
        self.placeholder_image
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Settings for `provider`, with the API key filled from the environment
    /// when the file does not set one.
    pub fn provider_config(&self, provider: Provider) -> ProviderConfig {
        let mut config = self.providers.get(&provider).cloned().unwrap_or_default();
        if provider == Provider::Gemini && config.api_key.is_none() {
            config.api_key = api_key_from_env();
        }
        config
    }
}

fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
active_provider: gemini
placeholder_image: https://example.com/plate.png
request_timeout_secs: 30
providers:
  gemini:
    api_key: abc123
    model: gemini-2.5-flash
server:
  host: 0.0.0.0
  port: 3000
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.active_provider, Some(Provider::Gemini));
        assert_eq!(config.placeholder_image(), "https://example.com/plate.png");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.server.address(), "0.0.0.0:3000");

        let gemini = config.provider_config(Provider::Gemini);
        assert_eq!(gemini.api_key.as_deref(), Some("abc123"));
        assert_eq!(gemini.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(gemini.image_model, None);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_yaml_str("  \n").unwrap();
        assert_eq!(config.active_provider, None);
        assert_eq!(config.placeholder_image(), DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(config.server.address(), "127.0.0.1:8080");
    }

    #[test]
    fn blank_placeholder_falls_back_to_default() {
        let config = Config::from_yaml_str("placeholder_image: ''").unwrap();
        assert_eq!(config.placeholder_image(), DEFAULT_PLACEHOLDER_IMAGE);
    }

    #[test]
    fn rejects_unknown_provider() {
        let result = Config::from_yaml_str("active_provider: openai");
        assert!(matches!(result, Err(ChefError::Serialization(_))));
    }

    #[test]
    fn provider_names_parse_case_insensitively() {
        assert_eq!(Provider::from_str("Gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::from_str("googleai"), Some(Provider::Gemini));
        assert_eq!(Provider::from_str("FAKE"), Some(Provider::Fake));
        assert_eq!(Provider::from_str("openai"), None);
    }
}
