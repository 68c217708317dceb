//! Translator configuration - endpoint, credential, and prompt settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

/// Environment variable holding the completion endpoint credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Main translator configuration, loaded from an optional YAML file and the
/// process environment. Constructed once at startup and passed by reference
/// into the translation functions; there is no ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Base URL of the OpenAI-compatible chat API
    pub api_url: String,

    /// Fixed model identifier (single instant/low-latency variant)
    pub model: String,

    /// Sampling temperature for every round trip (near-deterministic)
    pub temperature: f32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Output language for formula -> sentence translation
    pub language: String,

    /// Credential fallback; the environment wins when both are set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.1,
            timeout_secs: 30,
            language: "English".to_string(),
            api_key: None,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, TranslateError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslateError::Config(format!("failed to read config from {}: {e}", path.display()))
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            TranslateError::Config(format!("failed to parse config from {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Load from the given path, falling back to defaults when the file does
    /// not exist
    pub fn load_or_default(path: &Path) -> Result<Self, TranslateError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the endpoint credential, environment first, then the config
    /// file. A missing credential is fatal: nothing downstream is built.
    pub fn resolve_credential(&mut self) -> Result<(), TranslateError> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        self.resolve_credential_with(from_env)
    }

    fn resolve_credential_with(&mut self, from_env: Option<String>) -> Result<(), TranslateError> {
        let key = from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.take().filter(|k| !k.trim().is_empty()));

        match key {
            Some(key) => {
                self.api_key = Some(key);
                Ok(())
            }
            None => Err(TranslateError::Config(format!(
                "{API_KEY_ENV} is not set; export it or add api_key to the config file"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslatorConfig::default();
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.language, "English");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formulate.yaml");
        std::fs::write(&path, "language: Portuguese\ntemperature: 0.3\n").unwrap();

        let config = TranslatorConfig::load(&path).unwrap();
        assert_eq!(config.language, "Portuguese");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = TranslatorConfig::load_or_default(&dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config.api_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formulate.yaml");
        std::fs::write(&path, "temperature: [not a number\n").unwrap();

        let err = TranslatorConfig::load(&path).unwrap_err();
        assert!(matches!(err, TranslateError::Config(_)));
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let mut config = TranslatorConfig::default();
        let err = config.resolve_credential_with(None).unwrap_err();
        assert!(matches!(err, TranslateError::Config(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_environment_wins_over_file() {
        let mut config = TranslatorConfig {
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        config
            .resolve_credential_with(Some("env-key".to_string()))
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_blank_environment_falls_back_to_file() {
        let mut config = TranslatorConfig {
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        config
            .resolve_credential_with(Some("   ".to_string()))
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
    }
}
