//! NLU configuration — persisted to `nlu_config.json`.
//!
//! Both cloud services accept either basic-auth username/password or an IAM
//! API key (sent as basic auth with the literal user "apikey"). Keys may be
//! given directly or via an environment variable name.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::interface::NluError;
use crate::character::tone::DEFAULT_CONFIDENCE_THRESHOLD;

/// Resolved credentials for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    IamApiKey(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluServiceConfig {
    /// Service base URL.
    pub service_url: String,
    /// API version date, YYYY-MM-DD.
    pub version_date: String,

    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Direct IAM API key (takes precedence over env var).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name to read the IAM API key from.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl NluServiceConfig {
    /// Username/password wins when both are present, matching the original
    /// service setup order. Missing both is a config error, surfaced at
    /// construction — never mid-conversation.
    pub fn resolve_credentials(&self) -> Result<Credentials, NluError> {
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            if !username.is_empty() && !password.is_empty() {
                return Ok(Credentials::Basic {
                    username: username.clone(),
                    password: password.clone(),
                });
            }
        }
        if let Some(key) = crate::config::resolve_api_key(&self.api_key, &self.api_key_env) {
            return Ok(Credentials::IamApiKey(key));
        }
        Err(NluError::ConfigError(
            "provide either username and password or an IAM apikey".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(flatten)]
    pub service: NluServiceConfig,
    /// Workspace holding the intent training data.
    pub workspace_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluConfig {
    #[serde(default = "default_assistant")]
    pub assistant: AssistantConfig,
    #[serde(default = "default_tone_service")]
    pub tone: NluServiceConfig,
    /// Winning-tone confidence the color change requires.
    #[serde(default = "default_threshold")]
    pub confidence_threshold: f32,
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            assistant: default_assistant(),
            tone: default_tone_service(),
            confidence_threshold: default_threshold(),
        }
    }
}

fn default_assistant() -> AssistantConfig {
    AssistantConfig {
        service: NluServiceConfig {
            service_url: "https://gateway.watsonplatform.net/conversation/api".to_string(),
            version_date: "2017-05-25".to_string(),
            username: None,
            password: None,
            api_key: None,
            api_key_env: Some("ASSISTANT_APIKEY".to_string()),
        },
        workspace_id: String::new(),
    }
}

fn default_tone_service() -> NluServiceConfig {
    NluServiceConfig {
        service_url: "https://gateway.watsonplatform.net/tone-analyzer/api".to_string(),
        version_date: "2017-05-25".to_string(),
        username: None,
        password: None,
        api_key: None,
        api_key_env: Some("TONE_ANALYZER_APIKEY".to_string()),
    }
}

fn default_threshold() -> f32 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

pub fn load_config(path: &Path) -> NluConfig {
    crate::config::load_json_config(path, "NLU")
}

pub fn save_config(path: &Path, config: &NluConfig) -> anyhow::Result<()> {
    crate::config::save_json_config(path, config, "NLU")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_wins_over_api_key() {
        let config = NluServiceConfig {
            service_url: "https://example.test".to_string(),
            version_date: "2017-05-25".to_string(),
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            api_key: Some("key".to_string()),
            api_key_env: None,
        };
        assert_eq!(
            config.resolve_credentials().unwrap(),
            Credentials::Basic {
                username: "user".to_string(),
                password: "pass".to_string()
            }
        );
    }

    #[test]
    fn api_key_used_when_no_basic_auth() {
        let config = NluServiceConfig {
            service_url: "https://example.test".to_string(),
            version_date: "2017-05-25".to_string(),
            username: None,
            password: None,
            api_key: Some("key".to_string()),
            api_key_env: None,
        };
        assert_eq!(
            config.resolve_credentials().unwrap(),
            Credentials::IamApiKey("key".to_string())
        );
    }

    #[test]
    fn missing_credentials_is_a_config_error() {
        let config = NluServiceConfig {
            service_url: "https://example.test".to_string(),
            version_date: "2017-05-25".to_string(),
            username: None,
            password: None,
            api_key: None,
            api_key_env: None,
        };
        assert!(matches!(
            config.resolve_credentials(),
            Err(NluError::ConfigError(_))
        ));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = NluConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: NluConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.confidence_threshold, config.confidence_threshold);
        assert_eq!(
            parsed.assistant.service.service_url,
            config.assistant.service.service_url
        );
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nlu_config.json");

        let mut config = NluConfig::default();
        config.assistant.workspace_id = "ws-123".to_string();
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path);
        assert_eq!(loaded.assistant.workspace_id, "ws-123");
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let loaded = load_config(Path::new("/nonexistent/nlu_config.json"));
        assert_eq!(loaded.confidence_threshold, DEFAULT_CONFIDENCE_THRESHOLD);
    }
}
