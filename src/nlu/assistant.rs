//! Conversational intent-extraction client.
//!
//! Posts each utterance to the assistant workspace message endpoint
//! (`/v1/workspaces/{id}/message`) and pulls the top-ranked intent out of
//! the response. A response with no intents is a valid answer meaning
//! "nothing recognized" — the caller no-ops, nothing errors.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::config::{AssistantConfig, Credentials};
use super::interface::{ClassifiedIntent, IntentClassifier, NluError};
use crate::utils::http::request_with_retry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_RETRIES: u32 = 2;

pub struct AssistantIntentClassifier {
    client: reqwest::Client,
    service_url: String,
    workspace_id: String,
    version_date: String,
    credentials: Credentials,
}

// Wire shape of the message response; everything we don't use is ignored.
#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    intents: Vec<IntentHit>,
}

#[derive(Debug, Deserialize)]
struct IntentHit {
    intent: String,
    #[serde(default)]
    confidence: f64,
}

impl AssistantIntentClassifier {
    pub fn new(config: &AssistantConfig) -> Result<Self, NluError> {
        let credentials = config.service.resolve_credentials()?;
        if config.workspace_id.is_empty() {
            return Err(NluError::ConfigError(
                "assistant workspace_id is not set".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            service_url: config.service.service_url.trim_end_matches('/').to_string(),
            workspace_id: config.workspace_id.clone(),
            version_date: config.service.version_date.clone(),
            credentials,
        })
    }

    fn message_url(&self) -> String {
        format!(
            "{}/v1/workspaces/{}/message?version={}",
            self.service_url, self.workspace_id, self.version_date
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Credentials::IamApiKey(key) => request.basic_auth("apikey", Some(key)),
        }
    }
}

#[async_trait]
impl IntentClassifier for AssistantIntentClassifier {
    fn id(&self) -> String {
        "assistant".to_string()
    }

    async fn is_available(&self) -> bool {
        !self.workspace_id.is_empty()
    }

    async fn classify(&self, utterance: &str) -> Result<Option<ClassifiedIntent>, NluError> {
        let url = self.message_url();
        let body = json!({ "input": { "text": utterance } });

        let response = request_with_retry(
            || {
                self.authorize(self.client.post(&url))
                    .json(&body)
                    .timeout(REQUEST_TIMEOUT)
                    .send()
            },
            MAX_RETRIES,
        )
        .await
        .map_err(NluError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(NluError::Http(format!("API returned {}: {}", status, text)));
        }

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| NluError::MalformedResponse(e.to_string()))?;

        Ok(message.intents.into_iter().next().map(|hit| {
            println!(
                "[Assistant] Intent: #{} ({:.2})",
                hit.intent, hit.confidence
            );
            ClassifiedIntent {
                intent: hit.intent,
                confidence: hit.confidence,
            }
        }))
    }
}
