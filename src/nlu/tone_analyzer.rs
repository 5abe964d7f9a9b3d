//! Tone-analysis client.
//!
//! Posts each utterance to the `/v3/tone` endpoint and lifts the emotion
//! category scores into a `ToneScores`. The service reports tones grouped
//! into categories; only the leading emotion category matters here.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::config::{Credentials, NluServiceConfig};
use super::interface::{NluError, ToneClassifier, ToneScores};
use crate::character::tone::Emotion;
use crate::utils::http::request_with_retry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_RETRIES: u32 = 2;

pub struct ToneAnalyzerClient {
    client: reqwest::Client,
    service_url: String,
    version_date: String,
    credentials: Credentials,
}

// Wire shape, e.g. {"document_tone":{"tone_categories":[{"tones":[
//   {"score":0.1,"tone_id":"anger","tone_name":"Anger"}, ... ]}]}}
#[derive(Debug, Deserialize)]
struct ToneResponse {
    document_tone: DocumentTone,
}

#[derive(Debug, Deserialize)]
struct DocumentTone {
    #[serde(default)]
    tone_categories: Vec<ToneCategory>,
}

#[derive(Debug, Deserialize)]
struct ToneCategory {
    #[serde(default)]
    tones: Vec<ToneScore>,
}

#[derive(Debug, Deserialize)]
struct ToneScore {
    score: f64,
    tone_id: String,
}

impl ToneAnalyzerClient {
    pub fn new(config: &NluServiceConfig) -> Result<Self, NluError> {
        Ok(Self {
            client: reqwest::Client::new(),
            service_url: config.service_url.trim_end_matches('/').to_string(),
            version_date: config.version_date.clone(),
            credentials: config.resolve_credentials()?,
        })
    }

    fn tone_url(&self) -> String {
        format!("{}/v3/tone?version={}", self.service_url, self.version_date)
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
impl ToneClassifier for ToneAnalyzerClient {
    fn id(&self) -> String {
        "tone-analyzer".to_string()
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn analyze(&self, utterance: &str) -> Result<ToneScores, NluError> {
        let url = self.tone_url();
        let body = json!({ "text": utterance });

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

        let tone: ToneResponse = response
            .json()
            .await
            .map_err(|e| NluError::MalformedResponse(e.to_string()))?;

        let category = tone
            .document_tone
            .tone_categories
            .into_iter()
            .next()
            .ok_or_else(|| {
                NluError::MalformedResponse("response carries no tone categories".to_string())
            })?;

        // Match tones by id rather than position so a reordered or partial
        // category still parses; unknown ids are skipped.
        let mut scores = ToneScores::default();
        for tone in category.tones {
            if let Some(emotion) = Emotion::from_label(&tone.tone_id) {
                scores.set(emotion, tone.score);
            }
        }
        Ok(scores)
    }
}
