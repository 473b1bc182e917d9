use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::LlmSettings;

/// Returned when the service answers successfully but without any text part.
pub const NO_TEXT_PLACEHOLDER: &str = "No text returned";

/// Credential attached to every request, resolved once when the client is built.
#[derive(Clone)]
pub enum GeminiCredential {
    ApiKey(String),
    BearerToken(String),
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    credential: GeminiCredential,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        model: &str,
        credential: GeminiCredential,
        timeout: Duration,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            credential,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credential {
            GeminiCredential::ApiKey(key) => request.header("x-goog-api-key", key),
            GeminiCredential::BearerToken(token) => request.bearer_auth(token),
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        tracing::debug!(
            model = %self.model,
            prompt = %sanitize_prompt(prompt),
            "sending generateContent request"
        );

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let request = self.client.post(self.endpoint()).json(&request_body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let text = completion
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            tracing::warn!(model = %self.model, "response contained no text");
            return Ok(NO_TEXT_PLACEHOLDER.to_string());
        }

        Ok(text)
    }
}

pub fn create_llm_client(settings: &LlmSettings) -> Result<GeminiClient, LlmClientError> {
    let credential = match (&settings.access_token, &settings.api_key) {
        (Some(token), _) if !token.is_empty() => GeminiCredential::BearerToken(token.clone()),
        (_, Some(key)) if !key.is_empty() => GeminiCredential::ApiKey(key.clone()),
        _ => {
            return Err(LlmClientError::Configuration(
                "llm.api_key or llm.access_token required".to_string(),
            ));
        }
    };

    GeminiClient::new(
        &settings.base_url,
        &settings.model,
        credential,
        Duration::from_secs(settings.timeout_secs),
    )
}
