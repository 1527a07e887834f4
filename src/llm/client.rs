use crate::config::AppraisalConfig;
use crate::error::{AppraisalError, Result};
use crate::llm::types::*;
use log::{debug, error};
use reqwest::Client;

#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl Default for OpenRouterClient {
    fn default() -> Self {
        Self::from_config(&AppraisalConfig::default())
    }
}

impl OpenRouterClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AppraisalConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Point the client at another OpenAI-compatible endpoint (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` as a single user message and return the first choice's text.
    ///
    /// One attempt only. A blank credential fails before any request is made.
    pub async fn complete(&self, prompt: &str, credential: &str) -> Result<String> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(AppraisalError::MissingCredential);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            "Request Body: {}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );

        let res = self
            .client
            .post(&url)
            .bearer_auth(credential)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            error!("API Error Data (status {}): {}", status, err_text);
            return Err(AppraisalError::UpstreamRequestFailed {
                status: status.as_u16(),
                body: err_text,
            });
        }

        let body: ChatCompletionResponse = res.json().await?;

        body.choices
            .into_iter()
            .next()
            .ok_or_else(|| AppraisalError::InvalidResponse("Empty choices list".to_string()))?
            .message
            .content
            .ok_or_else(|| AppraisalError::InvalidResponse("Choice has no message content".to_string()))
    }
}
