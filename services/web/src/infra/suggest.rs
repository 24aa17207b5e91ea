use anyhow::Context as _;
use serde::Deserialize;

use crate::domain::repository::SuggestionProvider;
use crate::error::WebServiceError;
use crate::infra::outbound_client;

const STUDY_TIP_PROMPT: &str =
    "Generate a short, motivational study tip that helps improve focus and productivity.";
const STUDY_TIP_MODEL: &str = "gpt-3.5-turbo";

/// Study tips from an OpenAI-compatible chat-completions endpoint. Treated
/// as a black box: the caller falls back to a canned tip on any error.
#[derive(Clone)]
pub struct ChatSuggestionProvider {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ChatSuggestionProvider {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http: outbound_client(),
            api_url,
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl SuggestionProvider for ChatSuggestionProvider {
    async fn study_tip(&self) -> Result<String, WebServiceError> {
        let body = serde_json::json!({
            "model": STUDY_TIP_MODEL,
            "messages": [{"role": "user", "content": STUDY_TIP_PROMPT}],
        });
        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("study tip request")?
            .error_for_status()
            .context("study tip status")?;
        let body: ChatResponse = response.json().await.context("study tip body")?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| WebServiceError::Internal(anyhow::anyhow!("empty choices")))
    }
}
