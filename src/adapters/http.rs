//! OpenAI-compatible chat completions client (Groq by default).

use crate::domain::model::GenerationRequest;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{NoteError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// 取出第一個 choice 的內容，沒有就視為失敗
pub fn extract_content(response: ChatCompletionResponse) -> Result<String> {
    let message = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .ok_or_else(|| NoteError::generation("Empty response from chat completions API"))?;

    match message.content {
        Some(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
        _ => Err(NoteError::generation(
            "No content in chat completions API response",
        )),
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &request.params.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.params.temperature,
            top_p: request.params.top_p,
            max_tokens: request.params.max_tokens,
            stream: false,
        };

        tracing::debug!("Making chat completion request to: {}", self.endpoint());
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Chat completion response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(NoteError::generation(format!(
                "API returned {}: {}",
                status, detail
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        extract_content(parsed)
    }
}
