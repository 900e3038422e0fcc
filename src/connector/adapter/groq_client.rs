use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::CompletionGateway;
use crate::domain::{ClassifiedPrompt, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// [`CompletionGateway`] over Groq's OpenAI-compatible chat-completions API.
///
/// A missing API key does not prevent construction; every call then fails
/// with a 401 upstream error instead. No retries are attempted and no timeout
/// is set beyond the HTTP client's defaults.
///
/// ```text
/// GROQ_API_KEY=gsk_...
/// GROQ_MODEL=llama-3.1-8b-instant
/// GROQ_BASE_URL=https://api.groq.com
/// ```
pub struct GroqClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            url,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first choice; empty when the provider sent none.
    fn extract_text(response: ApiResponse) -> String {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }

    /// Provider-reported message from an error body, falling back to the raw body.
    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => parsed.error.message,
            Err(_) if body.trim().is_empty() => format!("Provider returned {status}"),
            Err(_) => body.trim().to_string(),
        }
    }
}

#[async_trait]
impl CompletionGateway for GroqClient {
    async fn complete(&self, prompt: &ClassifiedPrompt) -> Result<String, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::upstream(Some(401), "GROQ_API_KEY is not configured"))?;

        let request = ApiRequest {
            model: &self.model,
            messages: [
                ApiMessage {
                    role: "system",
                    content: prompt.system_role(),
                },
                ApiMessage {
                    role: "user",
                    content: prompt.task_instruction(),
                },
            ],
            temperature: prompt.temperature(),
        };

        debug!("GroqClient: POST {} (model {})", self.url, self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::upstream(
                    e.status().map(|s| s.as_u16()),
                    format!("Completion request failed: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GroqClient: API returned {status}: {body}");
            return Err(DomainError::upstream(
                Some(status.as_u16()),
                Self::error_message(status, &body),
            ));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(None, format!("Failed to parse completion response: {e}"))
        })?;

        Ok(Self::extract_text(api_response))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
