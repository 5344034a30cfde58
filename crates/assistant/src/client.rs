use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ratecard_core::config::AssistantConfig;

const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Request sent to the assistant proxy with every chat turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub current_page: String,
    pub current_date: String,
    pub project_goals: String,
}

/// Successful proxy reply. `content` may be Markdown and may embed a
/// fenced JSON configuration block; see `reply::parse_reply`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    details: Option<String>,
}

/// Network or upstream failure. Non-fatal: the user sees a generic retry
/// message and must resend manually; there is no automatic backoff.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("assistant request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("assistant returned status {status}: {detail}")]
    Http { status: u16, detail: String },
    #[error("assistant returned an empty reply")]
    EmptyReply,
}

impl UpstreamError {
    pub fn user_message(&self) -> &'static str {
        "I'm having trouble connecting right now. Please try again in a moment."
    }
}

#[async_trait]
pub trait AssistantClient: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, UpstreamError>;
}

/// `reqwest`-backed client for the chat proxy. The bearer credential is a
/// public low-privilege token supplied with every request; it is not a
/// security boundary on the proxy's side.
pub struct HttpAssistantClient {
    client: reqwest::Client,
    endpoint: String,
    anon_token: SecretString,
}

impl HttpAssistantClient {
    pub fn new(config: &AssistantConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            anon_token: config.anon_token.clone(),
        })
    }
}

#[async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, UpstreamError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.anon_token.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                detail: failure_detail(&body),
            });
        }

        let reply: ChatReply = response.json().await?;
        if reply.content.trim().is_empty() {
            return Err(UpstreamError::EmptyReply);
        }

        Ok(reply)
    }
}

/// Failure bodies are either `{error, details?}` JSON or opaque text (for
/// example an HTML runtime error page); both must surface something usable.
fn failure_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.details.unwrap_or(parsed.error);
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no error detail provided".to_string();
    }
    trimmed.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}
