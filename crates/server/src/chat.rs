//! The assistant proxy endpoint. Receives the estimator's chat turns,
//! wraps them in the consultancy system prompt, forwards them to the
//! hosted chat-completion API, and relays the text reply. All pricing
//! intelligence stays in the engine; this endpoint never sees a number it
//! could change.

use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use ratecard_assistant::client::{ChatReply, ChatRequest};
use ratecard_assistant::prompts;
use ratecard_core::catalog::RateCard;
use ratecard_core::config::AppConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;
const UPSTREAM_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Clone)]
pub struct ChatState {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    timeout: Duration,
    max_retries: u32,
    rate_card: RateCard,
}

impl ChatState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.llm.base_url.clone(),
            api_key: config.llm.api_key.clone().unwrap_or_else(|| String::new().into()),
            model: config.llm.model.clone(),
            timeout: Duration::from_secs(config.llm.timeout_secs),
            max_retries: config.llm.max_retries,
            rate_card: config.rate_card(),
        }
    }
}

pub fn router(state: ChatState) -> Router {
    Router::new().route("/chat", post(chat)).with_state(state)
}

#[derive(Debug, Serialize)]
struct ChatErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug, Error)]
enum ChatProxyError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16, detail: String },
    #[error("upstream returned an empty completion")]
    EmptyCompletion,
}

impl ChatProxyError {
    fn into_response_parts(self) -> (StatusCode, ChatErrorBody) {
        match self {
            Self::Transport(error) => (
                StatusCode::BAD_GATEWAY,
                ChatErrorBody {
                    error: "upstream request failed".to_string(),
                    details: Some(error.to_string()),
                },
            ),
            Self::UpstreamStatus { status, detail } => (
                StatusCode::BAD_GATEWAY,
                ChatErrorBody {
                    error: format!("upstream returned status {status}"),
                    details: (!detail.is_empty()).then_some(detail),
                },
            ),
            Self::EmptyCompletion => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ChatErrorBody { error: "upstream returned an empty response".to_string(), details: None },
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionChoiceMessage {
    content: Option<String>,
}

pub async fn chat(State(state): State<ChatState>, Json(request): Json<ChatRequest>) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    info!(
        event_name = "chat.request_received",
        correlation_id = %correlation_id,
        current_page = %request.current_page,
        "chat request received"
    );

    match complete(&state, &request).await {
        Ok(content) => {
            info!(
                event_name = "chat.reply_relayed",
                correlation_id = %correlation_id,
                content_chars = content.len(),
                "chat reply relayed"
            );
            (StatusCode::OK, Json(ChatReply { content })).into_response()
        }
        Err(error) => {
            warn!(
                event_name = "chat.upstream_failed",
                correlation_id = %correlation_id,
                error = %error,
                "chat proxying failed"
            );
            let (status, body) = error.into_response_parts();
            (status, Json(body)).into_response()
        }
    }
}

async fn complete(state: &ChatState, request: &ChatRequest) -> Result<String, ChatProxyError> {
    let system_prompt =
        prompts::system_prompt(&state.rate_card, &request.current_page, &request.current_date);
    let user_message = if request.project_goals.trim().is_empty() {
        "User needs assistance"
    } else {
        request.project_goals.as_str()
    };

    let body = CompletionRequest {
        model: &state.model,
        messages: vec![
            CompletionMessage { role: "system", content: &system_prompt },
            CompletionMessage { role: "user", content: user_message },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };
    let url = format!("{}{}", state.base_url.trim_end_matches('/'), COMPLETIONS_PATH);

    let mut attempt = 0u32;
    let response = loop {
        attempt += 1;
        let result = state
            .client
            .post(&url)
            .bearer_auth(state.api_key.expose_secret())
            .timeout(state.timeout)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) => break response,
            // Transport-level failures are retried up to the configured
            // budget; HTTP-level failures are not.
            Err(error)
                if attempt <= state.max_retries && (error.is_connect() || error.is_timeout()) =>
            {
                warn!(
                    event_name = "chat.upstream_retry",
                    attempt,
                    error = %error,
                    "retrying upstream completion call"
                );
            }
            Err(error) => return Err(ChatProxyError::Transport(error)),
        }
    };

    let status = response.status();
    if !status.is_success() {
        let detail: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(UPSTREAM_BODY_PREVIEW_CHARS)
            .collect();
        return Err(ChatProxyError::UpstreamStatus { status: status.as_u16(), detail });
    }

    let completion: CompletionResponse = response.json().await?;
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(ChatProxyError::EmptyCompletion);
    }

    Ok(content)
}
