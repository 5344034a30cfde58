use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use ratecard_core::config::AppConfig;
use secrecy::ExposeSecret;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    upstream_configured: bool,
    model: String,
}

impl HealthState {
    pub fn from_config(config: &AppConfig) -> Self {
        let upstream_configured = config
            .llm
            .api_key
            .as_ref()
            .map(|key| !key.expose_secret().trim().is_empty())
            .unwrap_or(false);

        Self { upstream_configured, model: config.llm.model.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub upstream: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let upstream = upstream_check(&state);
    let ready = upstream.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "ratecard-server runtime initialized".to_string(),
        },
        upstream,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn upstream_check(state: &HealthState) -> HealthCheck {
    if state.upstream_configured {
        HealthCheck {
            status: "ready",
            detail: format!("chat-completion upstream configured for model {}", state.model),
        }
    } else {
        HealthCheck {
            status: "degraded",
            detail: "chat-completion upstream credential is missing".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::Json;

    use super::{health, HealthState};

    #[tokio::test]
    async fn health_returns_ready_when_the_upstream_is_configured() {
        let state = HealthState { upstream_configured: true, model: "gpt-4o".to_string() };

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.service.status, "ready");
        assert_eq!(payload.upstream.status, "ready");
        assert!(payload.upstream.detail.contains("gpt-4o"));
    }

    #[tokio::test]
    async fn health_degrades_without_an_upstream_credential() {
        let state = HealthState { upstream_configured: false, model: "gpt-4o".to_string() };

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.service.status, "ready");
        assert_eq!(payload.upstream.status, "degraded");
    }
}
