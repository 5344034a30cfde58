use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::post,
    Router,
};
use ratecard_core::engine::{Quote, QuoteEngine};
use ratecard_core::render::{render_markdown, PaymentSchedule};
use ratecard_core::selection::ProjectSelection;
use ratecard_core::validation::{validate_contact, FieldError};
use serde::{Deserialize, Serialize};
use tera::Tera;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct EstimateState {
    engine: QuoteEngine,
    templates: Arc<Tera>,
}

impl EstimateState {
    pub fn new(engine: QuoteEngine, templates: Arc<Tera>) -> Self {
        Self { engine, templates }
    }
}

pub fn router(state: EstimateState) -> Router {
    Router::new().route("/estimate", post(estimate)).with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct EstimateQuery {
    format: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateResponse {
    quote: Quote,
    payment_schedule: PaymentSchedule,
    document: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationBody {
    error: &'static str,
    field_errors: Vec<FieldError>,
}

pub async fn estimate(
    State(state): State<EstimateState>,
    Query(query): Query<EstimateQuery>,
    Json(selection): Json<ProjectSelection>,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Err(validation) = validate_contact(&selection) {
        info!(
            event_name = "estimate.validation_failed",
            correlation_id = %correlation_id,
            field_errors = validation.field_errors.len(),
            "estimate rejected by contact validation"
        );
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationBody {
                error: "validation_failed",
                field_errors: validation.field_errors,
            }),
        )
            .into_response();
    }

    let quote = state.engine.compute(&selection);
    let payment_schedule = PaymentSchedule::for_total(quote.total_cost);
    info!(
        event_name = "estimate.quote_generated",
        correlation_id = %correlation_id,
        rate_card_version = %quote.rate_card_version,
        adjusted_hours = quote.adjusted_hours,
        total_cost = quote.total_cost,
        "quote generated"
    );

    if query.format.as_deref() == Some("html") {
        return match render_html(&state.templates, &quote, payment_schedule) {
            Ok(html) => Html(html).into_response(),
            Err(render_error) => {
                error!(
                    event_name = "estimate.render_failed",
                    correlation_id = %correlation_id,
                    error = %render_error,
                    "quote template rendering failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "quote rendering failed" })),
                )
                    .into_response()
            }
        };
    }

    let document = render_markdown(&quote);
    (StatusCode::OK, Json(EstimateResponse { quote, payment_schedule, document })).into_response()
}

fn render_html(
    templates: &Tera,
    quote: &Quote,
    schedule: PaymentSchedule,
) -> Result<String, tera::Error> {
    let mut context = tera::Context::new();
    context.insert("quote", quote);
    context.insert("schedule", &schedule);
    templates.render("quote.html", &context)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::Json;
    use ratecard_core::catalog::SelectionCategory;
    use ratecard_core::engine::QuoteEngine;
    use ratecard_core::selection::ProjectSelection;
    use tera::Tera;

    use super::{estimate, EstimateQuery, EstimateState};

    fn state() -> EstimateState {
        let mut tera = Tera::default();
        tera.add_raw_template("quote.html", include_str!("../templates/quote.html.tera"))
            .expect("template compiles");
        EstimateState::new(QuoteEngine::default(), Arc::new(tera))
    }

    fn selection() -> ProjectSelection {
        let mut selection = ProjectSelection {
            first_name: "John".to_string(),
            last_name: "Burkhardt".to_string(),
            work_email: "john@example.com".to_string(),
            ..ProjectSelection::default()
        };
        selection.toggle(SelectionCategory::Crm, "Salesforce");
        selection
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body is readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn valid_selection_returns_the_quote_and_schedule() {
        let response = estimate(
            State(state()),
            Query(EstimateQuery::default()),
            Json(selection()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response).await;
        assert_eq!(payload["quote"]["totalCost"], 4480);
        assert_eq!(payload["quote"]["adjustedHours"], 70);
        assert_eq!(payload["quote"]["estimatedWeeks"], 2);
        assert_eq!(payload["paymentSchedule"]["upfront"], 2240);
        assert_eq!(payload["paymentSchedule"]["midpoint"], 2240);
        let document = payload["document"].as_str().expect("document is rendered");
        assert!(document.contains("Total investment: $4480"));
    }

    #[tokio::test]
    async fn missing_contact_channel_is_a_single_422_error() {
        let mut incomplete = selection();
        incomplete.work_email.clear();
        incomplete.mobile_phone.clear();

        let response =
            estimate(State(state()), Query(EstimateQuery::default()), Json(incomplete)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let payload = body_json(response).await;
        assert_eq!(payload["error"], "validation_failed");
        let field_errors = payload["fieldErrors"].as_array().expect("field errors present");
        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0]["field"], "contact");
    }

    #[tokio::test]
    async fn html_format_renders_the_quote_document() {
        let response = estimate(
            State(state()),
            Query(EstimateQuery { format: Some("html".to_string()) }),
            Json(selection()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body is readable");
        let html = String::from_utf8(bytes.to_vec()).expect("body is utf-8");
        assert!(html.contains("Tech Project Quote"));
        assert!(html.contains("John Burkhardt"));
        assert!(html.contains("$4480"));
        assert!(html.contains("$2240"));
    }
}
