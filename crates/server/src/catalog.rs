use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};
use ratecard_core::catalog::{LabelTable, RateCard};
use serde::Serialize;

/// Read-only view of the active rate card: the estimator UI's source of
/// truth for labels, hour costs, and surcharges.
#[derive(Clone)]
pub struct CatalogState {
    rate_card: Arc<RateCard>,
}

pub fn router(rate_card: RateCard) -> Router {
    Router::new()
        .route("/catalog", get(catalog))
        .with_state(CatalogState { rate_card: Arc::new(rate_card) })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub version: &'static str,
    pub base_hours: u32,
    pub weekly_capacity_hours: u32,
    pub admin_rate: u32,
    pub developer_rate: u32,
    pub crms: Vec<CatalogEntry>,
    pub clouds: Vec<CatalogEntry>,
    pub integrations: Vec<CatalogEntry>,
    pub ai_tools: Vec<CatalogEntry>,
    pub modules: Vec<CatalogEntry>,
    pub power_ups: Vec<CatalogEntry>,
}

pub async fn catalog(State(state): State<CatalogState>) -> Json<CatalogResponse> {
    let card = &state.rate_card;
    Json(CatalogResponse {
        version: card.version,
        base_hours: card.base_hours,
        weekly_capacity_hours: card.weekly_capacity_hours,
        admin_rate: card.admin_rate,
        developer_rate: card.developer_rate,
        crms: entries(&card.crm_hours),
        clouds: entries(&card.cloud_hours),
        integrations: entries(&card.integration_hours),
        ai_tools: entries(&card.ai_tool_hours),
        modules: entries(&card.module_hours),
        power_ups: entries(&card.power_up_rates),
    })
}

fn entries(table: &LabelTable) -> Vec<CatalogEntry> {
    table.entries().map(|(label, value)| CatalogEntry { label, value }).collect()
}
