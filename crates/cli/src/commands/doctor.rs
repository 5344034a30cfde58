use ratecard_core::catalog::{RateCard, SelectionCategory};
use ratecard_core::config::{AppConfig, LoadOptions};
use ratecard_core::engine::QuoteEngine;
use ratecard_core::selection::ProjectSelection;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
}

/// Runtime readiness checks: configuration, rate card resolution, and a
/// deterministic pricing self-test against a known quote.
pub fn run(json: bool) -> String {
    let mut checks = Vec::new();

    let loaded_config = AppConfig::load(LoadOptions::default());
    match &loaded_config {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config",
                status: "ok",
                detail: format!(
                    "configuration valid; assistant endpoint {}",
                    config.assistant.endpoint
                ),
            });
            checks.push(DoctorCheck {
                name: "rate_card",
                status: "ok",
                detail: format!("pricing.version {} resolves", config.pricing.version),
            });
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config",
                status: "error",
                detail: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "rate_card",
                status: "skipped",
                detail: format!("falling back to rate card {}", RateCard::current().version),
            });
        }
    }

    checks.push(pricing_self_test());

    if json {
        serde_json::to_string_pretty(&checks)
            .unwrap_or_else(|error| format!("{{\"error\":\"serialization: {error}\"}}"))
    } else {
        checks
            .iter()
            .map(|check| format!("- {}: {} ({})", check.name, check.status, check.detail))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// Recompute the published worked example and verify the exact totals.
fn pricing_self_test() -> DoctorCheck {
    let mut selection = ProjectSelection {
        first_name: "Self".to_string(),
        last_name: "Test".to_string(),
        work_email: "selftest@example.com".to_string(),
        ..ProjectSelection::default()
    };
    selection.toggle(SelectionCategory::Crm, "Salesforce");

    let quote = QuoteEngine::default().compute(&selection);
    let expected = (70u32, 64u32, 4480u64, 2u32);
    let actual =
        (quote.adjusted_hours, quote.final_hourly_rate, quote.total_cost, quote.estimated_weeks);

    if actual == expected {
        DoctorCheck {
            name: "pricing",
            status: "ok",
            detail: "deterministic pricing verified against the reference quote".to_string(),
        }
    } else {
        DoctorCheck {
            name: "pricing",
            status: "error",
            detail: format!("reference quote mismatch: expected {expected:?}, got {actual:?}"),
        }
    }
}
