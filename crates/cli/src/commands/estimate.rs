use std::fs;
use std::path::Path;

use ratecard_core::engine::QuoteEngine;
use ratecard_core::render::{render_markdown, PaymentSchedule};
use ratecard_core::selection::ProjectSelection;
use ratecard_core::validation::validate_contact;

use super::CommandResult;

/// Offline quote computation: reads a selection file, validates the
/// contact step, and prints either the rendered document or JSON. Uses the
/// current rate card release; no configuration is required.
pub fn run(selection_path: &Path, as_json: bool) -> CommandResult {
    let raw = match fs::read_to_string(selection_path) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "estimate",
                "io",
                format!("could not read `{}`: {error}", selection_path.display()),
                2,
            )
        }
    };

    let selection: ProjectSelection = match serde_json::from_str(&raw) {
        Ok(selection) => selection,
        Err(error) => {
            return CommandResult::failure(
                "estimate",
                "selection_parse",
                format!("`{}` is not a valid selection: {error}", selection_path.display()),
                2,
            )
        }
    };

    if let Err(validation) = validate_contact(&selection) {
        let fields = validation
            .field_errors
            .iter()
            .map(|field_error| format!("{}: {}", field_error.field, field_error.message))
            .collect::<Vec<_>>()
            .join("; ");
        return CommandResult::failure("estimate", "validation", fields, 2);
    }

    let quote = QuoteEngine::default().compute(&selection);

    if as_json {
        let payload = serde_json::json!({
            "quote": quote,
            "paymentSchedule": PaymentSchedule::for_total(quote.total_cost),
        });
        let output = serde_json::to_string_pretty(&payload)
            .unwrap_or_else(|error| format!("{{\"error\":\"serialization: {error}\"}}"));
        CommandResult { exit_code: 0, output }
    } else {
        CommandResult { exit_code: 0, output: render_markdown(&quote) }
    }
}
