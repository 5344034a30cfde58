use std::fs;
use std::path::Path;

use ratecard_assistant::client::HttpAssistantClient;
use ratecard_assistant::proxy::{AssistantProxy, AutofillOutcome};
use ratecard_core::config::{AppConfig, LoadOptions};

use super::describe::page_context;
use super::CommandResult;

/// Ask the assistant to parse a free-text description into estimator
/// selections. Prints the selection patch as JSON when extraction
/// succeeds, the clarifying prompt when the readiness gate blocks, or the
/// plain reply when the model answered in prose.
pub fn run(description: Option<String>, file: Option<&Path>) -> CommandResult {
    let description = match (description, file) {
        (Some(text), _) => text,
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                return CommandResult::failure(
                    "autofill",
                    "io",
                    format!("could not read `{}`: {error}", path.display()),
                    2,
                )
            }
        },
        (None, None) => {
            return CommandResult::failure(
                "autofill",
                "usage",
                "pass a description via --description or --file",
                2,
            )
        }
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("autofill", "config_validation", error.to_string(), 2)
        }
    };

    let client = match HttpAssistantClient::new(&config.assistant) {
        Ok(client) => client,
        Err(error) => return CommandResult::failure("autofill", "client", error.to_string(), 3),
    };
    let proxy = AssistantProxy::new(client, config.rate_card());

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("autofill", "runtime", error.to_string(), 3),
    };

    match runtime.block_on(proxy.autofill_from_description(&description, &page_context())) {
        Ok(AutofillOutcome::Applied(patch)) => {
            let output = serde_json::to_string_pretty(&patch)
                .unwrap_or_else(|error| format!("{{\"error\":\"serialization: {error}\"}}"));
            CommandResult { exit_code: 0, output }
        }
        Ok(AutofillOutcome::NeedsInfo(prompt)) => CommandResult { exit_code: 0, output: prompt },
        Ok(AutofillOutcome::Prose(text)) => CommandResult { exit_code: 0, output: text },
        Err(error) => CommandResult::failure(
            "autofill",
            "upstream",
            format!("{} ({error})", error.user_message()),
            3,
        ),
    }
}
