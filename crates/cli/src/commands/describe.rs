use std::fs;
use std::path::Path;

use chrono::Utc;
use ratecard_assistant::client::HttpAssistantClient;
use ratecard_assistant::proxy::{AssistantProxy, PageContext};
use ratecard_core::config::{AppConfig, LoadOptions};
use ratecard_core::selection::ProjectSelection;

use super::CommandResult;

/// Ask the assistant to draft a project narrative from a selection file.
/// Advisory output only; nothing is written back.
pub fn run(selection_path: &Path) -> CommandResult {
    let raw = match fs::read_to_string(selection_path) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "describe",
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
                "describe",
                "selection_parse",
                format!("`{}` is not a valid selection: {error}", selection_path.display()),
                2,
            )
        }
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("describe", "config_validation", error.to_string(), 2)
        }
    };

    let client = match HttpAssistantClient::new(&config.assistant) {
        Ok(client) => client,
        Err(error) => return CommandResult::failure("describe", "client", error.to_string(), 3),
    };
    let proxy = AssistantProxy::new(client, config.rate_card());

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("describe", "runtime", error.to_string(), 3),
    };

    match runtime.block_on(proxy.draft_description(&selection, &page_context())) {
        Ok(narrative) => CommandResult { exit_code: 0, output: narrative },
        Err(error) => CommandResult::failure(
            "describe",
            "upstream",
            format!("{} ({error})", error.user_message()),
            3,
        ),
    }
}

pub(crate) fn page_context() -> PageContext {
    PageContext {
        current_page: "estimator".to_string(),
        current_date: Utc::now().format("%-m/%-d/%Y").to_string(),
    }
}
