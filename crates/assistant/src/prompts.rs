//! Prompt templates for the assistant. The valid catalog options are
//! generated from the active rate card so the model and the engine can
//! never disagree about what a label is called.

use ratecard_core::catalog::RateCard;
use ratecard_core::selection::ProjectSelection;

use crate::readiness::ReadinessReport;

const CONSULTANCY_NAME: &str = "Ratecard Advisory";
const BOOKING_URL: &str = "https://calendly.com/ratecard-advisory/strategy-call";

/// System prompt for the proxy's upstream chat-completion call.
pub fn system_prompt(card: &RateCard, current_page: &str, current_date: &str) -> String {
    format!(
        "You are an AI model acting as a Customer Success Manager and AI Assistant for \
{CONSULTANCY_NAME}, a technology consultancy focused on CRM architecture, AI systems, and \
sales automation.

PRIMARY OBJECTIVES
1. When users express interest in meetings, consulting, or services, direct them to book a \
strategy call: {BOOKING_URL}
2. Help users prepare a Structured Project Description for the Tech Project Estimator by \
gathering required information in a strict, deterministic order and outputting only the \
approved format.

SESSION VARIABLES
- Current Page: {current_page}
- Current Date: {current_date}

SCHEDULING RULE (HIGHEST PRIORITY)
If the user requests or implies interest in meetings, consulting, or services, respond ONLY \
with:
\"You can book a strategy call directly here: {BOOKING_URL}\"

PRICING & ESTIMATION RULES
- Never provide prices, costs, or dollar amounts.
- For any pricing or estimate request, respond EXACTLY with:
\"Our Tech Project Estimator can give you a tailored range based on your specific \
requirements. Would you like me to help you draft a description to get the best result?\"

TECH STACK OPTIONS (IMPORTANT - use these exact options)
When parsing project descriptions for autofill, use ONLY these valid options:

CRM Platforms: {crms}
Salesforce Clouds: {clouds}
Integrations: {integrations}
AI Tools: {ai_tools}
Service Modules: {modules}

DATA GATHERING LOGIC (STRICT ORDER)
Always collect information in this order:
1. Current systems/infrastructure
2. Pain points/challenges
3. Desired outcomes & measurable goals
4. Required automations/integrations
5. Key deliverables/requirements
6. Timeline & constraints (budget only if explicitly provided)

- Ask only concise, bulleted questions.
- No conversational filler.
- Do not generate conclusions, recommendations, or scope until all sections are addressed.

STRUCTURED PROJECT DESCRIPTION FORMAT (STRICT)
When generating a scope, output ONLY the following headers and bullet points. Use \"[TBD]\" \
where information is missing.

PROJECT SCOPE & OBJECTIVES
CURRENT INFRASTRUCTURE
PAIN POINTS & CHALLENGES
AUTOMATIONS & INTEGRATIONS
DELIVERABLES & REQUIREMENTS
TIMELINE & CONSTRAINTS

Continue gathering missing data until all fields are complete.",
        crms = joined_labels(&card.crm_hours),
        clouds = joined_labels(&card.cloud_hours),
        integrations = joined_labels(&card.integration_hours),
        ai_tools = joined_labels(&card.ai_tool_hours),
        modules = joined_labels(&card.module_hours),
    )
}

/// Ask for a narrative project description from the current selections.
pub fn draft_description_prompt(selection: &ProjectSelection) -> String {
    format!(
        "Write a comprehensive project description based on these configurations:
- CRMs: {}
- Clouds: {}
- Integrations: {}
- AI Tools: {}
- Modules: {}

Format it as a professional project overview for {CONSULTANCY_NAME}.",
        joined_or_none(&selection.selected_crms),
        joined_or_none(&selection.selected_clouds),
        joined_or_none(&selection.selected_integrations),
        joined_or_none(&selection.selected_ai_tools),
        joined_or_none(&selection.additional_modules),
    )
}

/// Ask for structured extraction of a free-text description into the five
/// catalog keys. Only called once the readiness gate has passed.
pub fn autofill_prompt(card: &RateCard, description: &str) -> String {
    format!(
        "Parse the following project description and return ONLY a JSON object containing \
the matching configurations.
Description: \"{description}\"

Use these keys: selectedCRMs, selectedClouds, selectedIntegrations, selectedAITools, \
additionalModules.

Valid options for CRMs: {crms}.
Valid Clouds: {clouds}.
Valid Integrations: {integrations}.
Valid AI Tools: {ai_tools}.
Valid Modules: {modules}.",
        crms = joined_labels(&card.crm_hours),
        clouds = joined_labels(&card.cloud_hours),
        integrations = joined_labels(&card.integration_hours),
        ai_tools = joined_labels(&card.ai_tool_hours),
        modules = joined_labels(&card.module_hours),
    )
}

/// Clarifying reply returned locally when the readiness gate finds gaps.
pub fn clarifying_prompt(report: &ReadinessReport) -> String {
    let missing = report
        .missing
        .iter()
        .map(|category| format!("- **{}**", category.display_name()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I'd like to autofill your estimator, but I need more information. Please add details \
about:

{missing}

Optionally, you can also include:
- Timeline & budget constraints

This will help me provide a more accurate configuration!"
    )
}

/// Reply for an autofill attempt with no description at all.
pub fn empty_description_prompt() -> String {
    "I'd like to autofill the estimator, but the project description is empty. Can you please \
provide details using this format?

- **Systems:** (e.g. Salesforce, Slack)
- **Pain Points:** (e.g. manual data entry)
- **Goals:** (e.g. automate lead routing)
- **Users:** (e.g. 50 sales reps)"
        .to_string()
}

fn joined_labels(table: &ratecard_core::catalog::LabelTable) -> String {
    table.labels().collect::<Vec<_>>().join(", ")
}

fn joined_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "None selected".to_string()
    } else {
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use ratecard_core::catalog::{RateCard, SelectionCategory};
    use ratecard_core::selection::ProjectSelection;

    use crate::readiness::assess;

    use super::{autofill_prompt, clarifying_prompt, draft_description_prompt, system_prompt};

    #[test]
    fn system_prompt_lists_the_active_catalog() {
        let prompt = system_prompt(&RateCard::current(), "estimator", "8/6/2026");

        assert!(prompt.contains("Current Page: estimator"));
        assert!(prompt.contains("Current Date: 8/6/2026"));
        assert!(prompt.contains("Salesforce, Dynamics 365, GoHighLevel"));
        assert!(prompt.contains("Agentforce"));
        assert!(prompt.contains("Never provide prices"));
    }

    #[test]
    fn draft_prompt_marks_empty_categories_as_none() {
        let mut selection = ProjectSelection::default();
        selection.toggle(SelectionCategory::Crm, "HubSpot");

        let prompt = draft_description_prompt(&selection);
        assert!(prompt.contains("CRMs: HubSpot"));
        assert!(prompt.contains("Clouds: None selected"));
    }

    #[test]
    fn autofill_prompt_embeds_description_and_keys() {
        let prompt = autofill_prompt(&RateCard::current(), "Salesforce to Slack automation");

        assert!(prompt.contains("Salesforce to Slack automation"));
        assert!(prompt.contains("selectedCRMs"));
        assert!(prompt.contains("selectedAITools"));
        assert!(prompt.contains("Valid Integrations: Slack, Asana"));
    }

    #[test]
    fn clarifying_prompt_names_each_missing_category() {
        let report = assess("");
        let prompt = clarifying_prompt(&report);

        assert!(prompt.contains("Current systems/infrastructure"));
        assert!(prompt.contains("Key deliverables/requirements"));
    }
}
