use ratecard_core::catalog::RateCard;
use ratecard_core::selection::{ProjectSelection, SelectionPatch};
use tracing::info;

use crate::client::{AssistantClient, ChatRequest, UpstreamError};
use crate::prompts;
use crate::readiness;
use crate::reply::{parse_reply, AssistantReply};

/// Where the user is when the assistant is invoked; forwarded to the proxy
/// as session variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContext {
    pub current_page: String,
    pub current_date: String,
}

/// Result of an autofill attempt. `NeedsInfo` is produced locally by the
/// readiness gate; `Prose` is the graceful fallback when the model answered
/// with text instead of configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum AutofillOutcome {
    Applied(SelectionPatch),
    NeedsInfo(String),
    Prose(String),
}

/// The two estimator-facing assistant operations. Stateless: session
/// concerns (usage budget, in-flight flag) live in `session::ChatSession`.
pub struct AssistantProxy<C> {
    client: C,
    rate_card: RateCard,
}

impl<C> AssistantProxy<C>
where
    C: AssistantClient,
{
    pub fn new(client: C, rate_card: RateCard) -> Self {
        Self { client, rate_card }
    }

    /// Draft a natural-language project narrative from the current
    /// selections. Advisory only: the caller decides whether to use the
    /// text as the project description.
    pub async fn draft_description(
        &self,
        selection: &ProjectSelection,
        context: &PageContext,
    ) -> Result<String, UpstreamError> {
        let request = ChatRequest {
            current_page: context.current_page.clone(),
            current_date: context.current_date.clone(),
            project_goals: prompts::draft_description_prompt(selection),
        };

        let reply = self.client.send(&request).await?;
        info!(
            event_name = "assistant.draft_description.completed",
            content_chars = reply.content.len(),
            "assistant drafted a project description"
        );
        Ok(reply.content)
    }

    /// Parse a free-text description back into a selection patch. The
    /// readiness gate runs first and short-circuits with a clarifying
    /// prompt, so the hosted model is never asked to extract from a
    /// description it cannot succeed on.
    pub async fn autofill_from_description(
        &self,
        description: &str,
        context: &PageContext,
    ) -> Result<AutofillOutcome, UpstreamError> {
        if description.trim().is_empty() {
            return Ok(AutofillOutcome::NeedsInfo(prompts::empty_description_prompt()));
        }

        let report = readiness::assess(description);
        if !report.is_ready() {
            info!(
                event_name = "assistant.autofill.gated",
                missing_categories = report.missing.len(),
                "autofill blocked by readiness gate"
            );
            return Ok(AutofillOutcome::NeedsInfo(prompts::clarifying_prompt(&report)));
        }

        let request = ChatRequest {
            current_page: context.current_page.clone(),
            current_date: context.current_date.clone(),
            project_goals: prompts::autofill_prompt(&self.rate_card, description),
        };

        let reply = self.client.send(&request).await?;
        match parse_reply(&reply.content) {
            AssistantReply::Structured(patch) => {
                info!(
                    event_name = "assistant.autofill.applied",
                    "assistant reply parsed as structured configuration"
                );
                Ok(AutofillOutcome::Applied(patch))
            }
            AssistantReply::Prose(text) => Ok(AutofillOutcome::Prose(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use ratecard_core::catalog::{RateCard, SelectionCategory};
    use ratecard_core::selection::ProjectSelection;

    use crate::client::{AssistantClient, ChatReply, ChatRequest, UpstreamError};

    use super::{AssistantProxy, AutofillOutcome, PageContext};

    const READY_DESCRIPTION: &str = "We use Salesforce but manual entry is a bottleneck; the \
        goal is to automate workflows, with a reporting module as the key deliverable.";

    struct ScriptedClient {
        reply: &'static str,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedClient {
        fn new(reply: &'static str) -> Self {
            Self { reply, requests: Mutex::new(Vec::new()) }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().expect("request log").len()
        }
    }

    #[async_trait]
    impl AssistantClient for ScriptedClient {
        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, UpstreamError> {
            self.requests.lock().expect("request log").push(request.clone());
            Ok(ChatReply { content: self.reply.to_string() })
        }
    }

    struct FailingClient;

    #[async_trait]
    impl AssistantClient for FailingClient {
        async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, UpstreamError> {
            Err(UpstreamError::Http { status: 502, detail: "bad gateway".to_string() })
        }
    }

    fn context() -> PageContext {
        PageContext { current_page: "estimator".to_string(), current_date: "8/6/2026".to_string() }
    }

    #[tokio::test]
    async fn draft_description_forwards_selections_and_returns_content() {
        let client = ScriptedClient::new("PROJECT SCOPE & OBJECTIVES\n- Replace manual entry");
        let proxy = AssistantProxy::new(client, RateCard::current());

        let mut selection = ProjectSelection::default();
        selection.toggle(SelectionCategory::Crm, "Salesforce");

        let narrative = proxy
            .draft_description(&selection, &context())
            .await
            .expect("draft should succeed");

        assert!(narrative.contains("PROJECT SCOPE"));
        let requests = proxy.client.requests.lock().expect("request log");
        assert_eq!(requests.len(), 1);
        assert!(requests[0].project_goals.contains("CRMs: Salesforce"));
        assert_eq!(requests[0].current_page, "estimator");
    }

    #[tokio::test]
    async fn empty_description_never_reaches_the_model() {
        let client = ScriptedClient::new("{}");
        let proxy = AssistantProxy::new(client, RateCard::current());

        let outcome = proxy
            .autofill_from_description("   ", &context())
            .await
            .expect("gate result is not an error");

        assert!(matches!(outcome, AutofillOutcome::NeedsInfo(_)));
        assert_eq!(proxy.client.request_count(), 0);
    }

    #[tokio::test]
    async fn incomplete_description_gets_a_clarifying_prompt() {
        let client = ScriptedClient::new("{}");
        let proxy = AssistantProxy::new(client, RateCard::current());

        let outcome = proxy
            .autofill_from_description("We would like some general help", &context())
            .await
            .expect("gate result is not an error");

        let prompt = match outcome {
            AutofillOutcome::NeedsInfo(prompt) => prompt,
            other => panic!("expected NeedsInfo, got {other:?}"),
        };
        assert!(prompt.contains("Current systems/infrastructure"));
        assert_eq!(proxy.client.request_count(), 0);
    }

    #[tokio::test]
    async fn structured_reply_is_applied() {
        let client =
            ScriptedClient::new("```json\n{\"selectedCRMs\": [\"Salesforce\"]}\n```");
        let proxy = AssistantProxy::new(client, RateCard::current());

        let outcome = proxy
            .autofill_from_description(READY_DESCRIPTION, &context())
            .await
            .expect("autofill should succeed");

        let patch = match outcome {
            AutofillOutcome::Applied(patch) => patch,
            other => panic!("expected Applied, got {other:?}"),
        };
        assert_eq!(patch.selected_crms.as_deref(), Some(&["Salesforce".to_string()][..]));
        assert_eq!(proxy.client.request_count(), 1);
    }

    #[tokio::test]
    async fn prose_reply_falls_back_without_error() {
        let client = ScriptedClient::new("Could you tell me more about your timeline?");
        let proxy = AssistantProxy::new(client, RateCard::current());

        let outcome = proxy
            .autofill_from_description(READY_DESCRIPTION, &context())
            .await
            .expect("prose fallback is not an error");

        assert!(matches!(outcome, AutofillOutcome::Prose(_)));
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_the_retry_message() {
        let proxy = AssistantProxy::new(FailingClient, RateCard::current());

        let error = proxy
            .autofill_from_description(READY_DESCRIPTION, &context())
            .await
            .expect_err("upstream failure must surface");

        assert!(error.user_message().contains("try again"));
    }
}
