use thiserror::Error;

/// The assistant actions that consume from the per-session budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistantAction {
    DraftDescription,
    Autofill,
}

impl AssistantAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DraftDescription => "draft description",
            Self::Autofill => "autofill",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChatSessionError {
    #[error("another assistant request is still in flight")]
    Busy,
    #[error("the {action} action reached its limit of {limit} uses for this session")]
    LimitReached { action: &'static str, limit: u8 },
}

const DEFAULT_ACTION_LIMIT: u8 = 3;

/// Explicit per-chat-session state: at most one outstanding request, and a
/// small budget per action type so repeated model calls cannot run away.
/// Failed requests still consume budget; the user retries deliberately.
#[derive(Clone, Debug)]
pub struct ChatSession {
    in_flight: bool,
    draft_uses: u8,
    autofill_uses: u8,
    action_limit: u8,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_action_limit(DEFAULT_ACTION_LIMIT)
    }

    pub fn with_action_limit(action_limit: u8) -> Self {
        Self { in_flight: false, draft_uses: 0, autofill_uses: 0, action_limit }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn remaining(&self, action: AssistantAction) -> u8 {
        self.action_limit.saturating_sub(self.uses(action))
    }

    /// Reserve the session for one request. Call `finish` once the request
    /// resolves, success or failure.
    pub fn begin(&mut self, action: AssistantAction) -> Result<(), ChatSessionError> {
        if self.in_flight {
            return Err(ChatSessionError::Busy);
        }
        if self.uses(action) >= self.action_limit {
            return Err(ChatSessionError::LimitReached {
                action: action.display_name(),
                limit: self.action_limit,
            });
        }

        match action {
            AssistantAction::DraftDescription => self.draft_uses += 1,
            AssistantAction::Autofill => self.autofill_uses += 1,
        }
        self.in_flight = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    fn uses(&self, action: AssistantAction) -> u8 {
        match action {
            AssistantAction::DraftDescription => self.draft_uses,
            AssistantAction::Autofill => self.autofill_uses,
        }
    }
}
