use thiserror::Error;

use crate::engine::{Quote, QuoteEngine};
use crate::selection::ProjectSelection;
use crate::validation::{validate_contact, ValidationError};

/// The four estimator steps, in submission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EstimatorStep {
    Contact,
    TechStack,
    Services,
    Team,
}

impl EstimatorStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::TechStack => 2,
            Self::Services => 3,
            Self::Team => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Contact => "Contact Info",
            Self::TechStack => "CRMs & Tools",
            Self::Services => "Services",
            Self::Team => "Team & Extras",
        }
    }

    fn next(&self) -> Option<Self> {
        match self {
            Self::Contact => Some(Self::TechStack),
            Self::TechStack => Some(Self::Services),
            Self::Services => Some(Self::Team),
            Self::Team => None,
        }
    }

    fn previous(&self) -> Option<Self> {
        match self {
            Self::Contact => None,
            Self::TechStack => Some(Self::Contact),
            Self::Services => Some(Self::TechStack),
            Self::Team => Some(Self::Services),
        }
    }
}

impl Default for EstimatorStep {
    fn default() -> Self {
        Self::Contact
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("already at the final step")]
    AlreadyAtFinalStep,
    #[error("quote generation requires completing all four steps")]
    NotAtFinalStep,
    #[error("a quote was already generated; revise the selection to produce a new one")]
    AlreadySubmitted,
}

/// Explicit session state for one walk through the estimator. Owns the
/// selection being built, the current step, and at most one quote.
///
/// Only leaving the contact step validates; every later step is free-form.
/// A quote is created exactly once per completed flow; `revise` discards
/// it and reopens the selection.
#[derive(Clone, Debug, Default)]
pub struct EstimatorSession {
    step: EstimatorStep,
    selection: ProjectSelection,
    quote: Option<Quote>,
}

impl EstimatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> EstimatorStep {
        self.step
    }

    pub fn selection(&self) -> &ProjectSelection {
        &self.selection
    }

    /// Mutable access to the in-progress selection. Editing after a quote
    /// exists requires `revise` first.
    pub fn selection_mut(&mut self) -> Result<&mut ProjectSelection, SessionError> {
        if self.quote.is_some() {
            return Err(SessionError::AlreadySubmitted);
        }
        Ok(&mut self.selection)
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn advance(&mut self) -> Result<EstimatorStep, SessionError> {
        if self.step == EstimatorStep::Contact {
            validate_contact(&self.selection)?;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(next)
            }
            None => Err(SessionError::AlreadyAtFinalStep),
        }
    }

    pub fn back(&mut self) -> EstimatorStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn submit(&mut self, engine: &QuoteEngine) -> Result<&Quote, SessionError> {
        if self.step != EstimatorStep::Team {
            return Err(SessionError::NotAtFinalStep);
        }
        if self.quote.is_some() {
            return Err(SessionError::AlreadySubmitted);
        }
        validate_contact(&self.selection)?;

        Ok(&*self.quote.insert(engine.compute(&self.selection)))
    }

    /// Discard the generated quote and reopen the selection for edits.
    pub fn revise(&mut self) {
        self.quote = None;
    }
}
