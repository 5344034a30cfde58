pub mod catalog;
pub mod config;
pub mod engine;
pub mod render;
pub mod selection;
pub mod session;
pub mod validation;

pub use catalog::{ComplexityTier, LabelTable, RateCard, SelectionCategory};
pub use engine::{BreakdownStep, Quote, QuoteEngine};
pub use render::{render_markdown, PaymentSchedule};
pub use selection::{DeliveryTeam, ProjectSelection, SelectionPatch};
pub use session::{EstimatorSession, EstimatorStep, SessionError};
pub use validation::{validate_contact, FieldError, ValidationError};
