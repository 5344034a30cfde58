//! Assistant Proxy - bridge between the estimator and a hosted LLM
//!
//! This crate provides the client half of the assistant: the wire types and
//! HTTP client for the chat proxy, prompt construction, and the local
//! decision logic around when and how the hosted model is consulted:
//!
//! - **Wire client** (`client`) - request/reply contract plus a `reqwest`
//!   implementation with a static bearer credential
//! - **Reply parsing** (`reply`) - tagged prose-vs-structured-config result
//!   produced by a dedicated parser, never by the renderer
//! - **Readiness gate** (`readiness`) - cheap keyword heuristic deciding
//!   whether a description has enough substance for structured extraction
//! - **Operations** (`proxy`) - draft a narrative from selections, or parse
//!   a description back into a selection patch
//! - **Session limits** (`session`) - one in-flight request and a small
//!   per-action usage budget, held as explicit state
//!
//! # Safety Principle
//!
//! The hosted model is strictly a translator. It NEVER prices anything;
//! every number a quote shows comes from the deterministic engine in
//! `ratecard-core`.

pub mod client;
pub mod prompts;
pub mod proxy;
pub mod readiness;
pub mod reply;
pub mod session;

pub use client::{AssistantClient, ChatReply, ChatRequest, HttpAssistantClient, UpstreamError};
pub use proxy::{AssistantProxy, AutofillOutcome, PageContext};
pub use readiness::{assess, InfoCategory, ReadinessReport};
pub use reply::{parse_reply, AssistantReply};
pub use session::{AssistantAction, ChatSession, ChatSessionError};
