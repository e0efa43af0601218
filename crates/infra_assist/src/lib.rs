//! Text-generation adapters for the request wizard
//!
//! - `backend`: fallible `TextBackend`s (local simulated generator, unconfigured)
//! - `assistant`: the fail-open `Assistant` implementing `AssistantPort`
//! - `prompts`: the tasks and prompt texts sent to a backend
//! - `figures`: indicative quotation figures and their rendering
//! - `config`: timeouts and backend selection

pub mod assistant;
pub mod backend;
pub mod config;
pub mod figures;
pub mod prompts;

pub use assistant::{fallback_remark, fallback_summary, Assistant, EMPTY_SUGGESTION_PLACEHOLDER};
pub use backend::{SimulatedBackend, TextBackend, UnconfiguredBackend};
pub use config::{AssistantSettings, BackendKind};
pub use figures::QuotationFigures;
pub use prompts::TextTask;
