//! Text-generation port
//!
//! Both operations are infallible to the caller: adapters recover from
//! backend failures themselves and always return displayable text.

use async_trait::async_trait;

use core_kernel::ports::DomainPort;

use crate::draft::RequestDraft;

/// Shown when the generator hands back nothing at all
pub const EMPTY_QUOTATION_PLACEHOLDER: &str = "Quotation generation failed.";

#[async_trait]
pub trait AssistantPort: DomainPort {
    /// A short professional remark for an endorsement with the given reason
    async fn suggest_endorsement_text(&self, reason: &str, policy_reference: &str) -> String;

    /// A financial summary and risk note for the draft
    async fn generate_quotation_summary(&self, draft: &RequestDraft) -> String;
}
