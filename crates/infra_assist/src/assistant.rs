//! Fail-open assistant
//!
//! Wraps a [`TextBackend`] and implements the wizard's `AssistantPort`.
//! Backend errors, timeouts and missing configuration are logged and
//! answered with deterministic fallback text; an empty answer is replaced
//! by a short notice. Callers always receive displayable text.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use core_kernel::ports::DomainPort;
use core_kernel::PortError;
use domain_wizard::{AssistantPort, RequestDraft, EMPTY_QUOTATION_PLACEHOLDER};

use crate::backend::TextBackend;
use crate::config::AssistantSettings;
use crate::figures::{QuotationFigures, STANDARD_RISK_NOTE};
use crate::prompts::TextTask;

/// Shown when the backend answers a remark request with nothing
pub const EMPTY_SUGGESTION_PLACEHOLDER: &str = "No suggestions available.";

/// Policy reference used in prompts for quotations, which target no policy
pub const NEW_QUOTATION_REFERENCE: &str = "New Quotation";

/// Remark returned when the backend cannot be used
pub fn fallback_remark(reason: &str, policy_reference: &str) -> String {
    format!(
        "Professional endorsement modification for policy {} based on {}. This update ensures \
         continued coverage alignment with current risk assessment parameters.",
        policy_reference, reason
    )
}

/// Quotation summary returned when the backend cannot be used
pub fn fallback_summary() -> String {
    QuotationFigures::standard().render(STANDARD_RISK_NOTE)
}

pub struct Assistant<B> {
    backend: B,
    suggestion_timeout: Duration,
    quotation_timeout: Duration,
}

impl<B: TextBackend> Assistant<B> {
    pub fn new(backend: B, settings: &AssistantSettings) -> Self {
        Self {
            backend,
            suggestion_timeout: settings.suggestion_timeout(),
            quotation_timeout: settings.quotation_timeout(),
        }
    }

    async fn ask(&self, task: &TextTask, limit: Duration) -> Result<String, PortError> {
        match tokio::time::timeout(limit, self.backend.complete(task)).await {
            Ok(result) => result,
            Err(_) => Err(PortError::timeout(task.operation(), limit.as_millis() as u64)),
        }
    }

    /// Resolves a backend answer into displayable text
    fn settle(
        &self,
        task: &TextTask,
        answer: Result<String, PortError>,
        empty: &str,
        fallback: impl FnOnce() -> String,
    ) -> String {
        match answer {
            Ok(text) if text.trim().is_empty() => {
                debug!(backend = self.backend.name(), operation = task.operation(), "Empty answer");
                empty.to_string()
            }
            Ok(text) => text.trim().to_string(),
            Err(error) => {
                warn!(
                    backend = self.backend.name(),
                    operation = task.operation(),
                    error = %error,
                    transient = error.is_transient(),
                    "Text generation failed, using fallback text"
                );
                fallback()
            }
        }
    }
}

impl<B: TextBackend> DomainPort for Assistant<B> {}

#[async_trait]
impl<B: TextBackend> AssistantPort for Assistant<B> {
    async fn suggest_endorsement_text(&self, reason: &str, policy_reference: &str) -> String {
        let task = TextTask::EndorsementRemark {
            reason: reason.to_string(),
            policy_reference: policy_reference.to_string(),
        };
        let answer = self.ask(&task, self.suggestion_timeout).await;
        self.settle(&task, answer, EMPTY_SUGGESTION_PLACEHOLDER, || {
            fallback_remark(reason, policy_reference)
        })
    }

    async fn generate_quotation_summary(&self, draft: &RequestDraft) -> String {
        let task = TextTask::QuotationSummary {
            policy_reference: draft
                .policy_reference()
                .unwrap_or(NEW_QUOTATION_REFERENCE)
                .to_string(),
            property_count: draft.properties().len(),
        };
        let answer = self.ask(&task, self.quotation_timeout).await;
        self.settle(&task, answer, EMPTY_QUOTATION_PLACEHOLDER, fallback_summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_remark() {
        assert_eq!(
            fallback_remark("Address Change", "POL-88291-XA"),
            "Professional endorsement modification for policy POL-88291-XA based on Address Change. \
             This update ensures continued coverage alignment with current risk assessment parameters."
        );
    }

    #[test]
    fn test_fallback_summary_totals() {
        let text = fallback_summary();
        assert!(text.contains("- VAT (15%): 8,100 SAR"));
        assert!(text.contains("- Total Adjusted Premium: 62,100 SAR"));
    }
}
