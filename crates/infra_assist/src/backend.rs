//! Text backends
//!
//! A backend turns a [`TextTask`] into text and may fail. The console ships
//! with a local simulated generator; [`UnconfiguredBackend`] stands in when no
//! generator is set up, so every call takes the fallback path.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use core_kernel::PortError;

use crate::figures::{QuotationFigures, STANDARD_RISK_NOTE};
use crate::prompts::TextTask;

/// Fallible text generator behind the assistant
#[async_trait]
pub trait TextBackend: Send + Sync + 'static {
    /// Name used in logs and errors
    fn name(&self) -> &'static str;

    async fn complete(&self, task: &TextTask) -> Result<String, PortError>;
}

/// Local generator with a simulated network delay
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn remark(reason: &str, policy_reference: &str) -> String {
        format!(
            "Endorsement requested on policy {} due to {}. The schedule of insured properties \
             and the corresponding sums insured are amended accordingly, with all other terms, \
             conditions and exclusions remaining unchanged.",
            policy_reference,
            reason.to_lowercase()
        )
    }
}

#[async_trait]
impl TextBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn complete(&self, task: &TextTask) -> Result<String, PortError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        debug!(operation = task.operation(), "Simulated backend answered");

        match task {
            TextTask::EndorsementRemark {
                reason,
                policy_reference,
            } => Ok(Self::remark(reason, policy_reference)),
            TextTask::QuotationSummary { property_count, .. } => {
                let figures = QuotationFigures::for_properties(*property_count)
                    .map_err(|e| PortError::connection(format!("simulated pricing failed: {}", e)))?;
                Ok(figures.render(STANDARD_RISK_NOTE))
            }
        }
    }
}

/// Backend used when no text generator is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredBackend;

#[async_trait]
impl TextBackend for UnconfiguredBackend {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn complete(&self, _task: &TextTask) -> Result<String, PortError> {
        Err(PortError::not_configured("text generation"))
    }
}
