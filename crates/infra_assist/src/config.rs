//! Assistant configuration

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use domain_wizard::AssistantPort;

use crate::assistant::Assistant;
use crate::backend::{SimulatedBackend, UnconfiguredBackend};

/// Which backend serves the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Simulated,
    /// No generator; every call returns fallback text
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub backend: BackendKind,
    pub suggestion_timeout_ms: u64,
    pub quotation_timeout_ms: u64,
    /// Latency of the simulated backend
    pub simulated_delay_ms: u64,
}

impl AssistantSettings {
    pub fn suggestion_timeout(&self) -> Duration {
        Duration::from_millis(self.suggestion_timeout_ms)
    }

    pub fn quotation_timeout(&self) -> Duration {
        Duration::from_millis(self.quotation_timeout_ms)
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    /// Builds the assistant these settings describe
    pub fn build(&self) -> Arc<dyn AssistantPort> {
        match self.backend {
            BackendKind::Simulated => Arc::new(Assistant::new(
                SimulatedBackend::new(self.simulated_delay()),
                self,
            )),
            BackendKind::Disabled => Arc::new(Assistant::new(UnconfiguredBackend, self)),
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Simulated,
            suggestion_timeout_ms: 15_000,
            quotation_timeout_ms: 30_000,
            simulated_delay_ms: 1_200,
        }
    }
}
