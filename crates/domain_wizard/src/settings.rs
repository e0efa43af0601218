//! Wizard tuning knobs

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::outcome::ScenarioRules;

/// Default minimum time the loading view stays up
pub const DEFAULT_MIN_LOADING_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    /// Minimum duration of a quotation submission, in milliseconds
    pub min_loading_ms: u64,
    pub scenarios: ScenarioRules,
}

impl WizardSettings {
    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            min_loading_ms: DEFAULT_MIN_LOADING_MS,
            scenarios: ScenarioRules::default(),
        }
    }
}
