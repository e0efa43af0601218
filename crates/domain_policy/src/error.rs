//! Policy domain errors

use thiserror::Error;

use crate::policy::{PolicyKey, PolicyStatus};

/// Errors raised when looking up or selecting policies
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// No policy with this key exists in the source
    #[error("Policy not found: {0}")]
    NotFound(PolicyKey),

    /// The policy exists but its status does not allow the requested use
    #[error("Policy {key} is {status:?} and cannot be selected")]
    NotSelectable {
        key: PolicyKey,
        status: PolicyStatus,
    },
}

impl PolicyError {
    /// Creates a not found error
    pub fn not_found(key: &PolicyKey) -> Self {
        PolicyError::NotFound(key.clone())
    }
}
