//! Endorsement reasons
//!
//! The reason code recorded on a request draft. It also seeds the remark
//! suggested by the assistant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an endorsement (or other request) is being raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndorsementReason {
    #[default]
    CoverageLimitUpdate,
    NewBeneficiaryAdded,
    AddressChange,
    PremiumAdjustment,
    Other,
}

impl EndorsementReason {
    /// All reasons in the order the reason picker lists them
    pub const ALL: [EndorsementReason; 5] = [
        EndorsementReason::CoverageLimitUpdate,
        EndorsementReason::NewBeneficiaryAdded,
        EndorsementReason::AddressChange,
        EndorsementReason::PremiumAdjustment,
        EndorsementReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EndorsementReason::CoverageLimitUpdate => "Coverage Limit Update",
            EndorsementReason::NewBeneficiaryAdded => "New Beneficiary Added",
            EndorsementReason::AddressChange => "Address Change",
            EndorsementReason::PremiumAdjustment => "Premium Adjustment",
            EndorsementReason::Other => "Other",
        }
    }
}

impl fmt::Display for EndorsementReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reason() {
        assert_eq!(EndorsementReason::default().label(), "Coverage Limit Update");
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<&str> = EndorsementReason::ALL.iter().map(|r| r.label()).collect();
        labels.dedup();
        assert_eq!(labels.len(), EndorsementReason::ALL.len());
    }
}
