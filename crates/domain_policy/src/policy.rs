//! The policy record as the console sees it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::request::{EndorsementAction, RequestType};

/// Opaque key identifying a policy in the source system
///
/// The source hands out plain string keys ("1", "2", ...); the console only
/// compares them, never parses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyKey(String);

impl PolicyKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolicyKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Dashboard status of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    Active,
    Renewal,
    Pending,
    Expired,
}

impl PolicyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Renewal => "Renewal",
            PolicyStatus::Pending => "Pending",
            PolicyStatus::Expired => "Expired",
        }
    }
}

/// A request the dashboard can start directly from a policy row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAction {
    pub request_type: RequestType,
    pub action: Option<EndorsementAction>,
}

impl RowAction {
    /// Menu label, e.g. "Add Endorsement" or "Renew Policy"
    pub fn label(&self) -> String {
        match (self.request_type, self.action) {
            (RequestType::Renewal, _) => "Renew Policy".to_string(),
            (request_type, Some(action)) => format!("{} {}", action, request_type),
            (request_type, None) => format!("New {}", request_type),
        }
    }
}

/// A policy record (read-only within the console)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Source-system key
    pub id: PolicyKey,
    /// Human-readable policy reference, e.g. `POL-88291-XA`
    pub reference_no: String,
    /// Commercial registration number of the policyholder
    pub cr_number: String,
    /// Policyholder display name
    pub name: String,
    pub status: PolicyStatus,
    /// Date of the last change in the source system
    pub updated_on: NaiveDate,
}

impl Policy {
    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }

    /// Last-updated date in dashboard format ("Oct 24, 2023")
    pub fn updated_on_label(&self) -> String {
        self.updated_on.format("%b %d, %Y").to_string()
    }

    /// Requests that can be started straight from this policy's dashboard row
    pub fn row_actions(&self) -> Vec<RowAction> {
        match self.status {
            PolicyStatus::Active => EndorsementAction::ALL
                .iter()
                .map(|action| RowAction {
                    request_type: RequestType::Endorsement,
                    action: Some(*action),
                })
                .collect(),
            PolicyStatus::Expired => vec![RowAction {
                request_type: RequestType::Renewal,
                action: None,
            }],
            PolicyStatus::Renewal | PolicyStatus::Pending => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(status: PolicyStatus) -> Policy {
        Policy {
            id: PolicyKey::from("1"),
            reference_no: "POL-88291-XA".to_string(),
            cr_number: "CR-99210-9".to_string(),
            name: "Al Rajhi Trading Co.".to_string(),
            status,
            updated_on: NaiveDate::from_ymd_opt(2023, 10, 24).unwrap(),
        }
    }

    #[test]
    fn test_updated_on_label() {
        assert_eq!(policy(PolicyStatus::Active).updated_on_label(), "Oct 24, 2023");
    }

    #[test]
    fn test_active_policy_offers_three_endorsements() {
        let labels: Vec<String> = policy(PolicyStatus::Active)
            .row_actions()
            .iter()
            .map(RowAction::label)
            .collect();
        assert_eq!(labels, vec!["Add Endorsement", "Update Endorsement", "Cancel Endorsement"]);
    }

    #[test]
    fn test_expired_policy_offers_renewal_only() {
        let actions = policy(PolicyStatus::Expired).row_actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].request_type, RequestType::Renewal);
        assert_eq!(actions[0].label(), "Renew Policy");
    }

    #[test]
    fn test_pending_and_renewal_offer_nothing() {
        assert!(policy(PolicyStatus::Pending).row_actions().is_empty());
        assert!(policy(PolicyStatus::Renewal).row_actions().is_empty());
    }
}
