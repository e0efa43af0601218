//! Request kinds raised against a policy

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of request a wizard session produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// A fresh price quote for a new prospect; no existing policy involved
    Quotation,
    /// Extends an expiring or recently expired policy for another term
    Renewal,
    /// Modifies coverage, assets or details on an active policy
    Endorsement,
}

impl RequestType {
    /// All request types in the order the selection step offers them
    pub const ALL: [RequestType; 3] = [
        RequestType::Quotation,
        RequestType::Renewal,
        RequestType::Endorsement,
    ];

    /// Display label used in titles ("Endorsement", "Renewal")
    pub fn label(&self) -> &'static str {
        match self {
            RequestType::Quotation => "Quotation",
            RequestType::Renewal => "Renewal",
            RequestType::Endorsement => "Endorsement",
        }
    }

    /// Whether the request targets an existing policy
    pub fn requires_policy(&self) -> bool {
        !matches!(self, RequestType::Quotation)
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What an endorsement does to the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndorsementAction {
    Add,
    Update,
    Cancel,
}

impl EndorsementAction {
    pub const ALL: [EndorsementAction; 3] = [
        EndorsementAction::Add,
        EndorsementAction::Update,
        EndorsementAction::Cancel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EndorsementAction::Add => "Add",
            EndorsementAction::Update => "Update",
            EndorsementAction::Cancel => "Cancel",
        }
    }

    /// Cancellation is rendered as a destructive choice
    pub fn is_destructive(&self) -> bool {
        matches!(self, EndorsementAction::Cancel)
    }
}

impl fmt::Display for EndorsementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
