//! Direct entry from the dashboard
//!
//! A policy row can open the wizard straight on the details step with the
//! request type, action and policy already chosen.

use serde::{Deserialize, Serialize};

use domain_policy::{EndorsementAction, Policy, RequestType, RowAction};

use crate::error::WizardError;

/// Seed for a wizard session opened from a policy row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectEntry {
    policy: Policy,
    request_type: RequestType,
    action: Option<EndorsementAction>,
}

impl DirectEntry {
    /// Validates a seed
    ///
    /// # Errors
    ///
    /// `InvalidDirectEntry` for a quotation (it targets no policy), an
    /// endorsement without an action, or a request the policy's row does not
    /// offer (endorsements need an active policy, renewals an expired one).
    /// `ActionRequiresEndorsement` for an action on a renewal.
    pub fn new(
        policy: Policy,
        request_type: RequestType,
        action: Option<EndorsementAction>,
    ) -> Result<Self, WizardError> {
        match (request_type, action) {
            (RequestType::Quotation, _) => Err(WizardError::invalid_direct_entry(
                "a quotation is not raised against an existing policy",
            )),
            (RequestType::Endorsement, None) => Err(WizardError::invalid_direct_entry(
                "an endorsement needs an action",
            )),
            (RequestType::Renewal, Some(_)) => Err(WizardError::ActionRequiresEndorsement),
            _ => Self::from_row_action(
                policy,
                RowAction {
                    request_type,
                    action,
                },
            ),
        }
    }

    /// Seed for one of the actions a policy row offers
    ///
    /// # Errors
    ///
    /// `InvalidDirectEntry` when `row_action` is not among the policy's row
    /// actions.
    pub fn from_row_action(policy: Policy, row_action: RowAction) -> Result<Self, WizardError> {
        if !policy.row_actions().contains(&row_action) {
            return Err(WizardError::invalid_direct_entry(format!(
                "{} is not offered for {} policy {}",
                row_action.label(),
                policy.status.label(),
                policy.reference_no
            )));
        }
        Ok(Self {
            policy,
            request_type: row_action.request_type,
            action: row_action.action,
        })
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn action(&self) -> Option<EndorsementAction> {
        self.action
    }

    /// "Add Endorsement", "Cancel Endorsement", "Policy Renewal"
    pub fn title(&self) -> String {
        match self.action {
            Some(action) => format!("{} {}", action, self.request_type),
            None => format!("Policy {}", self.request_type),
        }
    }

    pub fn subtitle(&self) -> String {
        format!("Providing details for {}", self.policy.reference_no)
    }

    pub(crate) fn into_parts(self) -> (Policy, RequestType, Option<EndorsementAction>) {
        (self.policy, self.request_type, self.action)
    }
}

/// Title of a wizard session started from "New Request"
pub const NEW_REQUEST_TITLE: &str = "New Request";

/// Subtitle of a "New Request" session for the chosen type
pub fn new_request_subtitle(request_type: Option<RequestType>) -> &'static str {
    match request_type {
        Some(RequestType::Endorsement) => "Modifying an existing policy",
        Some(RequestType::Renewal) => "Renewing an existing policy",
        Some(RequestType::Quotation) | None => "Starting a new quotation",
    }
}
