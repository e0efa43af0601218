//! Policy DTOs

use serde::Serialize;

use domain_policy::{EndorsementAction, Policy, PolicyStatus, RequestType, RowAction};

#[derive(Debug, Serialize)]
pub struct RowActionResponse {
    pub label: String,
    pub request_type: RequestType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<EndorsementAction>,
}

impl From<RowAction> for RowActionResponse {
    fn from(row_action: RowAction) -> Self {
        Self {
            label: row_action.label(),
            request_type: row_action.request_type,
            action: row_action.action,
        }
    }
}

/// A dashboard row
#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub id: String,
    pub reference_no: String,
    pub cr_number: String,
    pub name: String,
    pub status: PolicyStatus,
    pub status_label: &'static str,
    /// e.g. "Oct 24, 2023"
    pub updated_on: String,
    pub actions: Vec<RowActionResponse>,
}

impl From<&Policy> for PolicyResponse {
    fn from(policy: &Policy) -> Self {
        Self {
            id: policy.id.to_string(),
            reference_no: policy.reference_no.clone(),
            cr_number: policy.cr_number.clone(),
            name: policy.name.clone(),
            status: policy.status,
            status_label: policy.status.label(),
            updated_on: policy.updated_on_label(),
            actions: policy.row_actions().into_iter().map(RowActionResponse::from).collect(),
        }
    }
}
