//! Wizard DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_policy::{EndorsementAction, EndorsementReason, RequestType};
use domain_wizard::{
    DraftPatch, PaymentDetails, PaymentMethod, PaymentPatch, Property, SubmissionStatus,
    WizardController, WizardView,
};

use crate::dto::policy::PolicyResponse;

/// Opens a session; a `policy_id` makes it a direct entry
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct StartWizardRequest {
    #[validate(length(min = 1, max = 32))]
    pub policy_id: Option<String>,
    pub request_type: Option<RequestType>,
    pub action: Option<EndorsementAction>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateDraftRequest {
    pub request_type: Option<RequestType>,
    pub endorsement_action: Option<EndorsementAction>,
    pub effective_date: Option<NaiveDate>,
    pub reason: Option<EndorsementReason>,
    #[validate(length(max = 2000))]
    pub details: Option<String>,
}

impl From<UpdateDraftRequest> for DraftPatch {
    fn from(request: UpdateDraftRequest) -> Self {
        DraftPatch {
            request_type: request.request_type,
            endorsement_action: request.endorsement_action,
            effective_date: request.effective_date,
            reason: request.reason,
            details: request.details,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SelectPolicyRequest {
    #[validate(length(min = 1, max = 32))]
    pub policy_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeclineRequest {
    /// Answer to "Decline this quotation?"
    pub confirmed: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdatePaymentRequest {
    #[validate(length(max = 120))]
    pub contact_name: Option<String>,
    #[validate(length(max = 20))]
    pub contact_id: Option<String>,
    #[validate(length(max = 20))]
    pub mobile: Option<String>,
    #[validate(length(max = 34))]
    pub iban: Option<String>,
    pub method: Option<PaymentMethod>,
}

impl From<UpdatePaymentRequest> for PaymentPatch {
    fn from(request: UpdatePaymentRequest) -> Self {
        PaymentPatch {
            contact_name: request.contact_name,
            contact_id: request.contact_id,
            mobile: request.mobile,
            iban: request.iban,
            method: request.method,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    /// Display id ("PRP-...") accepted by the property routes
    pub id: String,
    pub position: usize,
    pub heading: String,
    pub active: bool,
    pub reported_claim_amount: Option<rust_decimal::Decimal>,
    pub details: Property,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub status: SubmissionStatus,
    pub headline: &'static str,
    pub offers_review_actions: bool,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    #[serde(flatten)]
    pub details: PaymentDetails,
    pub missing: Vec<&'static str>,
}

/// Everything the wizard page renders
#[derive(Debug, Serialize)]
pub struct WizardResponse {
    pub session_id: String,
    pub title: String,
    pub subtitle: String,
    pub step: u8,
    pub step_heading: &'static str,
    pub can_retreat: bool,
    pub view: WizardView,
    pub review: Option<ReviewResponse>,
    pub request_type: Option<RequestType>,
    pub endorsement_action: Option<EndorsementAction>,
    pub policy_reference: Option<String>,
    pub selected_policy: Option<PolicyResponse>,
    pub effective_date: NaiveDate,
    pub reason: EndorsementReason,
    pub reason_label: &'static str,
    pub details: String,
    pub properties: Vec<PropertyResponse>,
    pub payment: Option<PaymentResponse>,
}

impl From<&WizardController> for WizardResponse {
    fn from(controller: &WizardController) -> Self {
        let draft = controller.draft();
        let properties = draft.properties();
        let active_id = properties.active_id();

        let review = match draft.view() {
            WizardView::Quotation(screen) => Some(ReviewResponse {
                status: screen.status,
                headline: screen.status.headline(),
                offers_review_actions: screen.status.offers_review_actions(),
            }),
            WizardView::Form | WizardView::Loading { .. } => None,
        };

        let payment = (draft.submission_status() == SubmissionStatus::AwaitingPaymentDetails).then(|| {
            PaymentResponse {
                details: draft.payment().clone(),
                missing: draft.payment().missing_fields(),
            }
        });

        Self {
            session_id: controller.session_id().to_string(),
            title: controller.title(),
            subtitle: controller.subtitle(),
            step: draft.step().number(),
            step_heading: draft.step().heading(),
            can_retreat: controller.can_retreat(),
            view: draft.view().clone(),
            review,
            request_type: draft.request_type(),
            endorsement_action: draft.endorsement_action(),
            policy_reference: draft.policy_reference().map(str::to_string),
            selected_policy: draft.selected_policy().map(PolicyResponse::from),
            effective_date: draft.effective_date(),
            reason: draft.reason(),
            reason_label: draft.reason().label(),
            details: draft.details().to_string(),
            properties: properties
                .iter()
                .enumerate()
                .map(|(index, property)| PropertyResponse {
                    id: property.id().to_string(),
                    position: index + 1,
                    heading: property.heading(index + 1),
                    active: property.id() == active_id,
                    reported_claim_amount: property.reported_claim_amount(),
                    details: property.clone(),
                })
                .collect(),
            payment,
        }
    }
}
