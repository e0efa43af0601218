//! Request Draft Model
//!
//! The aggregate, mutable state of one wizard session: where the user is,
//! what kind of request is being raised, against which policy, the property
//! list and the quotation/payment state of the review screen.
//!
//! The submission status lives inside [`WizardView::Quotation`], so the form
//! and loading views carry no status and a quotation text never exists
//! without the review screen that shows it.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use domain_policy::{EndorsementAction, EndorsementReason, Policy, RequestType};

use crate::error::WizardError;
use crate::property::PropertyList;

/// The four wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    RequestType = 1,
    EndorsementAction = 2,
    PolicySelection = 3,
    Details = 4,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::RequestType;

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::RequestType),
            2 => Some(WizardStep::EndorsementAction),
            3 => Some(WizardStep::PolicySelection),
            4 => Some(WizardStep::Details),
            _ => None,
        }
    }

    /// Heading shown above the step body
    pub fn heading(&self) -> &'static str {
        match self {
            WizardStep::RequestType => "Select Request Type",
            WizardStep::EndorsementAction => "Select Endorsement Action",
            WizardStep::PolicySelection => "Select Policy",
            WizardStep::Details => "Request Details",
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        WizardStep::from_number(number).ok_or_else(|| format!("no wizard step {}", number))
    }
}

/// Outcome shown on the quotation review screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Quotation shown with its action controls
    #[default]
    #[serde(rename = "none")]
    Ready,
    Error,
    Delayed,
    ExpiredAfterAcceptance,
    UnderReview,
    AwaitingPaymentDetails,
    #[serde(rename = "success")]
    Issued,
    Declined,
}

impl SubmissionStatus {
    /// Whether the issue / discuss / decline controls are offered
    pub fn offers_review_actions(&self) -> bool {
        matches!(self, SubmissionStatus::Ready | SubmissionStatus::UnderReview)
    }

    /// Headline of the screen rendered for this status
    pub fn headline(&self) -> &'static str {
        match self {
            SubmissionStatus::Ready => "Quotation Ready",
            SubmissionStatus::Error => "Quotation Generation Failed",
            SubmissionStatus::Delayed => "Quotation Delayed",
            SubmissionStatus::ExpiredAfterAcceptance => "Quotation Expired",
            SubmissionStatus::UnderReview => "Under Review",
            SubmissionStatus::AwaitingPaymentDetails => "Payment Details Required",
            SubmissionStatus::Issued => "Endorsement Issued",
            SubmissionStatus::Declined => "Quotation Declined",
        }
    }
}

/// The review screen: generated text plus its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationScreen {
    pub details: String,
    pub status: SubmissionStatus,
}

/// What the wizard body currently renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WizardView {
    Form,
    /// A generation is in flight; results for other tickets are ignored
    Loading { ticket: u64 },
    Quotation(QuotationScreen),
}

impl WizardView {
    pub fn name(&self) -> &'static str {
        match self {
            WizardView::Form => "form",
            WizardView::Loading { .. } => "loading",
            WizardView::Quotation(_) => "quotation",
        }
    }
}

impl fmt::Display for WizardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Online,
    Broker,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "Online Payment",
            PaymentMethod::Broker => "Pay through Broker",
        }
    }
}

/// Inputs of the payment form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub contact_name: String,
    pub contact_id: String,
    pub mobile: String,
    pub iban: String,
    pub method: Option<PaymentMethod>,
}

impl PaymentDetails {
    /// Names of the inputs still blank (after trimming) or unset
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("contact_name", &self.contact_name),
            ("contact_id", &self.contact_id),
            ("mobile", &self.mobile),
            ("iban", &self.iban),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if self.method.is_none() {
            missing.push("payment_method");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn apply(&mut self, patch: PaymentPatch) {
        if let Some(contact_name) = patch.contact_name {
            self.contact_name = contact_name;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = contact_id;
        }
        if let Some(mobile) = patch.mobile {
            self.mobile = mobile;
        }
        if let Some(iban) = patch.iban {
            self.iban = iban;
        }
        if patch.method.is_some() {
            self.method = patch.method;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentPatch {
    pub contact_name: Option<String>,
    pub contact_id: Option<String>,
    pub mobile: Option<String>,
    pub iban: Option<String>,
    pub method: Option<PaymentMethod>,
}

/// Shallow update of draft-level fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub request_type: Option<RequestType>,
    pub endorsement_action: Option<EndorsementAction>,
    pub effective_date: Option<NaiveDate>,
    pub reason: Option<EndorsementReason>,
    pub details: Option<String>,
}

/// State of one request being raised through the wizard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDraft {
    pub(crate) step: WizardStep,
    pub(crate) view: WizardView,
    pub(crate) request_type: Option<RequestType>,
    pub(crate) endorsement_action: Option<EndorsementAction>,
    pub(crate) policy_reference: Option<String>,
    pub(crate) selected_policy: Option<Policy>,
    pub(crate) effective_date: NaiveDate,
    pub(crate) reason: EndorsementReason,
    pub(crate) details: String,
    pub(crate) properties: PropertyList,
    pub(crate) payment: PaymentDetails,
}

impl RequestDraft {
    /// A fresh draft at step 1 with the form view and one default property
    pub fn new() -> Self {
        Self {
            step: WizardStep::FIRST,
            view: WizardView::Form,
            request_type: None,
            endorsement_action: None,
            policy_reference: None,
            selected_policy: None,
            effective_date: Utc::now().date_naive(),
            reason: EndorsementReason::default(),
            details: String::new(),
            properties: PropertyList::new(),
            payment: PaymentDetails::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn view(&self) -> &WizardView {
        &self.view
    }

    pub fn request_type(&self) -> Option<RequestType> {
        self.request_type
    }

    pub fn endorsement_action(&self) -> Option<EndorsementAction> {
        self.endorsement_action
    }

    pub fn policy_reference(&self) -> Option<&str> {
        self.policy_reference.as_deref()
    }

    pub fn selected_policy(&self) -> Option<&Policy> {
        self.selected_policy.as_ref()
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    pub fn reason(&self) -> EndorsementReason {
        self.reason
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn properties(&self) -> &PropertyList {
        &self.properties
    }

    pub fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    /// Status of the review screen; `Ready` whenever it is not shown
    pub fn submission_status(&self) -> SubmissionStatus {
        match &self.view {
            WizardView::Quotation(screen) => screen.status,
            WizardView::Form | WizardView::Loading { .. } => SubmissionStatus::Ready,
        }
    }

    /// Generated quotation text, present only on the review screen
    pub fn quotation_details(&self) -> Option<&str> {
        match &self.view {
            WizardView::Quotation(screen) => Some(screen.details.as_str()),
            WizardView::Form | WizardView::Loading { .. } => None,
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self.view, WizardView::Form)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, WizardView::Loading { .. })
    }

    /// Merges draft-level fields
    ///
    /// Changing the request type away from endorsement clears the action;
    /// changing it to quotation clears the selected policy.
    ///
    /// # Errors
    ///
    /// `ActionRequiresEndorsement` when the patch sets an action while the
    /// resulting request type is not endorsement. The draft is unchanged.
    pub fn apply(&mut self, patch: DraftPatch) -> Result<(), WizardError> {
        let request_type = patch.request_type.or(self.request_type);
        if patch.endorsement_action.is_some() && request_type != Some(RequestType::Endorsement) {
            return Err(WizardError::ActionRequiresEndorsement);
        }

        if let Some(new_type) = patch.request_type {
            if new_type != RequestType::Endorsement {
                self.endorsement_action = None;
            }
            if !new_type.requires_policy() {
                self.clear_policy();
            }
            self.request_type = Some(new_type);
        }
        if patch.endorsement_action.is_some() {
            self.endorsement_action = patch.endorsement_action;
        }
        if let Some(effective_date) = patch.effective_date {
            self.effective_date = effective_date;
        }
        if let Some(reason) = patch.reason {
            self.reason = reason;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
        Ok(())
    }

    pub(crate) fn assign_policy(&mut self, policy: Policy) {
        self.policy_reference = Some(policy.reference_no.clone());
        self.selected_policy = Some(policy);
    }

    fn clear_policy(&mut self) {
        self.policy_reference = None;
        self.selected_policy = None;
    }

    pub(crate) fn show_form(&mut self) {
        self.view = WizardView::Form;
    }

    pub(crate) fn show_quotation(&mut self, details: String, status: SubmissionStatus) {
        self.view = WizardView::Quotation(QuotationScreen { details, status });
    }

    /// Replaces the status of the review screen; no-op outside it
    pub(crate) fn set_status(&mut self, status: SubmissionStatus) {
        if let WizardView::Quotation(screen) = &mut self.view {
            screen.status = status;
        }
    }

    pub(crate) fn properties_mut(&mut self) -> &mut PropertyList {
        &mut self.properties
    }

    pub(crate) fn payment_mut(&mut self) -> &mut PaymentDetails {
        &mut self.payment
    }
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self::new()
    }
}
