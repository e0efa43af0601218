//! Wizard errors
//!
//! Every rejected transition is reported as a typed error. The presentation
//! layer uses them to disable controls; nothing here is fatal to a session.

use thiserror::Error;

use domain_policy::PolicyError;

use crate::draft::{SubmissionStatus, WizardStep};

/// Errors raised by the wizard state machine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// The current step is missing the selection it needs
    #[error("Cannot advance from step {}: {reason}", step.number())]
    AdvanceBlocked { step: WizardStep, reason: String },

    /// Step 4 submits instead of advancing
    #[error("The details step is terminal; submit for quotation instead")]
    TerminalStep,

    /// Back navigation is hidden for direct-entry sessions
    #[error("Back navigation is unavailable for a request opened from the dashboard")]
    RetreatUnavailable,

    /// The operation belongs to another step
    #[error("Operation requires step {}, current step is {}", expected.number(), actual.number())]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    /// The operation is not available in the current view
    #[error("Operation requires the {expected} view, current view is {actual}")]
    WrongView {
        expected: &'static str,
        actual: &'static str,
    },

    /// An endorsement action was supplied for a non-endorsement request
    #[error("Endorsement action requires request type endorsement")]
    ActionRequiresEndorsement,

    /// A direct-entry seed that cannot open the details step
    #[error("Invalid direct entry: {0}")]
    InvalidDirectEntry(String),

    /// A field value outside its allowed range
    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A review-screen action that the current status does not offer
    #[error("Action '{action}' is not available while the quotation is {status:?}")]
    ReviewActionUnavailable {
        status: SubmissionStatus,
        action: &'static str,
    },

    /// Issuance from the payment form with inputs missing
    #[error("Payment details incomplete, missing: {}", missing.join(", "))]
    PaymentIncomplete { missing: Vec<&'static str> },
}

impl WizardError {
    pub fn advance_blocked(step: WizardStep, reason: impl Into<String>) -> Self {
        WizardError::AdvanceBlocked {
            step,
            reason: reason.into(),
        }
    }

    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        WizardError::InvalidField {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_direct_entry(message: impl Into<String>) -> Self {
        WizardError::InvalidDirectEntry(message.into())
    }

    /// True for errors caused by the state of the session rather than the input
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            WizardError::AdvanceBlocked { .. }
                | WizardError::TerminalStep
                | WizardError::RetreatUnavailable
                | WizardError::WrongStep { .. }
                | WizardError::WrongView { .. }
                | WizardError::ReviewActionUnavailable { .. }
                | WizardError::PaymentIncomplete { .. }
        )
    }

    /// True for lookups of ids the session does not know
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WizardError::PropertyNotFound(_) | WizardError::Policy(PolicyError::NotFound(_))
        )
    }
}
