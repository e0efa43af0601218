//! Request Wizard Domain
//!
//! The state machine behind the "New Request" wizard of the policy console:
//!
//! - **Property editor**: the repeatable list of insured properties
//! - **Request draft**: the mutable state of one request
//! - **Sequencer**: step navigation per request type
//! - **Outcome resolver**: mock quotation outcomes and the review screen
//! - **Controller**: owns the draft and dispatches every transition
//!
//! # Flow
//!
//! ```text
//! 1 Request type ──quotation──────────────────────────┐
//!      │ endorsement            │ renewal             ▼
//!      ▼                        ▼                4 Details ──submit──► loading ──► quotation
//! 2 Endorsement action ──► 3 Policy selection ──────▲
//! ```

pub mod assistant;
pub mod controller;
pub mod draft;
pub mod entry;
pub mod error;
pub mod outcome;
pub mod property;
pub mod sequencer;
pub mod settings;

pub use assistant::{AssistantPort, EMPTY_QUOTATION_PLACEHOLDER};
pub use controller::{CompletedQuotation, Completion, PendingQuotation, WizardController, WizardServices};
pub use draft::{
    DraftPatch, PaymentDetails, PaymentMethod, PaymentPatch, QuotationScreen, RequestDraft,
    SubmissionStatus, WizardStep, WizardView,
};
pub use entry::DirectEntry;
pub use error::WizardError;
pub use outcome::{
    AcceptanceRoute, Confirmation, GenerationOutcome, OutcomeResolver, ScenarioResolver,
    ScenarioRules, DECLINE_PROMPT,
};
pub use property::{
    City, ClaimsHistory, ConstructionMaterial, IndustrySegment, InterestType, Property,
    PropertyList, PropertyPatch, RiskCategory, SafetySystems,
};
pub use settings::WizardSettings;
