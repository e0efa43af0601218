//! Wizard Controller
//!
//! Owns the draft of one wizard session and dispatches every transition:
//! step navigation, draft and property edits, quotation submission and the
//! review-screen actions.
//!
//! Submission is split in three so that the session can keep serving events
//! while the generator runs:
//!
//! 1. [`WizardController::begin_submission`] switches to the loading view and
//!    hands out an owned [`PendingQuotation`] carrying a ticket
//! 2. [`PendingQuotation::run`] joins the generator call with the minimum
//!    loading delay, borrowing nothing from the controller
//! 3. [`WizardController::complete_submission`] shows the result, unless the
//!    loading view was cancelled or superseded in the meantime
//!
//! [`WizardController::submit_for_quotation`] chains the three for callers
//! that own the controller exclusively.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use core_kernel::{PropertyId, SessionId};
use domain_policy::{Policy, PolicyKey, PolicySource};

use crate::assistant::{AssistantPort, EMPTY_QUOTATION_PLACEHOLDER};
use crate::draft::{
    DraftPatch, PaymentPatch, RequestDraft, SubmissionStatus, WizardStep, WizardView,
};
use crate::entry::{new_request_subtitle, DirectEntry, NEW_REQUEST_TITLE};
use crate::error::WizardError;
use crate::outcome::{self, Confirmation, OutcomeResolver, ScenarioResolver};
use crate::property::PropertyPatch;
use crate::sequencer;
use crate::settings::WizardSettings;

/// Collaborators injected into every session
#[derive(Clone)]
pub struct WizardServices {
    pub policies: Arc<dyn PolicySource>,
    pub assistant: Arc<dyn AssistantPort>,
    pub resolver: Arc<dyn OutcomeResolver>,
    pub min_loading: Duration,
}

impl WizardServices {
    /// Wires the scenario resolver and minimum delay from settings
    pub fn new(
        policies: Arc<dyn PolicySource>,
        assistant: Arc<dyn AssistantPort>,
        settings: &WizardSettings,
    ) -> Self {
        Self {
            policies,
            assistant,
            resolver: Arc::new(ScenarioResolver::new(settings.scenarios.clone())),
            min_loading: settings.min_loading(),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn OutcomeResolver>) -> Self {
        self.resolver = resolver;
        self
    }
}

/// A quotation generation detached from the controller
pub struct PendingQuotation {
    session_id: SessionId,
    ticket: u64,
    draft: RequestDraft,
    assistant: Arc<dyn AssistantPort>,
    min_loading: Duration,
}

impl PendingQuotation {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Runs the generator and the minimum delay concurrently
    ///
    /// Completes when both have finished; the generator is never raced
    /// against the timer.
    pub async fn run(self) -> CompletedQuotation {
        let (details, ()) = tokio::join!(
            self.assistant.generate_quotation_summary(&self.draft),
            tokio::time::sleep(self.min_loading),
        );
        CompletedQuotation {
            session_id: self.session_id,
            ticket: self.ticket,
            details,
        }
    }
}

/// Generator output waiting to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedQuotation {
    pub session_id: SessionId,
    pub ticket: u64,
    pub details: String,
}

/// What happened to a completed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The review screen now shows the quotation with this status
    Applied(SubmissionStatus),
    /// The loading view was cancelled or superseded; the result was dropped
    Discarded,
}

/// State machine of one wizard session
pub struct WizardController {
    session_id: SessionId,
    draft: RequestDraft,
    entry: Option<DirectEntry>,
    services: WizardServices,
    next_ticket: u64,
}

impl WizardController {
    /// Starts a session
    ///
    /// Without a seed the draft starts on step 1. With a direct-entry seed the
    /// draft opens on the details step with request type, action and policy
    /// filled in, and back navigation is disabled.
    pub fn initialize(services: WizardServices, entry: Option<DirectEntry>) -> Self {
        let session_id = SessionId::new();
        let mut draft = RequestDraft::new();

        if let Some(seed) = entry.clone() {
            let (policy, request_type, action) = seed.into_parts();
            draft.request_type = Some(request_type);
            draft.endorsement_action = action;
            draft.assign_policy(policy);
            draft.step = WizardStep::Details;
        }

        info!(
            session_id = %session_id,
            direct_entry = entry.is_some(),
            policy_reference = draft.policy_reference().unwrap_or("-"),
            "Wizard session started"
        );

        Self {
            session_id,
            draft,
            entry,
            services,
            next_ticket: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.draft.step()
    }

    pub fn view(&self) -> &WizardView {
        self.draft.view()
    }

    pub fn submission_status(&self) -> SubmissionStatus {
        self.draft.submission_status()
    }

    pub fn direct_entry(&self) -> Option<&DirectEntry> {
        self.entry.as_ref()
    }

    pub fn is_direct_entry(&self) -> bool {
        self.entry.is_some()
    }

    /// Whether the back control is shown
    pub fn can_retreat(&self) -> bool {
        self.entry.is_none() && self.draft.is_form() && self.draft.step() != WizardStep::FIRST
    }

    pub fn title(&self) -> String {
        match &self.entry {
            Some(entry) => entry.title(),
            None => NEW_REQUEST_TITLE.to_string(),
        }
    }

    pub fn subtitle(&self) -> String {
        match &self.entry {
            Some(entry) => entry.subtitle(),
            None => new_request_subtitle(self.draft.request_type()).to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// "Continue" on steps 1-3
    ///
    /// # Errors
    ///
    /// `WrongView` outside the form, `AdvanceBlocked` when the step lacks its
    /// selection, `TerminalStep` on the details step.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        self.require_form()?;
        sequencer::advance(&mut self.draft)
    }

    /// "Back"
    ///
    /// # Errors
    ///
    /// `RetreatUnavailable` for direct-entry sessions, `WrongView` outside
    /// the form.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        if self.entry.is_some() {
            return Err(WizardError::RetreatUnavailable);
        }
        self.require_form()?;
        Ok(sequencer::retreat(&mut self.draft))
    }

    /// Merges draft-level fields
    ///
    /// The request type can only change on step 1 and the endorsement action
    /// on step 2; dates, reason and details can change anywhere on the form.
    pub fn update_draft(&mut self, patch: DraftPatch) -> Result<(), WizardError> {
        self.require_form()?;
        if patch.request_type.is_some() {
            self.require_step(WizardStep::RequestType)?;
        }
        if patch.endorsement_action.is_some() {
            self.require_step(WizardStep::EndorsementAction)?;
        }
        self.draft.apply(patch)
    }

    // ------------------------------------------------------------------
    // Policy selection
    // ------------------------------------------------------------------

    /// Policies offered on step 3
    pub fn selectable_policies(&self) -> Vec<Policy> {
        self.services.policies.active_policies()
    }

    /// Picks the target policy on step 3
    pub fn select_policy(&mut self, key: &PolicyKey) -> Result<&Policy, WizardError> {
        self.require_form()?;
        self.require_step(WizardStep::PolicySelection)?;
        let policy = self.services.policies.selectable(key)?;
        debug!(policy_reference = %policy.reference_no, "Policy selected");
        self.draft.assign_policy(policy);
        self.draft
            .selected_policy()
            .ok_or_else(|| domain_policy::PolicyError::not_found(key).into())
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn add_property(&mut self) -> Result<PropertyId, WizardError> {
        self.require_details_form()?;
        Ok(self.draft.properties_mut().add())
    }

    /// Removes a property; `Ok(false)` when it is the last one or unknown
    pub fn remove_property(&mut self, id: PropertyId) -> Result<bool, WizardError> {
        self.require_details_form()?;
        Ok(self.draft.properties_mut().remove(id))
    }

    /// Patches a property; `Ok(false)` for an unknown id
    pub fn update_property(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<bool, WizardError> {
        self.require_details_form()?;
        let updated = self.draft.properties_mut().update(id, patch)?;
        if updated {
            debug!(property_id = %id, "Property updated");
        }
        Ok(updated)
    }

    pub fn select_property(&mut self, id: PropertyId) -> Result<bool, WizardError> {
        self.require_details_form()?;
        Ok(self.draft.properties_mut().select(id))
    }

    pub fn previous_property(&mut self) -> Result<bool, WizardError> {
        self.require_details_form()?;
        Ok(self.draft.properties_mut().select_previous())
    }

    pub fn next_property(&mut self) -> Result<bool, WizardError> {
        self.require_details_form()?;
        Ok(self.draft.properties_mut().select_next())
    }

    // ------------------------------------------------------------------
    // Assistant
    // ------------------------------------------------------------------

    /// Fills the details field with a remark suggested for the current reason
    pub async fn suggest_remarks(&mut self) -> Result<&str, WizardError> {
        self.require_details_form()?;
        let reason = self.draft.reason();
        let reference = self.draft.policy_reference().unwrap_or_default().to_string();
        let text = self
            .services
            .assistant
            .suggest_endorsement_text(reason.label(), &reference)
            .await;
        debug!(reason = %reason, chars = text.len(), "Remarks suggested");
        self.draft.details = text;
        Ok(self.draft.details())
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Switches to the loading view and detaches the generation
    ///
    /// # Errors
    ///
    /// `WrongView` outside the form, `WrongStep` before the details step.
    pub fn begin_submission(&mut self) -> Result<PendingQuotation, WizardError> {
        self.require_details_form()?;
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.draft.view = WizardView::Loading { ticket };

        info!(
            session_id = %self.session_id,
            ticket,
            request_type = ?self.draft.request_type(),
            properties = self.draft.properties().len(),
            "Quotation submission started"
        );

        Ok(PendingQuotation {
            session_id: self.session_id,
            ticket,
            draft: self.draft.clone(),
            assistant: Arc::clone(&self.services.assistant),
            min_loading: self.services.min_loading,
        })
    }

    /// Applies a finished generation if its loading view is still showing
    ///
    /// Results from another session or an earlier ticket are discarded.
    pub fn complete_submission(&mut self, completed: CompletedQuotation) -> Completion {
        match self.draft.view() {
            WizardView::Loading { ticket }
                if *ticket == completed.ticket && completed.session_id == self.session_id => {}
            _ => {
                debug!(ticket = completed.ticket, "Stale quotation result discarded");
                return Completion::Discarded;
            }
        }

        let details = if completed.details.trim().is_empty() {
            EMPTY_QUOTATION_PLACEHOLDER.to_string()
        } else {
            completed.details
        };
        let status = SubmissionStatus::from(self.services.resolver.initial_outcome(&self.draft));
        self.draft.show_quotation(details, status);

        info!(
            session_id = %self.session_id,
            ticket = completed.ticket,
            status = ?status,
            "Quotation ready"
        );
        Completion::Applied(status)
    }

    /// Generates a quotation and shows it
    ///
    /// Always ends on the review screen with non-empty text: generator
    /// failures are absorbed by the assistant adapter.
    pub async fn submit_for_quotation(&mut self) -> Result<SubmissionStatus, WizardError> {
        let pending = self.begin_submission()?;
        let completed = pending.run().await;
        match self.complete_submission(completed) {
            Completion::Applied(status) => Ok(status),
            Completion::Discarded => Ok(self.submission_status()),
        }
    }

    /// Leaves the loading view; the in-flight result will be discarded
    pub fn cancel_loading(&mut self) -> Result<(), WizardError> {
        if !self.draft.is_loading() {
            return Err(WizardError::WrongView {
                expected: "loading",
                actual: self.draft.view().name(),
            });
        }
        self.draft.show_form();
        info!(session_id = %self.session_id, "Quotation submission cancelled");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Review screen
    // ------------------------------------------------------------------

    pub fn discuss_price(&mut self) -> Result<SubmissionStatus, WizardError> {
        outcome::discuss_price(&mut self.draft)
    }

    pub fn issue(&mut self) -> Result<SubmissionStatus, WizardError> {
        outcome::issue(&mut self.draft, self.services.resolver.as_ref())
    }

    pub fn decline(&mut self, confirmation: Confirmation) -> Result<SubmissionStatus, WizardError> {
        outcome::decline(&mut self.draft, confirmation)
    }

    pub fn edit_info(&mut self) -> Result<(), WizardError> {
        outcome::edit_info(&mut self.draft)
    }

    pub fn regenerate(&mut self) -> Result<(), WizardError> {
        outcome::regenerate(&mut self.draft)
    }

    pub fn back_to_quotation(&mut self) -> Result<SubmissionStatus, WizardError> {
        outcome::back_to_quotation(&mut self.draft)
    }

    pub fn update_payment(&mut self, patch: PaymentPatch) -> Result<(), WizardError> {
        outcome::update_payment(&mut self.draft, patch)
    }

    pub fn complete_payment(&mut self) -> Result<SubmissionStatus, WizardError> {
        outcome::complete_payment(&mut self.draft)
    }

    /// Ends the session; the draft is dropped
    pub fn exit(self) -> SessionId {
        info!(
            session_id = %self.session_id,
            step = self.draft.step().number(),
            view = %self.draft.view(),
            "Wizard session closed"
        );
        self.session_id
    }

    fn require_form(&self) -> Result<(), WizardError> {
        if self.draft.is_form() {
            Ok(())
        } else {
            Err(WizardError::WrongView {
                expected: "form",
                actual: self.draft.view().name(),
            })
        }
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        let actual = self.draft.step();
        if actual == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep { expected, actual })
        }
    }

    fn require_details_form(&self) -> Result<(), WizardError> {
        self.require_form()?;
        self.require_step(WizardStep::Details)
    }
}
