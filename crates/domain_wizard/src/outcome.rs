//! Quotation Outcome Resolver
//!
//! Decides what the review screen shows once a quotation has been generated,
//! and where the "issue" action leads. Outcomes are mock: a scenario table
//! keyed by the selected policy stands in for real underwriting.
//!
//! The second half of this module holds the review-screen transitions
//! (discuss, issue, decline, payment, and the ways back to the form).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use domain_policy::PolicyKey;

use crate::draft::{PaymentPatch, RequestDraft, SubmissionStatus, WizardView};
use crate::error::WizardError;

/// Initial status of a freshly generated quotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOutcome {
    #[default]
    Ready,
    Error,
    Delayed,
}

impl From<GenerationOutcome> for SubmissionStatus {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Ready => SubmissionStatus::Ready,
            GenerationOutcome::Error => SubmissionStatus::Error,
            GenerationOutcome::Delayed => SubmissionStatus::Delayed,
        }
    }
}

/// Where "issue" leads from the review screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceRoute {
    /// The quote lapsed before acceptance
    Expire,
    /// Payment details must be captured before issuing
    RequirePayment,
    #[default]
    Issue,
}

impl From<AcceptanceRoute> for SubmissionStatus {
    fn from(route: AcceptanceRoute) -> Self {
        match route {
            AcceptanceRoute::Expire => SubmissionStatus::ExpiredAfterAcceptance,
            AcceptanceRoute::RequirePayment => SubmissionStatus::AwaitingPaymentDetails,
            AcceptanceRoute::Issue => SubmissionStatus::Issued,
        }
    }
}

/// Scenario table keyed by selected-policy id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioRules {
    pub generation: HashMap<PolicyKey, GenerationOutcome>,
    pub acceptance: HashMap<PolicyKey, AcceptanceRoute>,
    /// Route for policies absent from `acceptance` (and for quotations)
    pub default_acceptance: AcceptanceRoute,
}

impl ScenarioRules {
    /// A table with no sentinels: every quotation is ready and issues directly
    pub fn empty() -> Self {
        Self {
            generation: HashMap::new(),
            acceptance: HashMap::new(),
            default_acceptance: AcceptanceRoute::Issue,
        }
    }

    pub fn with_generation(mut self, key: impl Into<PolicyKey>, outcome: GenerationOutcome) -> Self {
        self.generation.insert(key.into(), outcome);
        self
    }

    pub fn with_acceptance(mut self, key: impl Into<PolicyKey>, route: AcceptanceRoute) -> Self {
        self.acceptance.insert(key.into(), route);
        self
    }
}

impl Default for ScenarioRules {
    /// The demo sentinels: policy 5 fails, 6 is delayed, 7 expires on
    /// acceptance and 1 asks for payment details
    fn default() -> Self {
        Self::empty()
            .with_generation("5", GenerationOutcome::Error)
            .with_generation("6", GenerationOutcome::Delayed)
            .with_acceptance("7", AcceptanceRoute::Expire)
            .with_acceptance("1", AcceptanceRoute::RequirePayment)
    }
}

/// Decides quotation outcomes for a draft
pub trait OutcomeResolver: Send + Sync + 'static {
    /// Status shown right after generation
    fn initial_outcome(&self, draft: &RequestDraft) -> GenerationOutcome;

    /// Route taken by an explicit "issue"
    fn acceptance_route(&self, draft: &RequestDraft) -> AcceptanceRoute;
}

/// Resolver backed by a [`ScenarioRules`] table
#[derive(Debug, Clone, Default)]
pub struct ScenarioResolver {
    rules: ScenarioRules,
}

impl ScenarioResolver {
    pub fn new(rules: ScenarioRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScenarioRules {
        &self.rules
    }
}

impl OutcomeResolver for ScenarioResolver {
    fn initial_outcome(&self, draft: &RequestDraft) -> GenerationOutcome {
        draft
            .selected_policy()
            .and_then(|policy| self.rules.generation.get(&policy.id))
            .copied()
            .unwrap_or_default()
    }

    fn acceptance_route(&self, draft: &RequestDraft) -> AcceptanceRoute {
        draft
            .selected_policy()
            .and_then(|policy| self.rules.acceptance.get(&policy.id))
            .copied()
            .unwrap_or(self.rules.default_acceptance)
    }
}

/// Answer to the "Decline this quotation?" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    Confirmed,
    Dismissed,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Dismissed
        }
    }
}

/// Prompt shown before a decline is applied
pub const DECLINE_PROMPT: &str = "Decline this quotation?";

fn current_status(draft: &RequestDraft) -> Result<SubmissionStatus, WizardError> {
    match draft.view() {
        WizardView::Quotation(screen) => Ok(screen.status),
        other => Err(WizardError::WrongView {
            expected: "quotation",
            actual: other.name(),
        }),
    }
}

fn require_review_actions(
    draft: &RequestDraft,
    action: &'static str,
) -> Result<SubmissionStatus, WizardError> {
    let status = current_status(draft)?;
    if !status.offers_review_actions() {
        return Err(WizardError::ReviewActionUnavailable { status, action });
    }
    Ok(status)
}

fn require_status(
    draft: &RequestDraft,
    expected: SubmissionStatus,
    action: &'static str,
) -> Result<(), WizardError> {
    let status = current_status(draft)?;
    if status != expected {
        return Err(WizardError::ReviewActionUnavailable { status, action });
    }
    Ok(())
}

/// "Discuss price": hands the quotation to an underwriter
pub fn discuss_price(draft: &mut RequestDraft) -> Result<SubmissionStatus, WizardError> {
    require_review_actions(draft, "discuss")?;
    draft.set_status(SubmissionStatus::UnderReview);
    info!("Quotation sent for review");
    Ok(SubmissionStatus::UnderReview)
}

/// "Issue": follows the resolver's acceptance route
pub fn issue(
    draft: &mut RequestDraft,
    resolver: &dyn OutcomeResolver,
) -> Result<SubmissionStatus, WizardError> {
    require_review_actions(draft, "issue")?;
    let route = resolver.acceptance_route(draft);
    let status = SubmissionStatus::from(route);
    draft.set_status(status);
    info!(route = ?route, status = ?status, "Quotation accepted");
    Ok(status)
}

/// "Decline": applied only when confirmed; otherwise the status is unchanged
pub fn decline(
    draft: &mut RequestDraft,
    confirmation: Confirmation,
) -> Result<SubmissionStatus, WizardError> {
    let status = require_review_actions(draft, "decline")?;
    match confirmation {
        Confirmation::Confirmed => {
            draft.set_status(SubmissionStatus::Declined);
            info!("Quotation declined");
            Ok(SubmissionStatus::Declined)
        }
        Confirmation::Dismissed => {
            debug!("Decline dismissed");
            Ok(status)
        }
    }
}

/// "Edit info": back to the form with the draft intact
///
/// Offered alongside the other review actions only; the error and delayed
/// screens lead back to the dashboard.
pub fn edit_info(draft: &mut RequestDraft) -> Result<(), WizardError> {
    require_review_actions(draft, "edit")?;
    draft.show_form();
    debug!("Returned to the details form");
    Ok(())
}

/// "Generate another quote" after an expired acceptance
pub fn regenerate(draft: &mut RequestDraft) -> Result<(), WizardError> {
    require_status(draft, SubmissionStatus::ExpiredAfterAcceptance, "regenerate")?;
    draft.show_form();
    debug!("Expired quotation dismissed");
    Ok(())
}

/// "Back to quotation" from the payment form
pub fn back_to_quotation(draft: &mut RequestDraft) -> Result<SubmissionStatus, WizardError> {
    require_status(draft, SubmissionStatus::AwaitingPaymentDetails, "back")?;
    draft.set_status(SubmissionStatus::Ready);
    Ok(SubmissionStatus::Ready)
}

/// Edits the payment form; only while payment details are awaited
pub fn update_payment(draft: &mut RequestDraft, patch: PaymentPatch) -> Result<(), WizardError> {
    require_status(draft, SubmissionStatus::AwaitingPaymentDetails, "update payment")?;
    draft.payment_mut().apply(patch);
    Ok(())
}

/// Issues from the payment form
///
/// # Errors
///
/// `PaymentIncomplete` naming every blank input.
pub fn complete_payment(draft: &mut RequestDraft) -> Result<SubmissionStatus, WizardError> {
    require_status(draft, SubmissionStatus::AwaitingPaymentDetails, "complete payment")?;
    let missing = draft.payment().missing_fields();
    if !missing.is_empty() {
        return Err(WizardError::PaymentIncomplete { missing });
    }
    draft.set_status(SubmissionStatus::Issued);
    info!(method = ?draft.payment().method, "Issued after payment details");
    Ok(SubmissionStatus::Issued)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewing(status: SubmissionStatus) -> RequestDraft {
        let mut draft = RequestDraft::new();
        draft.show_quotation("Financial Summary".to_string(), status);
        draft
    }

    #[test]
    fn test_default_table() {
        let rules = ScenarioRules::default();
        assert_eq!(rules.generation.get(&PolicyKey::from("5")), Some(&GenerationOutcome::Error));
        assert_eq!(rules.generation.get(&PolicyKey::from("6")), Some(&GenerationOutcome::Delayed));
        assert_eq!(rules.acceptance.get(&PolicyKey::from("7")), Some(&AcceptanceRoute::Expire));
        assert_eq!(
            rules.acceptance.get(&PolicyKey::from("1")),
            Some(&AcceptanceRoute::RequirePayment)
        );
        assert_eq!(rules.default_acceptance, AcceptanceRoute::Issue);
    }

    #[test]
    fn test_quotation_without_policy_resolves_to_defaults() {
        let resolver = ScenarioResolver::default();
        let draft = RequestDraft::new();
        assert_eq!(resolver.initial_outcome(&draft), GenerationOutcome::Ready);
        assert_eq!(resolver.acceptance_route(&draft), AcceptanceRoute::Issue);
    }

    #[test]
    fn test_decline_needs_confirmation() {
        let mut draft = reviewing(SubmissionStatus::Ready);
        assert_eq!(decline(&mut draft, Confirmation::Dismissed), Ok(SubmissionStatus::Ready));
        assert_eq!(draft.submission_status(), SubmissionStatus::Ready);

        assert_eq!(decline(&mut draft, Confirmation::Confirmed), Ok(SubmissionStatus::Declined));
        assert_eq!(draft.submission_status(), SubmissionStatus::Declined);
    }

    #[test]
    fn test_review_actions_from_under_review() {
        let mut draft = reviewing(SubmissionStatus::Ready);
        discuss_price(&mut draft).unwrap();
        let status = issue(&mut draft, &ScenarioResolver::default()).unwrap();
        assert_eq!(status, SubmissionStatus::Issued);
    }

    #[test]
    fn test_review_actions_rejected_on_final_screens() {
        let mut draft = reviewing(SubmissionStatus::Declined);
        assert!(matches!(
            discuss_price(&mut draft),
            Err(WizardError::ReviewActionUnavailable { action: "discuss", .. })
        ));
        assert!(edit_info(&mut draft).is_err());
    }

    #[test]
    fn test_edit_only_from_actionable_screens() {
        for status in [SubmissionStatus::Ready, SubmissionStatus::UnderReview] {
            let mut draft = reviewing(status);
            assert_eq!(edit_info(&mut draft), Ok(()));
            assert!(draft.is_form());
        }

        for status in [
            SubmissionStatus::Error,
            SubmissionStatus::Delayed,
            SubmissionStatus::ExpiredAfterAcceptance,
            SubmissionStatus::AwaitingPaymentDetails,
        ] {
            let mut draft = reviewing(status);
            assert!(matches!(
                edit_info(&mut draft),
                Err(WizardError::ReviewActionUnavailable { action: "edit", .. })
            ));
        }
    }

    #[test]
    fn test_review_actions_rejected_outside_quotation_view() {
        let mut draft = RequestDraft::new();
        assert_eq!(
            discuss_price(&mut draft),
            Err(WizardError::WrongView {
                expected: "quotation",
                actual: "form",
            })
        );
    }

    #[test]
    fn test_back_to_quotation_resets_status() {
        let mut draft = reviewing(SubmissionStatus::AwaitingPaymentDetails);
        assert_eq!(back_to_quotation(&mut draft), Ok(SubmissionStatus::Ready));
        assert!(back_to_quotation(&mut draft).is_err());
    }

    #[test]
    fn test_regenerate_only_after_expiry() {
        let mut draft = reviewing(SubmissionStatus::Ready);
        assert!(regenerate(&mut draft).is_err());

        let mut draft = reviewing(SubmissionStatus::ExpiredAfterAcceptance);
        regenerate(&mut draft).unwrap();
        assert!(draft.is_form());
        assert_eq!(draft.submission_status(), SubmissionStatus::Ready);
    }
}
