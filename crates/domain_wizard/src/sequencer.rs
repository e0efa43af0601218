//! Step Sequencer
//!
//! Pure mapping from (step, request type) to the neighbouring steps.
//! Quotations skip straight to the details form, renewals skip the
//! endorsement-action step, endorsements visit every step.

use tracing::debug;

use domain_policy::RequestType;

use crate::draft::{RequestDraft, WizardStep};
use crate::error::WizardError;

/// Step reached by "continue"; `None` from the terminal details step
pub fn next_step(step: WizardStep, request_type: RequestType) -> Option<WizardStep> {
    match (step, request_type) {
        (WizardStep::RequestType, RequestType::Quotation) => Some(WizardStep::Details),
        (WizardStep::RequestType, RequestType::Renewal) => Some(WizardStep::PolicySelection),
        (WizardStep::RequestType, RequestType::Endorsement) => Some(WizardStep::EndorsementAction),
        (WizardStep::EndorsementAction, _) => Some(WizardStep::PolicySelection),
        (WizardStep::PolicySelection, _) => Some(WizardStep::Details),
        (WizardStep::Details, _) => None,
    }
}

/// Step reached by "back", mirroring the skips of [`next_step`]
///
/// Never goes below step 1.
pub fn previous_step(step: WizardStep, request_type: Option<RequestType>) -> WizardStep {
    match (step, request_type) {
        (WizardStep::Details, Some(RequestType::Renewal | RequestType::Endorsement)) => {
            WizardStep::PolicySelection
        }
        (WizardStep::Details, _) => WizardStep::RequestType,
        (WizardStep::PolicySelection, Some(RequestType::Endorsement)) => {
            WizardStep::EndorsementAction
        }
        (WizardStep::PolicySelection, _) => WizardStep::RequestType,
        (WizardStep::EndorsementAction | WizardStep::RequestType, _) => WizardStep::RequestType,
    }
}

/// Moves the draft one step forward
///
/// # Errors
///
/// `AdvanceBlocked` when the current step lacks its selection (step 1 a
/// request type, step 2 an action, step 3 a policy); `TerminalStep` on step 4.
pub fn advance(draft: &mut RequestDraft) -> Result<WizardStep, WizardError> {
    let step = draft.step;
    if step == WizardStep::Details {
        return Err(WizardError::TerminalStep);
    }

    let request_type = draft
        .request_type
        .ok_or_else(|| WizardError::advance_blocked(step, "select a request type"))?;

    match step {
        WizardStep::EndorsementAction if draft.endorsement_action.is_none() => {
            return Err(WizardError::advance_blocked(step, "select an endorsement action"));
        }
        WizardStep::PolicySelection if draft.selected_policy.is_none() => {
            return Err(WizardError::advance_blocked(step, "select a policy"));
        }
        _ => {}
    }

    let next = next_step(step, request_type).ok_or(WizardError::TerminalStep)?;
    debug!(from = step.number(), to = next.number(), request_type = %request_type, "Wizard advanced");
    draft.step = next;
    Ok(next)
}

/// Moves the draft one step back; stays on step 1
pub fn retreat(draft: &mut RequestDraft) -> WizardStep {
    let step = draft.step;
    let previous = previous_step(step, draft.request_type);
    if previous != step {
        debug!(from = step.number(), to = previous.number(), "Wizard retreated");
    }
    draft.step = previous;
    previous
}
