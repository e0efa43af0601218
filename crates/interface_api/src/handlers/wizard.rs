//! Wizard session handlers
//!
//! The console runs a single wizard session at a time. Every handler locks
//! the session, dispatches one controller operation and answers with the
//! full page state. Quotation generation runs with the lock released so a
//! cancel request can be served while it is in flight.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::PropertyId;
use domain_policy::{PolicyError, PolicyKey, PolicySource, RowAction};
use domain_wizard::{Confirmation, DirectEntry, PropertyPatch, WizardController, WizardError};

use crate::dto::policy::PolicyResponse;
use crate::dto::wizard::{
    DeclineRequest, SelectPolicyRequest, StartWizardRequest, UpdateDraftRequest,
    UpdatePaymentRequest, WizardResponse,
};
use crate::{error::ApiError, AppState};

type WizardResult = Result<Json<WizardResponse>, ApiError>;

/// Runs one operation against the open session and renders the result
async fn dispatch<T>(
    state: &AppState,
    operation: impl FnOnce(&mut WizardController) -> Result<T, WizardError>,
) -> WizardResult {
    let mut session = state.session.lock().await;
    let controller = session.as_mut().ok_or(ApiError::NoSession)?;
    operation(controller)?;
    Ok(Json(WizardResponse::from(&*controller)))
}

fn parse_property_id(raw: &str) -> Result<PropertyId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid property id: {}", raw)))
}

fn ensure_property(controller: &WizardController, id: PropertyId) -> Result<(), WizardError> {
    match controller.draft().properties().get(id) {
        Some(_) => Ok(()),
        None => Err(WizardError::PropertyNotFound(id.to_string())),
    }
}

/// Opens a new session, replacing any open one
pub async fn start(
    State(state): State<AppState>,
    Json(request): Json<StartWizardRequest>,
) -> Result<(StatusCode, Json<WizardResponse>), ApiError> {
    request.validate()?;

    let entry = match request.policy_id {
        Some(policy_id) => {
            let key = PolicyKey::new(policy_id);
            let policy = state
                .services
                .policies
                .find(&key)
                .ok_or_else(|| PolicyError::not_found(&key))?;
            let request_type = request
                .request_type
                .ok_or_else(|| ApiError::validation("request_type is required with policy_id"))?;
            let row_action = RowAction {
                request_type,
                action: request.action,
            };
            Some(DirectEntry::from_row_action(policy, row_action)?)
        }
        None => None,
    };

    let controller = WizardController::initialize(state.services.clone(), entry);
    let response = WizardResponse::from(&controller);

    let mut session = state.session.lock().await;
    if let Some(previous) = session.replace(controller) {
        previous.exit();
    }
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_session(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, |_| Ok(())).await
}

/// Closes the session and discards its draft
pub async fn exit(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let controller = state.session.lock().await.take().ok_or(ApiError::NoSession)?;
    controller.exit();
    Ok(StatusCode::NO_CONTENT)
}

pub async fn advance(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::advance).await
}

pub async fn retreat(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::retreat).await
}

pub async fn update_draft(
    State(state): State<AppState>,
    Json(request): Json<UpdateDraftRequest>,
) -> WizardResult {
    request.validate()?;
    dispatch(&state, |controller| controller.update_draft(request.into())).await
}

/// Policies offered by the policy-selection step
pub async fn selectable_policies(State(state): State<AppState>) -> Json<Vec<PolicyResponse>> {
    let policies = state.services.policies.active_policies();
    Json(policies.iter().map(PolicyResponse::from).collect())
}

pub async fn select_policy(
    State(state): State<AppState>,
    Json(request): Json<SelectPolicyRequest>,
) -> WizardResult {
    request.validate()?;
    let key = PolicyKey::new(request.policy_id);
    dispatch(&state, |controller| controller.select_policy(&key).map(|_| ())).await
}

// ----------------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------------

pub async fn add_property(State(state): State<AppState>) -> Result<(StatusCode, Json<WizardResponse>), ApiError> {
    let response = dispatch(&state, WizardController::add_property).await?;
    Ok((StatusCode::CREATED, response))
}

pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PropertyPatch>,
) -> WizardResult {
    let id = parse_property_id(&id)?;
    dispatch(&state, |controller| {
        ensure_property(controller, id)?;
        controller.update_property(id, patch)
    })
    .await
}

/// Removes a property; removing the last one leaves the list unchanged
pub async fn remove_property(State(state): State<AppState>, Path(id): Path<String>) -> WizardResult {
    let id = parse_property_id(&id)?;
    dispatch(&state, |controller| {
        ensure_property(controller, id)?;
        controller.remove_property(id)
    })
    .await
}

pub async fn select_property(State(state): State<AppState>, Path(id): Path<String>) -> WizardResult {
    let id = parse_property_id(&id)?;
    dispatch(&state, |controller| {
        ensure_property(controller, id)?;
        controller.select_property(id)
    })
    .await
}

pub async fn previous_property(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::previous_property).await
}

pub async fn next_property(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::next_property).await
}

// ----------------------------------------------------------------------------
// Assistant and submission
// ----------------------------------------------------------------------------

/// Fills the details field with a suggested remark
pub async fn suggest_remarks(State(state): State<AppState>) -> WizardResult {
    let mut session = state.session.lock().await;
    let controller = session.as_mut().ok_or(ApiError::NoSession)?;
    controller.suggest_remarks().await?;
    Ok(Json(WizardResponse::from(&*controller)))
}

/// Generates a quotation and shows the review screen
///
/// If the loading view is cancelled while the generator runs, the result is
/// dropped and the current (form) state is returned.
pub async fn submit_quotation(State(state): State<AppState>) -> WizardResult {
    let pending = {
        let mut session = state.session.lock().await;
        let controller = session.as_mut().ok_or(ApiError::NoSession)?;
        controller.begin_submission()?
    };

    let completed = pending.run().await;

    let mut session = state.session.lock().await;
    let controller = session.as_mut().ok_or(ApiError::NoSession)?;
    controller.complete_submission(completed);
    Ok(Json(WizardResponse::from(&*controller)))
}

pub async fn cancel_quotation(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::cancel_loading).await
}

// ----------------------------------------------------------------------------
// Review screen
// ----------------------------------------------------------------------------

pub async fn edit_info(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::edit_info).await
}

pub async fn discuss_price(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::discuss_price).await
}

pub async fn issue(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::issue).await
}

pub async fn decline(
    State(state): State<AppState>,
    Json(request): Json<DeclineRequest>,
) -> WizardResult {
    let confirmation = Confirmation::from(request.confirmed);
    dispatch(&state, |controller| controller.decline(confirmation)).await
}

pub async fn regenerate(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::regenerate).await
}

pub async fn back_to_quotation(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::back_to_quotation).await
}

pub async fn update_payment(
    State(state): State<AppState>,
    Json(request): Json<UpdatePaymentRequest>,
) -> WizardResult {
    request.validate()?;
    dispatch(&state, |controller| controller.update_payment(request.into())).await
}

pub async fn complete_payment(State(state): State<AppState>) -> WizardResult {
    dispatch(&state, WizardController::complete_payment).await
}
