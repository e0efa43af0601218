//! Policy handlers

use axum::{
    extract::{Path, State},
    Json,
};

use domain_policy::{PolicyError, PolicyKey, PolicySource};

use crate::dto::policy::PolicyResponse;
use crate::{error::ApiError, AppState};

/// Lists policies in dashboard order
pub async fn list_policies(State(state): State<AppState>) -> Json<Vec<PolicyResponse>> {
    let policies = state.services.policies.policies();
    Json(policies.iter().map(PolicyResponse::from).collect())
}

/// Gets a policy by key
pub async fn get_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let key = PolicyKey::new(id);
    let policy = state
        .services
        .policies
        .find(&key)
        .ok_or_else(|| PolicyError::not_found(&key))?;
    Ok(Json(PolicyResponse::from(&policy)))
}
