//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use domain_policy::PolicySource;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub policies: usize,
    pub session_open: bool,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let session_open = state.session.lock().await.is_some();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        policies: state.services.policies.policies().len(),
        session_open,
    })
}
