//! HTTP API tests
//!
//! Drive the router in-process with `axum-test`. Every session uses the
//! scripted assistant and no minimum loading time unless a test says
//! otherwise.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::{ScriptedAssistant, WizardBuilder};

fn server_with(builder: WizardBuilder) -> TestServer {
    let state = AppState::with_services(builder.services(), ApiConfig::default());
    TestServer::new(create_router(state)).expect("test server")
}

fn server() -> TestServer {
    server_with(WizardBuilder::new())
}

async fn start(server: &TestServer) -> Value {
    let response = server.post("/api/v1/wizard").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

/// Walks a fresh session to the details step
async fn walk_to_details(server: &TestServer, request_type: &str, policy_id: Option<&str>) -> Value {
    start(server).await;
    server
        .patch("/api/v1/wizard/draft")
        .json(&json!({ "request_type": request_type }))
        .await;
    let mut page = server.post("/api/v1/wizard/advance").await.json::<Value>();

    if request_type == "endorsement" {
        server
            .patch("/api/v1/wizard/draft")
            .json(&json!({ "endorsement_action": "add" }))
            .await;
        page = server.post("/api/v1/wizard/advance").await.json::<Value>();
    }
    if let Some(policy_id) = policy_id {
        server
            .put("/api/v1/wizard/policy")
            .json(&json!({ "policy_id": policy_id }))
            .await;
        page = server.post("/api/v1/wizard/advance").await.json::<Value>();
    }

    assert_eq!(page["step"], 4);
    page
}

fn first_property_id(page: &Value) -> String {
    page["properties"][0]["id"].as_str().expect("property id").to_string()
}

// ============================================================================
// Policy list and health
// ============================================================================

mod policies {
    use super::*;

    #[tokio::test]
    async fn test_list_policies_in_dashboard_order() {
        let server = server();
        let response = server.get("/api/v1/policies").await;
        response.assert_status_ok();

        let policies = response.json::<Vec<Value>>();
        assert_eq!(policies.len(), 15);
        assert_eq!(policies[0]["reference_no"], "POL-88291-XA");
        assert_eq!(policies[0]["updated_on"], "Oct 24, 2023");
        assert_eq!(policies[0]["actions"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_expired_policy_offers_renewal_only() {
        let server = server();
        let policy = server.get("/api/v1/policies/4").await.json::<Value>();
        let actions = policy["actions"].as_array().expect("actions");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0]["request_type"], "renewal");
        assert!(actions[0].get("action").is_none());
    }

    #[tokio::test]
    async fn test_unknown_policy_is_not_found() {
        let server = server();
        let response = server.get("/api/v1/policies/999").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "not_found");
    }

    #[tokio::test]
    async fn test_health_reports_session() {
        let server = server();
        let before = server.get("/health").await.json::<Value>();
        assert_eq!(before["status"], "healthy");
        assert_eq!(before["session_open"], false);

        start(&server).await;
        let after = server.get("/health").await.json::<Value>();
        assert_eq!(after["session_open"], true);
        assert_eq!(after["policies"], 15);
    }
}

// ============================================================================
// Session lifecycle and direct entry
// ============================================================================

mod session {
    use super::*;

    #[tokio::test]
    async fn test_no_session_is_reported() {
        let server = server();
        let response = server.get("/api/v1/wizard").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "no_session");
    }

    #[tokio::test]
    async fn test_new_request_starts_on_step_one() {
        let server = server();
        let page = start(&server).await;

        assert_eq!(page["step"], 1);
        assert_eq!(page["title"], "New Request");
        assert_eq!(page["view"]["kind"], "form");
        assert_eq!(page["can_retreat"], false);
        assert_eq!(page["properties"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_direct_entry_opens_details() {
        let server = server();
        let response = server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "8", "request_type": "endorsement", "action": "add" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let page = response.json::<Value>();
        assert_eq!(page["step"], 4);
        assert_eq!(page["title"], "Add Endorsement");
        assert_eq!(page["subtitle"], "Providing details for POL-33019-UI");
        assert_eq!(page["request_type"], "endorsement");
        assert_eq!(page["endorsement_action"], "add");
        assert_eq!(page["policy_reference"], "POL-33019-UI");
        assert_eq!(page["can_retreat"], false);
    }

    #[tokio::test]
    async fn test_direct_entry_cannot_retreat() {
        let server = server();
        server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "4", "request_type": "renewal" }))
            .await;

        let response = server.post("/api/v1/wizard/retreat").await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_invalid_direct_entries() {
        let server = server();

        let quotation = server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "8", "request_type": "quotation" }))
            .await;
        assert_eq!(quotation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing_type = server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "8" }))
            .await;
        assert_eq!(missing_type.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let unknown = server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "999", "request_type": "renewal" }))
            .await;
        assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_direct_entry_must_match_row_actions() {
        let server = server();

        let endorse_expired = server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "4", "request_type": "endorsement", "action": "cancel" }))
            .await;
        assert_eq!(endorse_expired.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let renew_pending = server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "3", "request_type": "renewal" }))
            .await;
        assert_eq!(renew_pending.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let renew_active = server
            .post("/api/v1/wizard")
            .json(&json!({ "policy_id": "8", "request_type": "renewal" }))
            .await;
        assert_eq!(renew_active.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let session = server.get("/api/v1/wizard").await;
        assert_eq!(session.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_exit_discards_session() {
        let server = server();
        start(&server).await;

        let response = server.delete("/api/v1/wizard").await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let after = server.get("/api/v1/wizard").await;
        assert_eq!(after.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_replaces_open_session() {
        let server = server();
        let first = start(&server).await;
        let second = start(&server).await;
        assert_ne!(first["session_id"], second["session_id"]);
    }
}

// ============================================================================
// Step navigation
// ============================================================================

mod navigation {
    use super::*;

    #[tokio::test]
    async fn test_advance_without_type_is_conflict() {
        let server = server();
        start(&server).await;

        let response = server.post("/api/v1/wizard/advance").await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"], "conflict");
    }

    #[tokio::test]
    async fn test_endorsement_path_and_back() {
        let server = server();
        start(&server).await;

        server
            .patch("/api/v1/wizard/draft")
            .json(&json!({ "request_type": "endorsement" }))
            .await
            .assert_status_ok();
        let step_two = server.post("/api/v1/wizard/advance").await.json::<Value>();
        assert_eq!(step_two["step"], 2);
        assert_eq!(step_two["subtitle"], "Modifying an existing policy");

        server
            .patch("/api/v1/wizard/draft")
            .json(&json!({ "endorsement_action": "cancel" }))
            .await
            .assert_status_ok();
        let step_three = server.post("/api/v1/wizard/advance").await.json::<Value>();
        assert_eq!(step_three["step"], 3);

        let blocked = server.post("/api/v1/wizard/advance").await;
        assert_eq!(blocked.status_code(), StatusCode::CONFLICT);

        let back = server.post("/api/v1/wizard/retreat").await.json::<Value>();
        assert_eq!(back["step"], 2);
        let back = server.post("/api/v1/wizard/retreat").await.json::<Value>();
        assert_eq!(back["step"], 1);
        assert_eq!(back["can_retreat"], false);
    }

    #[tokio::test]
    async fn test_quotation_skips_to_details() {
        let server = server();
        let page = walk_to_details(&server, "quotation", None).await;
        assert_eq!(page["subtitle"], "Starting a new quotation");
        assert!(page["selected_policy"].is_null());
    }

    #[tokio::test]
    async fn test_policy_step_lists_active_only() {
        let server = server();
        let policies = server.get("/api/v1/wizard/policies").await.json::<Vec<Value>>();
        assert_eq!(policies.len(), 12);
        assert!(policies.iter().all(|p| p["status"] == "Active"));
    }

    #[tokio::test]
    async fn test_select_inactive_policy_is_rejected() {
        let server = server();
        start(&server).await;
        server
            .patch("/api/v1/wizard/draft")
            .json(&json!({ "request_type": "renewal" }))
            .await;
        server.post("/api/v1/wizard/advance").await;

        let response = server
            .put("/api/v1/wizard/policy")
            .json(&json!({ "policy_id": "4" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let selected = server
            .put("/api/v1/wizard/policy")
            .json(&json!({ "policy_id": "8" }))
            .await
            .json::<Value>();
        assert_eq!(selected["policy_reference"], "POL-33019-UI");
    }

    #[tokio::test]
    async fn test_action_only_editable_on_its_step() {
        let server = server();
        start(&server).await;

        let response = server
            .patch("/api/v1/wizard/draft")
            .json(&json!({ "endorsement_action": "add" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
    }
}

// ============================================================================
// Property editor
// ============================================================================

mod properties {
    use super::*;

    #[tokio::test]
    async fn test_add_update_and_remove() {
        let server = server();
        let page = walk_to_details(&server, "quotation", None).await;
        let first = first_property_id(&page);

        let added = server.post("/api/v1/wizard/properties").await;
        assert_eq!(added.status_code(), StatusCode::CREATED);
        let added = added.json::<Value>();
        assert_eq!(added["properties"].as_array().map(Vec::len), Some(2));
        assert_eq!(added["properties"][1]["active"], true);

        let updated = server
            .patch(&format!("/api/v1/wizard/properties/{}", first))
            .json(&json!({ "city": "riyadh" }))
            .await
            .json::<Value>();
        assert_eq!(updated["properties"][0]["details"]["city"], "riyadh");
        assert!(updated["properties"][1]["details"]["city"].is_null());

        let removed = server
            .delete(&format!("/api/v1/wizard/properties/{}", first))
            .await
            .json::<Value>();
        assert_eq!(removed["properties"].as_array().map(Vec::len), Some(1));
        assert_eq!(removed["properties"][0]["heading"], "Property #1");
    }

    #[tokio::test]
    async fn test_last_property_is_kept() {
        let server = server();
        let page = walk_to_details(&server, "quotation", None).await;
        let only = first_property_id(&page);

        let response = server
            .delete(&format!("/api/v1/wizard/properties/{}", only))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["properties"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_navigation_between_entries() {
        let server = server();
        walk_to_details(&server, "quotation", None).await;
        server.post("/api/v1/wizard/properties").await;

        let previous = server.post("/api/v1/wizard/properties/previous").await.json::<Value>();
        assert_eq!(previous["properties"][0]["active"], true);

        let next = server.post("/api/v1/wizard/properties/next").await.json::<Value>();
        assert_eq!(next["properties"][1]["active"], true);

        let first = first_property_id(&next);
        let selected = server
            .post(&format!("/api/v1/wizard/properties/{}/select", first))
            .await
            .json::<Value>();
        assert_eq!(selected["properties"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_invalid_usage_is_rejected() {
        let server = server();
        let page = walk_to_details(&server, "quotation", None).await;
        let first = first_property_id(&page);

        let response = server
            .patch(&format!("/api/v1/wizard/properties/{}", first))
            .json(&json!({ "usage_percent": 150 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let server = server();
        walk_to_details(&server, "quotation", None).await;

        let unknown = server
            .delete("/api/v1/wizard/properties/PRP-01890a5d-ac96-774b-bcce-b302099a8057")
            .await;
        assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

        let malformed = server.delete("/api/v1/wizard/properties/not-an-id").await;
        assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_properties_locked_before_details() {
        let server = server();
        start(&server).await;

        let response = server.post("/api/v1/wizard/properties").await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
    }
}

// ============================================================================
// Quotation and review
// ============================================================================

mod quotation {
    use super::*;

    #[tokio::test]
    async fn test_submit_shows_quotation() {
        let server = server();
        walk_to_details(&server, "quotation", None).await;

        let response = server.post("/api/v1/wizard/quotation").await;
        response.assert_status_ok();

        let page = response.json::<Value>();
        assert_eq!(page["view"]["kind"], "quotation");
        assert_eq!(page["review"]["status"], "none");
        assert_eq!(page["review"]["offers_review_actions"], true);
        assert!(!page["view"]["details"].as_str().unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_empty_generation_uses_placeholder() {
        let builder = WizardBuilder::new()
            .with_assistant(Arc::new(ScriptedAssistant::new().with_quotation("")));
        let server = server_with(builder);
        walk_to_details(&server, "quotation", None).await;

        let page = server.post("/api/v1/wizard/quotation").await.json::<Value>();
        assert_eq!(page["view"]["details"], "Quotation generation failed.");
    }

    #[tokio::test]
    async fn test_sentinel_policies() {
        let server = server();

        walk_to_details(&server, "renewal", Some("5")).await;
        let error = server.post("/api/v1/wizard/quotation").await.json::<Value>();
        assert_eq!(error["review"]["status"], "error");
        assert_eq!(error["review"]["offers_review_actions"], false);

        walk_to_details(&server, "renewal", Some("6")).await;
        let delayed = server.post("/api/v1/wizard/quotation").await.json::<Value>();
        assert_eq!(delayed["review"]["status"], "delayed");
    }

    #[tokio::test]
    async fn test_decline_requires_confirmation() {
        let server = server();
        walk_to_details(&server, "quotation", None).await;
        server.post("/api/v1/wizard/quotation").await;

        let dismissed = server
            .post("/api/v1/wizard/quotation/decline")
            .json(&json!({ "confirmed": false }))
            .await
            .json::<Value>();
        assert_eq!(dismissed["review"]["status"], "none");

        let declined = server
            .post("/api/v1/wizard/quotation/decline")
            .json(&json!({ "confirmed": true }))
            .await
            .json::<Value>();
        assert_eq!(declined["review"]["status"], "declined");

        let again = server.post("/api/v1/wizard/quotation/issue").await;
        assert_eq!(again.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_payment_gates_issuance() {
        let server = server();
        walk_to_details(&server, "endorsement", Some("1")).await;
        server.post("/api/v1/wizard/quotation").await;

        let awaiting = server.post("/api/v1/wizard/quotation/issue").await.json::<Value>();
        assert_eq!(awaiting["review"]["status"], "awaiting_payment_details");
        assert_eq!(awaiting["payment"]["missing"].as_array().map(Vec::len), Some(5));

        let blocked = server.post("/api/v1/wizard/payment/complete").await;
        assert_eq!(blocked.status_code(), StatusCode::CONFLICT);

        server
            .patch("/api/v1/wizard/payment")
            .json(&json!({
                "contact_name": "Fahad Al Otaibi",
                "contact_id": "1029384756",
                "mobile": "0501234567",
                "iban": "SA0380000000608010167519",
                "method": "online"
            }))
            .await
            .assert_status_ok();

        let issued = server.post("/api/v1/wizard/payment/complete").await.json::<Value>();
        assert_eq!(issued["review"]["status"], "success");
        assert!(issued["payment"].is_null());
    }

    #[tokio::test]
    async fn test_payment_back_returns_to_review() {
        let server = server();
        walk_to_details(&server, "endorsement", Some("1")).await;
        server.post("/api/v1/wizard/quotation").await;
        server.post("/api/v1/wizard/quotation/issue").await;

        let back = server.post("/api/v1/wizard/quotation/back").await.json::<Value>();
        assert_eq!(back["review"]["status"], "none");
        assert_eq!(back["review"]["offers_review_actions"], true);
    }

    #[tokio::test]
    async fn test_expired_acceptance_regenerates_to_form() {
        let server = server();
        walk_to_details(&server, "renewal", Some("7")).await;
        server.post("/api/v1/wizard/quotation").await;

        let expired = server.post("/api/v1/wizard/quotation/issue").await.json::<Value>();
        assert_eq!(expired["review"]["status"], "expired_after_acceptance");

        let form = server.post("/api/v1/wizard/quotation/regenerate").await.json::<Value>();
        assert_eq!(form["view"]["kind"], "form");
        assert_eq!(form["step"], 4);
    }

    #[tokio::test]
    async fn test_cancel_while_generating_discards_result() {
        let builder = WizardBuilder::new().with_assistant(Arc::new(
            ScriptedAssistant::new().with_delay(Duration::from_millis(300)),
        ));
        let server = server_with(builder);
        walk_to_details(&server, "quotation", None).await;

        let submit = async { server.post("/api/v1/wizard/quotation").await };
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            server.post("/api/v1/wizard/quotation/cancel").await
        };
        let (submitted, cancelled) = tokio::join!(submit, cancel);

        cancelled.assert_status_ok();
        assert_eq!(cancelled.json::<Value>()["view"]["kind"], "form");

        let page = submitted.json::<Value>();
        assert_eq!(page["view"]["kind"], "form");
        assert!(page["review"].is_null());
    }

    #[tokio::test]
    async fn test_cancel_without_loading_is_conflict() {
        let server = server();
        walk_to_details(&server, "quotation", None).await;

        let response = server.post("/api/v1/wizard/quotation/cancel").await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_suggestion_fills_details() {
        let builder = WizardBuilder::new().with_assistant(Arc::new(
            ScriptedAssistant::new().with_suggestion("Increase the fire limit."),
        ));
        let server = server_with(builder);
        walk_to_details(&server, "endorsement", Some("8")).await;

        let page = server.post("/api/v1/wizard/suggestion").await.json::<Value>();
        assert_eq!(page["details"], "Increase the fire limit.");
    }
}
