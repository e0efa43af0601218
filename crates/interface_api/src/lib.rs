//! HTTP API Layer
//!
//! REST surface of the policy request console using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: policy list, health and the wizard session
//! - **DTOs**: request bodies and the rendered wizard page
//! - **Error Handling**: wizard and policy errors mapped to status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_policy::StaticPolicyCatalog;
use domain_wizard::{WizardController, WizardServices};

use crate::config::ApiConfig;
use crate::handlers::{health, policy, wizard};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub services: WizardServices,
    /// The single open wizard session, if any
    pub session: Arc<Mutex<Option<WizardController>>>,
    pub config: ApiConfig,
}

impl AppState {
    /// Demo catalog plus the configured assistant backend
    pub fn new(config: ApiConfig) -> Self {
        let services = WizardServices::new(
            Arc::new(StaticPolicyCatalog::demo()),
            config.assistant.build(),
            &config.wizard,
        );
        Self::with_services(services, config)
    }

    pub fn with_services(services: WizardServices, config: ApiConfig) -> Self {
        Self {
            services,
            session: Arc::new(Mutex::new(None)),
            config,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health::health_check));

    let policy_routes = Router::new()
        .route("/", get(policy::list_policies))
        .route("/:id", get(policy::get_policy));

    let property_routes = Router::new()
        .route("/", post(wizard::add_property))
        .route("/previous", post(wizard::previous_property))
        .route("/next", post(wizard::next_property))
        .route(
            "/:id",
            patch(wizard::update_property).delete(wizard::remove_property),
        )
        .route("/:id/select", post(wizard::select_property));

    let quotation_routes = Router::new()
        .route("/", post(wizard::submit_quotation))
        .route("/cancel", post(wizard::cancel_quotation))
        .route("/edit", post(wizard::edit_info))
        .route("/discuss", post(wizard::discuss_price))
        .route("/issue", post(wizard::issue))
        .route("/decline", post(wizard::decline))
        .route("/regenerate", post(wizard::regenerate))
        .route("/back", post(wizard::back_to_quotation));

    let wizard_routes = Router::new()
        .route(
            "/",
            post(wizard::start)
                .get(wizard::get_session)
                .delete(wizard::exit),
        )
        .route("/advance", post(wizard::advance))
        .route("/retreat", post(wizard::retreat))
        .route("/draft", patch(wizard::update_draft))
        .route("/policy", put(wizard::select_policy))
        .route("/policies", get(wizard::selectable_policies))
        .route("/suggestion", post(wizard::suggest_remarks))
        .route("/payment", patch(wizard::update_payment))
        .route("/payment/complete", post(wizard::complete_payment))
        .nest("/properties", property_routes)
        .nest("/quotation", quotation_routes);

    let api_routes = Router::new()
        .nest("/policies", policy_routes)
        .nest("/wizard", wizard_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
