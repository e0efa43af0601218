//! Test Data Builders
//!
//! Builders for wizard sessions and a scripted assistant double. Tests
//! specify only what matters to them; everything else falls back to the
//! demo catalog, the default scenario table and an instant assistant.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use core_kernel::ports::DomainPort;
use domain_policy::{
    EndorsementAction, Policy, PolicySource, RequestType, StaticPolicyCatalog,
};
use domain_wizard::{
    AssistantPort, DirectEntry, DraftPatch, OutcomeResolver, RequestDraft, WizardController,
    WizardServices, WizardSettings,
};

use crate::fixtures::{PolicyFixtures, SettingsFixtures};

/// Assistant double returning fixed texts after an optional delay
pub struct ScriptedAssistant {
    suggestion: String,
    quotation: String,
    delay: Duration,
    suggestion_calls: AtomicUsize,
    quotation_calls: AtomicUsize,
}

impl ScriptedAssistant {
    pub fn new() -> Self {
        Self {
            suggestion: "Scripted endorsement remark.".to_string(),
            quotation: "Financial Summary:\n- Total Adjusted Premium: 62,100 SAR".to_string(),
            delay: Duration::ZERO,
            suggestion_calls: AtomicUsize::new(0),
            quotation_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_suggestion(mut self, text: impl Into<String>) -> Self {
        self.suggestion = text.into();
        self
    }

    pub fn with_quotation(mut self, text: impl Into<String>) -> Self {
        self.quotation = text.into();
        self
    }

    /// Delay applied to every call (uses the tokio clock)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn suggestion_calls(&self) -> usize {
        self.suggestion_calls.load(Ordering::SeqCst)
    }

    pub fn quotation_calls(&self) -> usize {
        self.quotation_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for ScriptedAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainPort for ScriptedAssistant {}

#[async_trait]
impl AssistantPort for ScriptedAssistant {
    async fn suggest_endorsement_text(&self, _reason: &str, _policy_reference: &str) -> String {
        self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.suggestion.clone()
    }

    async fn generate_quotation_summary(&self, _draft: &RequestDraft) -> String {
        self.quotation_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.quotation.clone()
    }
}

/// Builder for wizard sessions
pub struct WizardBuilder {
    policies: Arc<dyn PolicySource>,
    assistant: Arc<dyn AssistantPort>,
    resolver: Option<Arc<dyn OutcomeResolver>>,
    settings: WizardSettings,
    entry: Option<DirectEntry>,
}

impl Default for WizardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardBuilder {
    /// Demo catalog, scripted assistant, default scenarios, no minimum delay
    pub fn new() -> Self {
        Self {
            policies: Arc::new(PolicyFixtures::catalog()),
            assistant: Arc::new(ScriptedAssistant::new()),
            resolver: None,
            settings: SettingsFixtures::instant(),
            entry: None,
        }
    }

    pub fn with_catalog(mut self, catalog: StaticPolicyCatalog) -> Self {
        self.policies = Arc::new(catalog);
        self
    }

    pub fn with_assistant(mut self, assistant: Arc<dyn AssistantPort>) -> Self {
        self.assistant = assistant;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn OutcomeResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_settings(mut self, settings: WizardSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_min_loading(mut self, delay: Duration) -> Self {
        self.settings.min_loading_ms = delay.as_millis() as u64;
        self
    }

    /// Opens the session from a dashboard row
    pub fn direct(
        mut self,
        policy: Policy,
        request_type: RequestType,
        action: Option<EndorsementAction>,
    ) -> Self {
        self.entry = Some(
            DirectEntry::new(policy, request_type, action).expect("valid direct entry"),
        );
        self
    }

    pub fn services(&self) -> WizardServices {
        let services = WizardServices::new(
            Arc::clone(&self.policies),
            Arc::clone(&self.assistant),
            &self.settings,
        );
        match &self.resolver {
            Some(resolver) => services.with_resolver(Arc::clone(resolver)),
            None => services,
        }
    }

    pub fn build(self) -> WizardController {
        let services = self.services();
        WizardController::initialize(services, self.entry)
    }

    /// A "New Request" session walked to the details step for the given type
    ///
    /// Endorsements pick `Add`; renewals and endorsements select `policy`.
    pub fn at_details(self, request_type: RequestType, policy: Option<Policy>) -> WizardController {
        let mut controller = self.build();
        controller
            .update_draft(DraftPatch {
                request_type: Some(request_type),
                ..Default::default()
            })
            .expect("request type accepted");
        controller.advance().expect("leave step 1");

        if request_type == RequestType::Endorsement {
            controller
                .update_draft(DraftPatch {
                    endorsement_action: Some(EndorsementAction::Add),
                    ..Default::default()
                })
                .expect("action accepted");
            controller.advance().expect("leave step 2");
        }

        if request_type.requires_policy() {
            let policy = policy.unwrap_or_else(PolicyFixtures::plain_active);
            controller.select_policy(&policy.id).expect("policy selectable");
            controller.advance().expect("leave step 3");
        }

        controller
    }
}
