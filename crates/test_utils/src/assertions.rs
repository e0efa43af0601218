//! Custom Test Assertions
//!
//! Assertion helpers for wizard state that print the whole view on failure.

use domain_wizard::{SubmissionStatus, WizardController, WizardError, WizardStep, WizardView};

/// Asserts that the review screen is shown with the given status and non-empty text
///
/// # Panics
///
/// Panics if the controller is not on the quotation view, the status differs
/// or the quotation text is blank
pub fn assert_quotation_shown(controller: &WizardController, expected: SubmissionStatus) {
    match controller.view() {
        WizardView::Quotation(screen) => {
            assert_eq!(
                screen.status, expected,
                "Unexpected review status, screen: {:?}",
                screen
            );
            assert!(
                !screen.details.trim().is_empty(),
                "Quotation text is blank"
            );
        }
        other => panic!("Expected the quotation view, got {:?}", other),
    }
}

/// Asserts that the form view is shown on the given step
pub fn assert_form_at(controller: &WizardController, step: WizardStep) {
    assert!(
        matches!(controller.view(), WizardView::Form),
        "Expected the form view, got {:?}",
        controller.view()
    );
    assert_eq!(controller.step(), step, "Unexpected wizard step");
}

/// Asserts that an advance was blocked on the given step
pub fn assert_advance_blocked<T: std::fmt::Debug>(result: Result<T, WizardError>, step: WizardStep) {
    match result {
        Err(WizardError::AdvanceBlocked { step: actual, .. }) => {
            assert_eq!(actual, step, "Advance blocked on the wrong step");
        }
        other => panic!("Expected AdvanceBlocked on step {}, got {:?}", step.number(), other),
    }
}
