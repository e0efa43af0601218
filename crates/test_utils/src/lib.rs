//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! policy request console test suite.
//!
//! # Modules
//!
//! - `fixtures`: Demo policies, settings and ready-made patches
//! - `builders`: Wizard session builder and a scripted assistant double
//! - `assertions`: Assertion helpers for wizard views
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
