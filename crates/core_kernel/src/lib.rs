//! Core Kernel - Foundational types for the policy request console
//!
//! This crate provides the building blocks shared by the domain and adapter crates:
//! - Strongly-typed identifiers for wizard entities
//! - Money types with precise decimal arithmetic for quotation figures
//! - Port errors reported by external collaborators (text generation, policy source)

pub mod money;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, Rate};
pub use identifiers::{PropertyId, SessionId};
pub use ports::PortError;
pub use error::CoreError;
