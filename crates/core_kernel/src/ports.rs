//! Ports and Adapters Infrastructure
//!
//! The wizard talks to two collaborators it does not own: the policy source
//! feeding the dashboard and the text-generation service behind the
//! "AI assistance" buttons. Each is modelled as a port trait in its domain
//! crate; adapters implement the trait.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Wizard Controller                │
//! └──────────────────────────────────────────────┘
//!                 │                  │
//!                 ▼                  ▼
//!        ┌────────────────┐  ┌────────────────┐
//!        │  PolicySource  │  │ AssistantPort  │
//!        └────────────────┘  └────────────────┘
//!                 ▲                  ▲
//!        ┌────────────────┐  ┌────────────────┐
//!        │ Static catalog │  │ TextBackend +  │
//!        │                │  │ fallback text  │
//!        └────────────────┘  └────────────────┘
//! ```
//!
//! `PortError` is what a fallible adapter reports. Ports that must fail open
//! (the assistant) absorb it before it reaches the wizard.

use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The adapter has no credentials or endpoint configured
    #[error("Not configured: {service}")]
    NotConfigured {
        service: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },
}

impl PortError {
    /// Creates a NotConfigured error
    pub fn not_configured(service: impl Into<String>) -> Self {
        PortError::NotConfigured {
            service: service.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        PortError::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. } | PortError::Timeout { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared between the controller and the HTTP layer, so they must
/// be thread-safe and usable across `.await` points.
pub trait DomainPort: Send + Sync + 'static {}
