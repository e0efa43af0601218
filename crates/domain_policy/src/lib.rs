//! Policy Records Domain
//!
//! Read-only view of the policies the console works against. The wizard never
//! edits a policy; it selects one as the target of a renewal or endorsement
//! request.
//!
//! # Contents
//!
//! - **Policy**: the record shown on the dashboard (reference, CR number, status)
//! - **Request vocabulary**: `RequestType`, `EndorsementAction`, `EndorsementReason`
//! - **PolicySource**: port supplying the ordered policy list, with a static
//!   catalog adapter seeded with the demo portfolio
//!
//! # Dashboard actions
//!
//! ```text
//! Active  -> Add / Update / Cancel Endorsement
//! Expired -> Renew Policy
//! Renewal, Pending -> (no actions)
//! ```

pub mod policy;
pub mod request;
pub mod endorsement;
pub mod catalog;
pub mod error;

pub use policy::{Policy, PolicyKey, PolicyStatus, RowAction};
pub use request::{RequestType, EndorsementAction};
pub use endorsement::EndorsementReason;
pub use catalog::{PolicySource, StaticPolicyCatalog};
pub use error::PolicyError;
