//! Request and response bodies

pub mod policy;
pub mod wizard;
