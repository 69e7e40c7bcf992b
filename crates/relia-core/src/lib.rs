//! Relia Core — domain models, error taxonomy, and store trait
//! definitions shared across the webservice crates.

pub mod error;
pub mod models;
pub mod store;
