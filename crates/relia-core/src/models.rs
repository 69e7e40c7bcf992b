//! Domain models for the Relia webservice module.
//!
//! These are the core types shared across all crates.

pub mod collector;
pub mod contact;
pub mod context;
pub mod session;
pub mod user;
