//! Domain core for the Helios field-service platform.
//!
//! This crate has no database or HTTP dependencies so the workflow rules
//! (status vocabularies, transition guards, ledger classification) can be
//! used by the repository layer, the API, and any future CLI tooling.

pub mod error;
pub mod history;
pub mod reclamation;
pub mod snapshot;
pub mod status;
pub mod types;
