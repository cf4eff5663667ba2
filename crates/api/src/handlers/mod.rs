//! Request handlers for the workflow engine's resources.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `helios_db` and map
//! errors via [`AppError`]; every mutating handler extracts the acting user
//! from the `x-actor-id` header via [`Actor`].
//!
//! [`AppError`]: crate::error::AppError
//! [`Actor`]: crate::extract::Actor

pub mod crew;
pub mod member;
pub mod project;
pub mod reclamation;
pub mod snapshot;
