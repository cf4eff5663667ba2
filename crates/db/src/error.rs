//! Error type for repository operations that combine domain guards with
//! database access.
//!
//! Plain CRUD methods return `sqlx::Error` directly. Workflow methods run
//! domain guards inside their transaction, so either side can fail; both
//! convert with `?` and the API layer maps each to its HTTP class.

use helios_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Domain(#[from] CoreError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}
