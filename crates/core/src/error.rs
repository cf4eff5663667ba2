use crate::types::DbId;

/// Domain-level error taxonomy shared by the repository and API layers.
///
/// Persistence failures are not represented here: they surface as
/// `sqlx::Error` from the db crate and are classified at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
