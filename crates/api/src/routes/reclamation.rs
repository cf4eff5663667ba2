//! Route definitions for the `/reclamations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reclamation;
use crate::state::AppState;

/// Routes mounted at `/reclamations`.
///
/// ```text
/// GET  /                 -> list (?firm_id= | ?project_id=)
/// POST /                 -> create
/// GET  /{id}             -> get_by_id
/// POST /{id}/accept      -> accept
/// POST /{id}/reject      -> reject
/// POST /{id}/complete    -> complete
/// POST /{id}/cancel      -> cancel
/// GET  /{id}/history     -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reclamation::list).post(reclamation::create))
        .route("/{id}", get(reclamation::get_by_id))
        .route("/{id}/accept", post(reclamation::accept))
        .route("/{id}/reject", post(reclamation::reject))
        .route("/{id}/complete", post(reclamation::complete))
        .route("/{id}/cancel", post(reclamation::cancel))
        .route("/{id}/history", get(reclamation::history))
}
