//! Route definitions for the `/projects` resource.
//!
//! Project-scoped snapshot routes are nested here; direct snapshot
//! lookup by id lives under `/snapshots`.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{project, snapshot};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}/status                   -> update_status
/// PATCH  /{id}/fields                   -> update_fields
/// PUT    /{id}/crew                     -> assign_crew
/// GET    /{id}/history                  -> history
///
/// GET    /{project_id}/snapshots        -> list_for_project
/// POST   /{project_id}/snapshots        -> create
/// GET    /{project_id}/snapshots/latest -> latest_for_project
/// ```
pub fn router() -> Router<AppState> {
    let snapshot_routes = Router::new()
        .route("/", get(snapshot::list_for_project).post(snapshot::create))
        .route("/latest", get(snapshot::latest_for_project));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id))
        .route("/{id}/status", put(project::update_status))
        .route("/{id}/fields", patch(project::update_fields))
        .route("/{id}/crew", put(project::assign_crew))
        .route("/{id}/history", get(project::history))
        .nest("/{project_id}/snapshots", snapshot_routes)
}
