pub mod crew;
pub mod health;
pub mod project;
pub mod reclamation;
pub mod snapshot;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                            list, create
/// /projects/{id}                       get
/// /projects/{id}/status                set status (PUT)
/// /projects/{id}/fields                patch mutable fields (PATCH)
/// /projects/{id}/crew                  assign crew (PUT)
/// /projects/{id}/history               project ledger (GET, ?order=)
/// /projects/{id}/snapshots             list, capture (GET, POST)
/// /projects/{id}/snapshots/latest      latest snapshot (GET)
///
/// /snapshots/{id}                      get snapshot (GET)
///
/// /crews                               list, create
/// /crews/{id}                          get with roster, update, hard delete
/// /crews/{id}/archive                  archive (POST)
/// /crews/{id}/history                  crew ledger (GET, ?order=)
/// /crews/{id}/members                  list, add (GET, POST)
/// /crews/{id}/reclamations             assigned/available queues (GET)
///
/// /members/{id}                        update (PUT)
/// /members/{id}/archive                archive (POST)
///
/// /reclamations                        list (?firm_id= | ?project_id=), create
/// /reclamations/{id}                   get
/// /reclamations/{id}/accept            accept (POST)
/// /reclamations/{id}/reject            reject (POST)
/// /reclamations/{id}/complete          complete (POST)
/// /reclamations/{id}/cancel            cancel (POST)
/// /reclamations/{id}/history           reclamation ledger (GET, ?order=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project routes (status workflow, field patches, crew assignment,
        // history, and project-scoped snapshots).
        .nest("/projects", project::router())
        // Direct snapshot lookup by snapshot id.
        .nest("/snapshots", snapshot::router())
        // Crew routes (roster management, archival, history, queues).
        .nest("/crews", crew::router())
        // Member routes addressed by member id.
        .nest("/members", crew::member_router())
        // Reclamation hand-off workflow.
        .nest("/reclamations", reclamation::router())
}
