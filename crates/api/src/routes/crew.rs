//! Route definitions for the `/crews` and `/members` resources.
//!
//! Members are created and listed through their crew, then updated and
//! archived through `/members/{id}` once they exist.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{crew, member, reclamation};
use crate::state::AppState;

/// Routes mounted at `/crews`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> hard_delete
/// POST   /{id}/archive              -> archive
/// GET    /{id}/history              -> history
///
/// GET    /{crew_id}/members         -> member::list_for_crew
/// POST   /{crew_id}/members         -> member::create
/// GET    /{crew_id}/reclamations    -> reclamation::list_for_crew
/// ```
pub fn router() -> Router<AppState> {
    let member_routes = Router::new().route("/", get(member::list_for_crew).post(member::create));

    let queue_routes = Router::new().route("/", get(reclamation::list_for_crew));

    Router::new()
        .route("/", get(crew::list).post(crew::create))
        .route(
            "/{id}",
            get(crew::get_by_id)
                .put(crew::update)
                .delete(crew::hard_delete),
        )
        .route("/{id}/archive", post(crew::archive))
        .route("/{id}/history", get(crew::history))
        .nest("/{crew_id}/members", member_routes)
        .nest("/{crew_id}/reclamations", queue_routes)
}

/// Routes mounted at `/members`.
///
/// ```text
/// PUT  /{id}          -> update
/// POST /{id}/archive  -> archive
/// ```
pub fn member_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(member::update))
        .route("/{id}/archive", post(member::archive))
}
