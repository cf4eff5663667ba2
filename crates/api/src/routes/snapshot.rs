//! Route definitions for the `/snapshots` resource.
//!
//! Only direct lookup lives here; snapshots are created and listed
//! through their project.

use axum::routing::get;
use axum::Router;

use crate::handlers::snapshot;
use crate::state::AppState;

/// Routes mounted at `/snapshots`.
///
/// ```text
/// GET /{id} -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(snapshot::get_by_id))
}
