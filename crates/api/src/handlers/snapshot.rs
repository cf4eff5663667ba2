//! Handlers for crew composition snapshots.
//!
//! Snapshots are read-only once written. The project-scoped routes list
//! and capture them; `/snapshots/{id}` resolves the `snapshot_id` links
//! found in ledger entries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use helios_core::error::CoreError;
use helios_core::types::DbId;
use helios_db::models::snapshot::{CreateSnapshot, ProjectCrewSnapshot};
use helios_db::repositories::SnapshotRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/snapshots
pub async fn list_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectCrewSnapshot>>>> {
    let snapshots = SnapshotRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: snapshots }))
}

/// POST /api/v1/projects/{project_id}/snapshots
///
/// Captures the crew's composition on demand without touching the
/// project's assignment or writing a ledger entry.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Actor(actor_id): Actor,
    Json(input): Json<CreateSnapshot>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectCrewSnapshot>>)> {
    let snapshot =
        SnapshotRepo::create_snapshot(&state.pool, project_id, input.crew_id, Some(actor_id))
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: snapshot })))
}

/// GET /api/v1/projects/{project_id}/snapshots/latest
pub async fn latest_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectCrewSnapshot>>> {
    let snapshot = SnapshotRepo::find_latest_for_project(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "snapshot",
            id: project_id,
        }))?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/snapshots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectCrewSnapshot>>> {
    let snapshot = SnapshotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "snapshot",
            id,
        }))?;
    Ok(Json(DataResponse { data: snapshot }))
}
