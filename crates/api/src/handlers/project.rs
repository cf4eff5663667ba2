//! Handlers for the `/projects` resource.
//!
//! Projects expose their workflow through dedicated sub-resources
//! (`/status`, `/fields`, `/crew`) instead of a single blanket update, so
//! each operation can enforce its own ledger semantics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use helios_core::error::CoreError;
use helios_core::status::ProjectStatus;
use helios_core::types::DbId;
use helios_db::models::history::ProjectHistoryEntry;
use helios_db::models::project::{CreateProject, Project, UpdateProjectFields};
use helios_db::repositories::{ProjectHistoryRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Actor;
use crate::query::SortParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ── CRUD & workflow ─────────────────────────────────────────────────

/// POST /api/v1/projects
///
/// Creation is not a ledgered change; the project starts in `planning`
/// with an empty history.
pub async fn create(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// Query parameters for the project listing.
#[derive(Debug, Deserialize)]
pub struct ListProjectsParams {
    pub firm_id: Option<DbId>,
}

/// GET /api/v1/projects?firm_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListProjectsParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, params.firm_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// Request body for the status endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/v1/projects/{id}/status
///
/// Any status-to-status jump is accepted; an unknown status name is a
/// validation error and setting the current status again is a no-op.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(actor_id): Actor,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let status = body.status.parse::<ProjectStatus>()?;
    let project = ProjectRepo::update_status(&state.pool, id, status, Some(actor_id)).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/v1/projects/{id}/fields
pub async fn update_fields(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(actor_id): Actor,
    Json(input): Json<UpdateProjectFields>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::update_fields(&state.pool, id, &input, Some(actor_id)).await?;
    Ok(Json(DataResponse { data: project }))
}

/// Request body for the crew assignment endpoint.
#[derive(Debug, Deserialize)]
pub struct AssignCrewRequest {
    pub crew_id: DbId,
}

/// PUT /api/v1/projects/{id}/crew
///
/// Assignment captures a composition snapshot in the same transaction;
/// reassignment runs the same path and produces a fresh snapshot.
pub async fn assign_crew(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(actor_id): Actor,
    Json(body): Json<AssignCrewRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::assign_crew(&state.pool, id, body.crew_id, Some(actor_id)).await?;
    Ok(Json(DataResponse { data: project }))
}

// ── History ─────────────────────────────────────────────────────────

/// GET /api/v1/projects/{id}/history?order=
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<SortParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectHistoryEntry>>>> {
    let entries = ProjectHistoryRepo::list_for(&state.pool, id, params.order).await?;
    Ok(Json(DataResponse { data: entries }))
}
