//! Handlers for the `/crews` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use helios_core::error::CoreError;
use helios_core::types::DbId;
use helios_db::models::crew::{CreateCrew, Crew, CrewWithMembers, UpdateCrew};
use helios_db::models::history::CrewHistoryEntry;
use helios_db::repositories::{CrewHistoryRepo, CrewRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Actor;
use crate::query::SortParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/crews
pub async fn create(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Json(input): Json<CreateCrew>,
) -> AppResult<(StatusCode, Json<DataResponse<Crew>>)> {
    let crew = CrewRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: crew })))
}

/// Query parameters for the crew listing.
#[derive(Debug, Deserialize)]
pub struct ListCrewsParams {
    pub firm_id: Option<DbId>,
    /// Archived crews are hidden unless explicitly requested.
    #[serde(default)]
    pub include_archived: bool,
}

/// GET /api/v1/crews?firm_id=&include_archived=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListCrewsParams>,
) -> AppResult<Json<DataResponse<Vec<Crew>>>> {
    let crews = CrewRepo::list(&state.pool, params.firm_id, params.include_archived).await?;
    Ok(Json(DataResponse { data: crews }))
}

/// GET /api/v1/crews/{id}
///
/// Returns the crew together with its active roster. Archived crews stay
/// readable here for forensic lookups.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CrewWithMembers>>> {
    let crew = CrewRepo::find_with_members(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "crew", id }))?;
    Ok(Json(DataResponse { data: crew }))
}

/// PUT /api/v1/crews/{id}
///
/// Status changes are ledgered; name and color edits are not.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(actor_id): Actor,
    Json(input): Json<UpdateCrew>,
) -> AppResult<Json<DataResponse<Crew>>> {
    let crew = CrewRepo::update(&state.pool, id, &input, Some(actor_id)).await?;
    Ok(Json(DataResponse { data: crew }))
}

/// POST /api/v1/crews/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(actor_id): Actor,
) -> AppResult<Json<DataResponse<Crew>>> {
    let crew = CrewRepo::archive(&state.pool, id, Some(actor_id)).await?;
    Ok(Json(DataResponse { data: crew }))
}

/// DELETE /api/v1/crews/{id}
///
/// Hard delete; requires the crew to be archived first.
pub async fn hard_delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(_actor): Actor,
) -> AppResult<StatusCode> {
    CrewRepo::hard_delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/crews/{id}/history?order=
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<SortParams>,
) -> AppResult<Json<DataResponse<Vec<CrewHistoryEntry>>>> {
    let entries = CrewHistoryRepo::list_for(&state.pool, id, params.order).await?;
    Ok(Json(DataResponse { data: entries }))
}
