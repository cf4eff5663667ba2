//! Handlers for crew members.
//!
//! Members are created and listed through their crew
//! (`/crews/{crew_id}/members`) and addressed directly once they exist
//! (`/members/{id}`). Adding and archiving a member is ledgered on the
//! crew's history; profile edits are not.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use helios_core::types::DbId;
use helios_db::models::member::{CreateCrewMember, CrewMember, UpdateCrewMember};
use helios_db::repositories::CrewMemberRepo;

use crate::error::AppResult;
use crate::extract::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/crews/{crew_id}/members
pub async fn create(
    State(state): State<AppState>,
    Path(crew_id): Path<DbId>,
    Actor(actor_id): Actor,
    Json(input): Json<CreateCrewMember>,
) -> AppResult<(StatusCode, Json<DataResponse<CrewMember>>)> {
    let member = CrewMemberRepo::create(&state.pool, crew_id, &input, Some(actor_id)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// GET /api/v1/crews/{crew_id}/members
pub async fn list_for_crew(
    State(state): State<AppState>,
    Path(crew_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CrewMember>>>> {
    let members = CrewMemberRepo::list_for_crew(&state.pool, crew_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// PUT /api/v1/members/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(_actor): Actor,
    Json(input): Json<UpdateCrewMember>,
) -> AppResult<Json<DataResponse<CrewMember>>> {
    let member = CrewMemberRepo::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/members/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(actor_id): Actor,
) -> AppResult<Json<DataResponse<CrewMember>>> {
    let member = CrewMemberRepo::archive(&state.pool, id, Some(actor_id)).await?;
    Ok(Json(DataResponse { data: member }))
}
