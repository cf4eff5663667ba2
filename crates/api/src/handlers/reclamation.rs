//! Handlers for the `/reclamations` resource.
//!
//! Every workflow action goes through its own endpoint so the repository
//! can enforce the state machine; a successful transition also fires the
//! webhook notifier, which never affects the response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use helios_core::error::CoreError;
use helios_core::types::DbId;
use helios_db::models::history::ReclamationHistoryEntry;
use helios_db::models::reclamation::{CreateReclamation, CrewReclamations, Reclamation};
use helios_db::repositories::{ReclamationHistoryRepo, ReclamationRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Actor;
use crate::query::SortParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ── CRUD ────────────────────────────────────────────────────────────

/// POST /api/v1/reclamations
pub async fn create(
    State(state): State<AppState>,
    Actor(actor_id): Actor,
    Json(input): Json<CreateReclamation>,
) -> AppResult<(StatusCode, Json<DataResponse<Reclamation>>)> {
    let reclamation = ReclamationRepo::create(&state.pool, &input, Some(actor_id)).await?;
    state.notifier.reclamation_changed(&reclamation, "created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: reclamation })))
}

/// Query parameters for the reclamation listing.
#[derive(Debug, Deserialize)]
pub struct ListReclamationsParams {
    pub firm_id: Option<DbId>,
    pub project_id: Option<DbId>,
}

/// GET /api/v1/reclamations?firm_id= | ?project_id=
///
/// Exactly one filter must be provided; an unscoped listing across firms
/// is not offered.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListReclamationsParams>,
) -> AppResult<Json<DataResponse<Vec<Reclamation>>>> {
    let reclamations = match (params.firm_id, params.project_id) {
        (Some(firm_id), None) => ReclamationRepo::list_for_firm(&state.pool, firm_id).await?,
        (None, Some(project_id)) => {
            ReclamationRepo::list_for_project(&state.pool, project_id).await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of firm_id or project_id".to_string(),
            ))
        }
    };
    Ok(Json(DataResponse { data: reclamations }))
}

/// GET /api/v1/reclamations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Reclamation>>> {
    let reclamation = ReclamationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "reclamation",
            id,
        }))?;
    Ok(Json(DataResponse { data: reclamation }))
}

// ── Workflow actions ────────────────────────────────────────────────

/// Request body for the accept endpoint.
#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub member_id: DbId,
}

/// POST /api/v1/reclamations/{id}/accept
///
/// A member of the owning crew accepts pending work; after a rejection,
/// a member of any other crew in the firm volunteers and ownership moves
/// to their crew.
pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(_actor): Actor,
    Json(body): Json<AcceptRequest>,
) -> AppResult<Json<DataResponse<Reclamation>>> {
    let reclamation = ReclamationRepo::accept(&state.pool, id, body.member_id).await?;
    state.notifier.reclamation_changed(&reclamation, "accepted");
    Ok(Json(DataResponse { data: reclamation }))
}

/// Request body for the reject endpoint.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub member_id: DbId,
    pub reason: String,
}

/// POST /api/v1/reclamations/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(_actor): Actor,
    Json(body): Json<RejectRequest>,
) -> AppResult<Json<DataResponse<Reclamation>>> {
    let reclamation = ReclamationRepo::reject(&state.pool, id, body.member_id, &body.reason).await?;
    state.notifier.reclamation_changed(&reclamation, "rejected");
    Ok(Json(DataResponse { data: reclamation }))
}

/// Request body for the complete endpoint.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub notes: Option<String>,
}

/// POST /api/v1/reclamations/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(_actor): Actor,
    Json(body): Json<CompleteRequest>,
) -> AppResult<Json<DataResponse<Reclamation>>> {
    let reclamation = ReclamationRepo::complete(&state.pool, id, body.notes).await?;
    state.notifier.reclamation_changed(&reclamation, "completed");
    Ok(Json(DataResponse { data: reclamation }))
}

/// POST /api/v1/reclamations/{id}/cancel
///
/// Administrative override; legal from any state except `cancelled`.
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Actor(_actor): Actor,
) -> AppResult<Json<DataResponse<Reclamation>>> {
    let reclamation = ReclamationRepo::cancel(&state.pool, id).await?;
    state.notifier.reclamation_changed(&reclamation, "cancelled");
    Ok(Json(DataResponse { data: reclamation }))
}

// ── History & queues ────────────────────────────────────────────────

/// GET /api/v1/reclamations/{id}/history?order=
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<SortParams>,
) -> AppResult<Json<DataResponse<Vec<ReclamationHistoryEntry>>>> {
    let entries = ReclamationHistoryRepo::list_for(&state.pool, id, params.order).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/crews/{crew_id}/reclamations
///
/// The crew's work queue: reclamations it currently owns plus ones other
/// crews of the firm rejected and it may volunteer for.
pub async fn list_for_crew(
    State(state): State<AppState>,
    Path(crew_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CrewReclamations>>> {
    let queues = ReclamationRepo::list_for_crew(&state.pool, crew_id).await?;
    Ok(Json(DataResponse { data: queues }))
}
