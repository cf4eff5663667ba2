//! Actor identity extractor for Axum handlers.
//!
//! Authentication lives in front of this service; the upstream identity
//! provider forwards the acting user's id in the `x-actor-id` header. Every
//! mutating endpoint extracts it so ledger entries carry attribution.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use helios_core::types::DbId;

use crate::error::AppError;

/// The acting user, taken from the `x-actor-id` request header.
///
/// Use as an extractor parameter in any handler that mutates state:
///
/// ```ignore
/// async fn my_handler(Actor(actor_id): Actor) -> AppResult<Json<()>> {
///     tracing::info!(actor_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// A missing or malformed header rejects the request with a 400.
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub DbId);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("Missing x-actor-id header".into()))?;

        let actor_id: DbId = raw
            .parse()
            .map_err(|_| AppError::BadRequest("x-actor-id must be a numeric id".into()))?;

        Ok(Actor(actor_id))
    }
}
