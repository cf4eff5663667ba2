//! Response envelope for API handlers.
//!
//! Every endpoint wraps its payload in `{ "data": ... }`; typed handlers
//! return [`DataResponse`] rather than building the envelope with
//! `serde_json::json!` so the payload type stays visible in signatures.

use serde::Serialize;

/// The `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: project }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
