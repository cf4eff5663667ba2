//! Crew entity model and DTOs.

use helios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::member::CrewMember;

/// A crew row from the `crews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Crew {
    pub id: DbId,
    pub firm_id: DbId,
    pub name: String,
    pub color: String,
    pub status: String,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A crew together with its active members, for detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct CrewWithMembers {
    #[serde(flatten)]
    pub crew: Crew,
    pub members: Vec<CrewMember>,
}

/// DTO for creating a new crew.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCrew {
    pub firm_id: DbId,
    pub name: String,
    /// Defaults to the schema default color if omitted.
    pub color: Option<String>,
}

/// DTO for updating a crew. All fields are optional; a provided `status`
/// must be a known crew status and is ledgered when it changes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCrew {
    pub name: Option<String>,
    pub color: Option<String>,
    pub status: Option<String>,
}
