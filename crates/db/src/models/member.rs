//! Crew member entity model and DTOs.

use helios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A member row from the `crew_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CrewMember {
    pub id: DbId,
    pub crew_id: DbId,
    pub role: String,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a member to a crew.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCrewMember {
    /// Defaults to `worker` if omitted.
    pub role: Option<String>,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// DTO for updating a member. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCrewMember {
    pub role: Option<String>,
    pub employee_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
