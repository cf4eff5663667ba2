//! Reclamation entity model and DTOs.

use chrono::NaiveDate;
use helios_core::error::CoreError;
use helios_core::reclamation::ReclamationStatus;
use helios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reclamation row from the `reclamations` table.
///
/// `original_crew_id` never changes after creation; `current_crew_id`
/// moves on hand-off. Both are weak references that survive crew deletion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reclamation {
    pub id: DbId,
    pub project_id: DbId,
    pub firm_id: DbId,
    pub description: String,
    pub deadline: NaiveDate,
    pub status: String,
    pub original_crew_id: DbId,
    pub current_crew_id: DbId,
    pub accepted_by_member_id: Option<DbId>,
    pub accepted_at: Option<Timestamp>,
    pub rejected_by_member_id: Option<DbId>,
    pub rejected_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub completion_notes: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Reclamation {
    /// Parse the stored status column. The CHECK constraint keeps the
    /// column within the vocabulary, so a parse failure means the row is
    /// corrupt and surfaces as an internal error, not a validation one.
    pub fn workflow_status(&self) -> Result<ReclamationStatus, CoreError> {
        self.status
            .parse()
            .map_err(|_| CoreError::Internal(format!("Corrupt reclamation status: {}", self.status)))
    }
}

/// DTO for creating a reclamation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReclamation {
    pub project_id: DbId,
    pub firm_id: DbId,
    pub description: String,
    pub deadline: NaiveDate,
    /// Seeds both `original_crew_id` and `current_crew_id`.
    pub crew_id: DbId,
}

/// The assigned/available split returned for a crew's work queue.
///
/// `assigned` holds reclamations the crew currently owns (pending or
/// accepted); `available` holds reclamations other crews of the same firm
/// rejected and this crew may volunteer for.
#[derive(Debug, Clone, Serialize)]
pub struct CrewReclamations {
    pub assigned: Vec<Reclamation>,
    pub available: Vec<Reclamation>,
}
