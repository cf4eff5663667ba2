//! Project entity model and DTOs.

use chrono::NaiveDate;
use helios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub firm_id: DbId,
    pub client_id: Option<DbId>,
    pub crew_id: Option<DbId>,
    pub name: String,
    pub site_address: Option<String>,
    pub status: String,
    pub equipment_expected_date: Option<NaiveDate>,
    pub equipment_arrived_date: Option<NaiveDate>,
    pub work_start_date: Option<NaiveDate>,
    pub work_end_date: Option<NaiveDate>,
    pub equipment_ordered: bool,
    pub equipment_notes: Option<String>,
    pub needs_call_equipment_delay: bool,
    pub needs_call_crew_delay: bool,
    pub needs_call_date_change: bool,
    pub invoice_id: Option<DbId>,
    pub invoice_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. Projects always start in `planning`
/// with no crew; assignment goes through the dedicated operation so a
/// snapshot is captured.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub firm_id: DbId,
    pub client_id: Option<DbId>,
    pub name: String,
    pub site_address: Option<String>,
}

/// DTO for the field-level partial update. All fields are optional; only
/// provided fields whose value actually differs are applied and ledgered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectFields {
    pub name: Option<String>,
    pub client_id: Option<DbId>,
    pub site_address: Option<String>,
    pub equipment_expected_date: Option<NaiveDate>,
    pub equipment_arrived_date: Option<NaiveDate>,
    pub work_start_date: Option<NaiveDate>,
    pub work_end_date: Option<NaiveDate>,
    pub equipment_ordered: Option<bool>,
    pub equipment_notes: Option<String>,
    pub needs_call_equipment_delay: Option<bool>,
    pub needs_call_crew_delay: Option<bool>,
    pub needs_call_date_change: Option<bool>,
    pub invoice_id: Option<DbId>,
    pub invoice_number: Option<String>,
}
