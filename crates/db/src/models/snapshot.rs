//! Crew snapshot entity model.
//!
//! There is no update DTO: snapshot rows are written once and never
//! touched again. The `document` column holds the serialized
//! `SnapshotDocument` from the core crate.

use helios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A snapshot row from the `project_crew_snapshots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectCrewSnapshot {
    pub id: DbId,
    pub project_id: DbId,
    /// Weak reference: the crew may no longer exist.
    pub crew_id: DbId,
    pub document: serde_json::Value,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for the explicit snapshot endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSnapshot {
    pub crew_id: DbId,
}
