//! Ledger entry models for the three append-only histories.
//!
//! The project and crew ledgers are structurally identical; the
//! reclamation ledger records workflow actions instead of field diffs.
//! None of these types has an update DTO — rows are inserted and read,
//! never modified.

use helios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ── Read ordering ───────────────────────────────────────────────────

/// Ledger read order; `created_at` with `id` as the insertion tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first, the display default.
    #[default]
    Desc,
}

impl SortOrder {
    /// The SQL direction keyword. Interpolated into queries, never bound.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// ── Project history ─────────────────────────────────────────────────

/// A row from the `project_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectHistoryEntry {
    pub id: DbId,
    pub project_id: DbId,
    /// `None` marks a system-generated entry.
    pub actor_id: Option<DbId>,
    pub change_type: String,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: String,
    pub snapshot_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Insert struct for a project history entry.
#[derive(Debug, Clone)]
pub struct NewProjectHistoryEntry {
    pub project_id: DbId,
    pub actor_id: Option<DbId>,
    pub change_type: &'static str,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: String,
    pub snapshot_id: Option<DbId>,
}

// ── Crew history ────────────────────────────────────────────────────

/// A row from the `crew_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CrewHistoryEntry {
    pub id: DbId,
    pub crew_id: DbId,
    pub actor_id: Option<DbId>,
    pub change_type: String,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: String,
    pub snapshot_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Insert struct for a crew history entry.
#[derive(Debug, Clone)]
pub struct NewCrewHistoryEntry {
    pub crew_id: DbId,
    pub actor_id: Option<DbId>,
    pub change_type: &'static str,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: String,
}

// ── Reclamation history ─────────────────────────────────────────────

/// A row from the `reclamation_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReclamationHistoryEntry {
    pub id: DbId,
    pub reclamation_id: DbId,
    pub action: String,
    pub member_id: Option<DbId>,
    /// The crew organizationally responsible at the time of the action.
    pub crew_id: Option<DbId>,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Insert struct for a reclamation history entry.
#[derive(Debug, Clone)]
pub struct NewReclamationHistoryEntry {
    pub reclamation_id: DbId,
    pub action: &'static str,
    pub member_id: Option<DbId>,
    pub crew_id: Option<DbId>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}
