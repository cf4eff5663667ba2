//! Point-in-time crew composition documents.
//!
//! A snapshot document is the JSON payload stored alongside a project when a
//! crew is assigned. It embeds flattened copies of the crew and its active
//! members with no references back to live roster rows, so later roster
//! edits, archival, or deletion cannot alter what the project looked like at
//! assignment time. Statuses and roles are carried as raw strings: a
//! document written years ago must still deserialize even if the current
//! vocabulary has moved on.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Flattened copy of the crew row at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCrew {
    pub crew_id: DbId,
    pub firm_id: DbId,
    pub name: String,
    pub color: String,
    pub status: String,
}

/// Flattened copy of one active crew member at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMember {
    pub member_id: DbId,
    pub role: String,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// The full document persisted in the snapshot's JSONB column.
///
/// Written once, never patched; a correction is a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub crew: SnapshotCrew,
    pub members: Vec<SnapshotMember>,
}

impl SnapshotDocument {
    pub fn new(crew: SnapshotCrew, members: Vec<SnapshotMember>) -> Self {
        Self { crew, members }
    }
}
