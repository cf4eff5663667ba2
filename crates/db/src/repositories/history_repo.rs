//! Append-only ledger repositories.
//!
//! One repository per ledger table, each exposing `append` and `list_for`
//! and nothing else: no update or delete method exists on purpose.
//! `append` is generic over the executor so workflow methods can pass
//! their open transaction and make the ledger write atomic with the
//! mutation it records.

use helios_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::history::{
    CrewHistoryEntry, NewCrewHistoryEntry, NewProjectHistoryEntry, NewReclamationHistoryEntry,
    ProjectHistoryEntry, ReclamationHistoryEntry, SortOrder,
};

// ── Project history ─────────────────────────────────────────────────

const PROJECT_COLUMNS: &str = "id, project_id, actor_id, change_type, field, old_value, \
     new_value, description, snapshot_id, created_at";

/// Ledger of project changes.
pub struct ProjectHistoryRepo;

impl ProjectHistoryRepo {
    /// Append one entry, returning the inserted row.
    pub async fn append<'e, E>(
        executor: E,
        entry: &NewProjectHistoryEntry,
    ) -> Result<ProjectHistoryEntry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO project_history
                (project_id, actor_id, change_type, field, old_value, new_value,
                 description, snapshot_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectHistoryEntry>(&query)
            .bind(entry.project_id)
            .bind(entry.actor_id)
            .bind(entry.change_type)
            .bind(&entry.field)
            .bind(&entry.old_value)
            .bind(&entry.new_value)
            .bind(&entry.description)
            .bind(entry.snapshot_id)
            .fetch_one(executor)
            .await
    }

    /// List a project's entries in the requested order.
    pub async fn list_for(
        pool: &PgPool,
        project_id: DbId,
        order: SortOrder,
    ) -> Result<Vec<ProjectHistoryEntry>, sqlx::Error> {
        let dir = order.as_sql();
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM project_history
             WHERE project_id = $1
             ORDER BY created_at {dir}, id {dir}"
        );
        sqlx::query_as::<_, ProjectHistoryEntry>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}

// ── Crew history ────────────────────────────────────────────────────

const CREW_COLUMNS: &str = "id, crew_id, actor_id, change_type, field, old_value, \
     new_value, description, snapshot_id, created_at";

/// Ledger of crew and roster changes.
pub struct CrewHistoryRepo;

impl CrewHistoryRepo {
    /// Append one entry, returning the inserted row.
    pub async fn append<'e, E>(
        executor: E,
        entry: &NewCrewHistoryEntry,
    ) -> Result<CrewHistoryEntry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO crew_history
                (crew_id, actor_id, change_type, field, old_value, new_value, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CREW_COLUMNS}"
        );
        sqlx::query_as::<_, CrewHistoryEntry>(&query)
            .bind(entry.crew_id)
            .bind(entry.actor_id)
            .bind(entry.change_type)
            .bind(&entry.field)
            .bind(&entry.old_value)
            .bind(&entry.new_value)
            .bind(&entry.description)
            .fetch_one(executor)
            .await
    }

    /// List a crew's entries in the requested order.
    pub async fn list_for(
        pool: &PgPool,
        crew_id: DbId,
        order: SortOrder,
    ) -> Result<Vec<CrewHistoryEntry>, sqlx::Error> {
        let dir = order.as_sql();
        let query = format!(
            "SELECT {CREW_COLUMNS} FROM crew_history
             WHERE crew_id = $1
             ORDER BY created_at {dir}, id {dir}"
        );
        sqlx::query_as::<_, CrewHistoryEntry>(&query)
            .bind(crew_id)
            .fetch_all(pool)
            .await
    }
}

// ── Reclamation history ─────────────────────────────────────────────

const RECLAMATION_COLUMNS: &str =
    "id, reclamation_id, action, member_id, crew_id, reason, notes, created_at";

/// Ledger of reclamation workflow actions.
pub struct ReclamationHistoryRepo;

impl ReclamationHistoryRepo {
    /// Append one entry, returning the inserted row.
    pub async fn append<'e, E>(
        executor: E,
        entry: &NewReclamationHistoryEntry,
    ) -> Result<ReclamationHistoryEntry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO reclamation_history
                (reclamation_id, action, member_id, crew_id, reason, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RECLAMATION_COLUMNS}"
        );
        sqlx::query_as::<_, ReclamationHistoryEntry>(&query)
            .bind(entry.reclamation_id)
            .bind(entry.action)
            .bind(entry.member_id)
            .bind(entry.crew_id)
            .bind(&entry.reason)
            .bind(&entry.notes)
            .fetch_one(executor)
            .await
    }

    /// List a reclamation's entries in the requested order.
    pub async fn list_for(
        pool: &PgPool,
        reclamation_id: DbId,
        order: SortOrder,
    ) -> Result<Vec<ReclamationHistoryEntry>, sqlx::Error> {
        let dir = order.as_sql();
        let query = format!(
            "SELECT {RECLAMATION_COLUMNS} FROM reclamation_history
             WHERE reclamation_id = $1
             ORDER BY created_at {dir}, id {dir}"
        );
        sqlx::query_as::<_, ReclamationHistoryEntry>(&query)
            .bind(reclamation_id)
            .fetch_all(pool)
            .await
    }
}
