//! Repository for the `crews` table.
//!
//! Archival is the soft form of removal: archived crews stay readable
//! (their history and snapshots still matter) but reject roster edits and
//! new assignments. Hard delete is restricted to already-archived crews
//! and cascades members; snapshot and reclamation references survive as
//! weak IDs.

use std::str::FromStr;

use helios_core::error::CoreError;
use helios_core::history::{change_types, describe_status_change};
use helios_core::status::CrewStatus;
use helios_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::WorkflowError;
use crate::models::crew::{CreateCrew, Crew, CrewWithMembers, UpdateCrew};
use crate::models::history::NewCrewHistoryEntry;
use crate::models::member::CrewMember;
use crate::repositories::CrewHistoryRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, firm_id, name, color, status, archived_at, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, crew_id, role, employee_number, first_name, last_name, \
     phone, email, archived_at, created_at, updated_at";

/// Provides CRUD and archival operations for crews.
pub struct CrewRepo;

impl CrewRepo {
    /// Insert a new crew, returning the created row.
    ///
    /// If `color` is `None` in the input, the schema default applies.
    pub async fn create(pool: &PgPool, input: &CreateCrew) -> Result<Crew, sqlx::Error> {
        let query = format!(
            "INSERT INTO crews (firm_id, name, color)
             VALUES ($1, $2, COALESCE($3, '#6b7280'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Crew>(&query)
            .bind(input.firm_id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a crew by its internal ID, archived or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Crew>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crews WHERE id = $1");
        sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a crew together with its active members.
    pub async fn find_with_members(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CrewWithMembers>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crews WHERE id = $1");
        let crew = match sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        {
            Some(crew) => crew,
            None => return Ok(None),
        };

        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM crew_members
             WHERE crew_id = $1 AND archived_at IS NULL
             ORDER BY last_name, first_name"
        );
        let members = sqlx::query_as::<_, CrewMember>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(CrewWithMembers { crew, members }))
    }

    /// List crews by name, optionally scoped to a firm. Archived crews are
    /// excluded unless requested.
    pub async fn list(
        pool: &PgPool,
        firm_id: Option<DbId>,
        include_archived: bool,
    ) -> Result<Vec<Crew>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM crews
             WHERE ($1::BIGINT IS NULL OR firm_id = $1)
               AND ($2 OR archived_at IS NULL)
             ORDER BY name"
        );
        sqlx::query_as::<_, Crew>(&query)
            .bind(firm_id)
            .bind(include_archived)
            .fetch_all(pool)
            .await
    }

    /// Update a crew's display attributes and status.
    ///
    /// Only non-`None` fields are applied. A status change appends a
    /// `status_change` crew ledger entry in the same transaction; setting
    /// the current status again writes nothing.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCrew,
        actor_id: Option<DbId>,
    ) -> Result<Crew, WorkflowError> {
        let new_status = input
            .status
            .as_deref()
            .map(CrewStatus::from_str)
            .transpose()?;

        let mut tx = pool.begin().await?;
        let current = Self::lock_active(&mut tx, id).await?;

        let query = format!(
            "UPDATE crews SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                status = COALESCE($4, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(new_status.map(CrewStatus::as_str))
            .fetch_one(&mut *tx)
            .await?;

        if let Some(status) = new_status {
            if status.as_str() != current.status {
                CrewHistoryRepo::append(
                    &mut *tx,
                    &NewCrewHistoryEntry {
                        crew_id: id,
                        actor_id,
                        change_type: change_types::STATUS_CHANGE,
                        field: Some("status".to_string()),
                        old_value: Some(current.status.clone()),
                        new_value: Some(status.as_str().to_string()),
                        description: describe_status_change(&current.status, status.as_str()),
                    },
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Archive a crew, appending an `archived` ledger entry.
    ///
    /// Archived crews reject further roster operations; their members stay
    /// in place for historical reads.
    pub async fn archive(
        pool: &PgPool,
        id: DbId,
        actor_id: Option<DbId>,
    ) -> Result<Crew, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock_active(&mut tx, id).await?;

        let query = format!("UPDATE crews SET archived_at = NOW() WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        CrewHistoryRepo::append(
            &mut *tx,
            &NewCrewHistoryEntry {
                crew_id: id,
                actor_id,
                change_type: change_types::ARCHIVED,
                field: None,
                old_value: None,
                new_value: None,
                description: format!("Crew {} archived", current.name),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Permanently delete an archived crew.
    ///
    /// Members and the crew ledger go with it (schema cascade); snapshots
    /// and reclamations keep their weak crew IDs. Deleting a crew that is
    /// not archived is a conflict.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<(), WorkflowError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM crews WHERE id = $1 FOR UPDATE");
        let crew = sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "crew",
                id,
            })?;

        if crew.archived_at.is_none() {
            return Err(
                CoreError::Conflict("Crew must be archived before deletion".to_string()).into(),
            );
        }

        sqlx::query("DELETE FROM crews WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lock a non-archived crew row for the remainder of the transaction.
    ///
    /// Archived crews are deletion-equivalent for mutating operations, so
    /// this reports `NotFound` for them.
    pub(crate) async fn lock_active(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Crew, WorkflowError> {
        let query = format!(
            "SELECT {COLUMNS} FROM crews WHERE id = $1 AND archived_at IS NULL FOR UPDATE"
        );
        sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "crew", id }.into())
    }
}
