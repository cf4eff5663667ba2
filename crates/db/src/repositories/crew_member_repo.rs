//! Repository for the `crew_members` table.
//!
//! Roster membership is part of crew history: adding a member and
//! archiving one append `member_added` / `member_removed` entries to the
//! crew ledger in the same transaction as the roster change. Plain field
//! edits (contact details, role) are not ledgered.

use std::str::FromStr;

use helios_core::error::CoreError;
use helios_core::history::change_types;
use helios_core::status::MemberRole;
use helios_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::WorkflowError;
use crate::models::history::NewCrewHistoryEntry;
use crate::models::member::{CreateCrewMember, CrewMember, UpdateCrewMember};
use crate::repositories::{CrewHistoryRepo, CrewRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, crew_id, role, employee_number, first_name, last_name, \
     phone, email, archived_at, created_at, updated_at";

/// Provides roster operations for crew members.
pub struct CrewMemberRepo;

impl CrewMemberRepo {
    /// Add a member to a crew, appending a `member_added` ledger entry.
    ///
    /// The crew must exist and not be archived. Employee numbers are
    /// unique; a duplicate surfaces as a database error the API maps to a
    /// conflict.
    pub async fn create(
        pool: &PgPool,
        crew_id: DbId,
        input: &CreateCrewMember,
        actor_id: Option<DbId>,
    ) -> Result<CrewMember, WorkflowError> {
        let role = input
            .role
            .as_deref()
            .map(MemberRole::from_str)
            .transpose()?
            .unwrap_or(MemberRole::Worker);

        let mut tx = pool.begin().await?;
        CrewRepo::lock_active(&mut tx, crew_id).await?;

        let query = format!(
            "INSERT INTO crew_members
                (crew_id, role, employee_number, first_name, last_name, phone, email)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let member = sqlx::query_as::<_, CrewMember>(&query)
            .bind(crew_id)
            .bind(role.as_str())
            .bind(&input.employee_number)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(&mut *tx)
            .await?;

        CrewHistoryRepo::append(
            &mut *tx,
            &NewCrewHistoryEntry {
                crew_id,
                actor_id,
                change_type: change_types::MEMBER_ADDED,
                field: None,
                old_value: None,
                new_value: Some(member.id.to_string()),
                description: format!("Member {} {} added", member.first_name, member.last_name),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(member)
    }

    /// Find a member by its internal ID, archived or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CrewMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crew_members WHERE id = $1");
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a crew's active members, ordered by name.
    pub async fn list_for_crew(
        pool: &PgPool,
        crew_id: DbId,
    ) -> Result<Vec<CrewMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM crew_members
             WHERE crew_id = $1 AND archived_at IS NULL
             ORDER BY last_name, first_name"
        );
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(crew_id)
            .fetch_all(pool)
            .await
    }

    /// Update a member's details. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCrewMember,
    ) -> Result<CrewMember, WorkflowError> {
        let role = input.role.as_deref().map(MemberRole::from_str).transpose()?;

        let query = format!(
            "UPDATE crew_members SET
                role = COALESCE($2, role),
                employee_number = COALESCE($3, employee_number),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email)
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(id)
            .bind(role.map(MemberRole::as_str))
            .bind(&input.employee_number)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "crew member",
                    id,
                }
                .into()
            })
    }

    /// Archive a member, appending a `member_removed` ledger entry.
    pub async fn archive(
        pool: &PgPool,
        id: DbId,
        actor_id: Option<DbId>,
    ) -> Result<CrewMember, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock_active(&mut tx, id).await?;

        let query = format!(
            "UPDATE crew_members SET archived_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, CrewMember>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        CrewHistoryRepo::append(
            &mut *tx,
            &NewCrewHistoryEntry {
                crew_id: current.crew_id,
                actor_id,
                change_type: change_types::MEMBER_REMOVED,
                field: None,
                old_value: Some(current.id.to_string()),
                new_value: None,
                description: format!(
                    "Member {} {} removed",
                    current.first_name, current.last_name
                ),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Lock a non-archived member row for the remainder of the transaction.
    async fn lock_active(conn: &mut PgConnection, id: DbId) -> Result<CrewMember, WorkflowError> {
        let query = format!(
            "SELECT {COLUMNS} FROM crew_members WHERE id = $1 AND archived_at IS NULL FOR UPDATE"
        );
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "crew member",
                    id,
                }
                .into()
            })
    }
}
