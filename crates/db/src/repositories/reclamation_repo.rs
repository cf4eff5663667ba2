//! Repository for the `reclamations` table and its workflow transitions.
//!
//! Each transition locks the reclamation row, evaluates the core guards
//! against the locked state, applies the mutation, and appends the action
//! ledger entry, all in one transaction. A failed guard rolls everything
//! back: the row keeps its pre-call state and no partial entry survives.

use chrono::Utc;
use helios_core::error::CoreError;
use helios_core::history::reclamation_actions;
use helios_core::reclamation::{self, AcceptKind};
use helios_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::error::WorkflowError;
use crate::models::history::NewReclamationHistoryEntry;
use crate::models::member::CrewMember;
use crate::models::reclamation::{CreateReclamation, CrewReclamations, Reclamation};
use crate::repositories::ReclamationHistoryRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, firm_id, description, deadline, status, \
     original_crew_id, current_crew_id, accepted_by_member_id, accepted_at, \
     rejected_by_member_id, rejected_at, rejection_reason, completed_at, \
     completion_notes, created_by, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, crew_id, role, employee_number, first_name, last_name, \
     phone, email, archived_at, created_at, updated_at";

/// Provides workflow operations for reclamations.
pub struct ReclamationRepo;

impl ReclamationRepo {
    /// Create a reclamation against a project, assigned to a crew of the
    /// same firm.
    ///
    /// Seeds `original_crew_id = current_crew_id = crew_id` and appends
    /// the `created` ledger entry in the same transaction. The deadline
    /// must not precede the creation date.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReclamation,
        created_by: Option<DbId>,
    ) -> Result<Reclamation, WorkflowError> {
        if input.description.trim().is_empty() {
            return Err(CoreError::Validation("A description is required".to_string()).into());
        }
        if input.deadline < Utc::now().date_naive() {
            return Err(CoreError::Validation(
                "Deadline cannot precede the creation date".to_string(),
            )
            .into());
        }

        let mut tx = pool.begin().await?;

        let project_firm =
            sqlx::query_scalar::<_, DbId>("SELECT firm_id FROM projects WHERE id = $1")
                .bind(input.project_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "project",
                    id: input.project_id,
                })?;
        if project_firm != input.firm_id {
            return Err(
                CoreError::Validation("Project belongs to a different firm".to_string()).into(),
            );
        }

        let crew_firm = Self::crew_firm(&mut *tx, input.crew_id).await?;
        if crew_firm != input.firm_id {
            return Err(
                CoreError::Validation("Crew belongs to a different firm".to_string()).into(),
            );
        }

        let query = format!(
            "INSERT INTO reclamations
                (project_id, firm_id, description, deadline, original_crew_id,
                 current_crew_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $5, $6)
             RETURNING {COLUMNS}"
        );
        let reclamation = sqlx::query_as::<_, Reclamation>(&query)
            .bind(input.project_id)
            .bind(input.firm_id)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(input.crew_id)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        ReclamationHistoryRepo::append(
            &mut *tx,
            &NewReclamationHistoryEntry {
                reclamation_id: reclamation.id,
                action: reclamation_actions::CREATED,
                member_id: None,
                crew_id: Some(input.crew_id),
                reason: None,
                notes: None,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(reclamation)
    }

    /// Find a reclamation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reclamation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reclamations WHERE id = $1");
        sqlx::query_as::<_, Reclamation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Accept a reclamation.
    ///
    /// From `pending` the accepting member must belong to the current
    /// crew. From `rejected` the member must belong to a *different* crew
    /// of the same firm; the reclamation hands off to that crew. Both
    /// paths stamp the accepting member and timestamp and append an
    /// `accepted` entry tagged with the crew responsible after the call.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        member_id: DbId,
    ) -> Result<Reclamation, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock(&mut tx, id).await?;
        let member = Self::active_member(&mut tx, member_id).await?;

        let status = current.workflow_status()?;
        let kind = reclamation::accept_kind(status, member.crew_id == current.current_crew_id)?;

        let next_crew_id = match kind {
            AcceptKind::Direct => current.current_crew_id,
            AcceptKind::HandOff => {
                let crew_firm = Self::crew_firm(&mut *tx, member.crew_id).await?;
                if crew_firm != current.firm_id {
                    return Err(CoreError::Validation(
                        "A reclamation can only be taken over within its firm".to_string(),
                    )
                    .into());
                }
                member.crew_id
            }
        };

        let query = format!(
            "UPDATE reclamations SET
                status = 'accepted',
                current_crew_id = $2,
                accepted_by_member_id = $3,
                accepted_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reclamation>(&query)
            .bind(id)
            .bind(next_crew_id)
            .bind(member_id)
            .fetch_one(&mut *tx)
            .await?;

        ReclamationHistoryRepo::append(
            &mut *tx,
            &NewReclamationHistoryEntry {
                reclamation_id: id,
                action: reclamation_actions::ACCEPTED,
                member_id: Some(member_id),
                crew_id: Some(next_crew_id),
                reason: None,
                notes: None,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Reject a pending reclamation with a mandatory reason.
    ///
    /// Only a member of the current crew may reject. The reclamation then
    /// becomes available to the firm's other crews.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        member_id: DbId,
        reason: &str,
    ) -> Result<Reclamation, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock(&mut tx, id).await?;
        let member = Self::active_member(&mut tx, member_id).await?;

        let status = current.workflow_status()?;
        reclamation::ensure_reject(status, member.crew_id == current.current_crew_id, reason)?;

        let query = format!(
            "UPDATE reclamations SET
                status = 'rejected',
                rejected_by_member_id = $2,
                rejected_at = NOW(),
                rejection_reason = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reclamation>(&query)
            .bind(id)
            .bind(member_id)
            .bind(reason)
            .fetch_one(&mut *tx)
            .await?;

        ReclamationHistoryRepo::append(
            &mut *tx,
            &NewReclamationHistoryEntry {
                reclamation_id: id,
                action: reclamation_actions::REJECTED,
                member_id: Some(member_id),
                crew_id: Some(current.current_crew_id),
                reason: Some(reason.to_string()),
                notes: None,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Complete an accepted reclamation, with optional notes.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        notes: Option<String>,
    ) -> Result<Reclamation, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock(&mut tx, id).await?;

        reclamation::ensure_complete(current.workflow_status()?)?;

        let query = format!(
            "UPDATE reclamations SET
                status = 'completed',
                completed_at = NOW(),
                completion_notes = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reclamation>(&query)
            .bind(id)
            .bind(&notes)
            .fetch_one(&mut *tx)
            .await?;

        ReclamationHistoryRepo::append(
            &mut *tx,
            &NewReclamationHistoryEntry {
                reclamation_id: id,
                action: reclamation_actions::COMPLETED,
                member_id: None,
                crew_id: Some(current.current_crew_id),
                reason: None,
                notes,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Cancel a reclamation as an administrative override.
    ///
    /// Legal from every state except `cancelled` itself; the ledger entry
    /// carries no additional metadata.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Reclamation, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock(&mut tx, id).await?;

        reclamation::ensure_cancel(current.workflow_status()?)?;

        let query =
            format!("UPDATE reclamations SET status = 'cancelled' WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Reclamation>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        ReclamationHistoryRepo::append(
            &mut *tx,
            &NewReclamationHistoryEntry {
                reclamation_id: id,
                action: reclamation_actions::CANCELLED,
                member_id: None,
                crew_id: None,
                reason: None,
                notes: None,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// List a firm's reclamations, newest first.
    pub async fn list_for_firm(
        pool: &PgPool,
        firm_id: DbId,
    ) -> Result<Vec<Reclamation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reclamations
             WHERE firm_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Reclamation>(&query)
            .bind(firm_id)
            .fetch_all(pool)
            .await
    }

    /// List a project's reclamations, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Reclamation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reclamations
             WHERE project_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Reclamation>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// A crew's work queue, split into assigned and available.
    ///
    /// Assigned: the crew currently owns the reclamation (pending or
    /// accepted). Available: another crew of the same firm rejected it and
    /// this crew may volunteer. Both ordered by deadline.
    pub async fn list_for_crew(
        pool: &PgPool,
        crew_id: DbId,
    ) -> Result<CrewReclamations, WorkflowError> {
        let firm_id = Self::crew_firm(pool, crew_id).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM reclamations
             WHERE current_crew_id = $1 AND status IN ('pending', 'accepted')
             ORDER BY deadline, id"
        );
        let assigned = sqlx::query_as::<_, Reclamation>(&query)
            .bind(crew_id)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM reclamations
             WHERE firm_id = $1 AND status = 'rejected' AND current_crew_id <> $2
             ORDER BY deadline, id"
        );
        let available = sqlx::query_as::<_, Reclamation>(&query)
            .bind(firm_id)
            .bind(crew_id)
            .fetch_all(pool)
            .await?;

        Ok(CrewReclamations {
            assigned,
            available,
        })
    }

    /// Lock the reclamation row for the remainder of the transaction.
    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Reclamation, WorkflowError> {
        let query = format!("SELECT {COLUMNS} FROM reclamations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Reclamation>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "reclamation",
                    id,
                }
                .into()
            })
    }

    /// Fetch a non-archived member acting on a reclamation.
    async fn active_member(
        conn: &mut PgConnection,
        member_id: DbId,
    ) -> Result<CrewMember, WorkflowError> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM crew_members WHERE id = $1 AND archived_at IS NULL"
        );
        sqlx::query_as::<_, CrewMember>(&query)
            .bind(member_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "crew member",
                    id: member_id,
                }
                .into()
            })
    }

    /// Firm of a non-archived crew. Archived crews neither receive nor
    /// take over work.
    async fn crew_firm<'e, E>(executor: E, crew_id: DbId) -> Result<DbId, WorkflowError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "SELECT firm_id FROM crews WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(crew_id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "crew",
                id: crew_id,
            }
            .into()
        })
    }
}
