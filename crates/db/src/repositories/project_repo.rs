//! Repository for the `projects` table and its lifecycle operations.
//!
//! Projects are never deleted. Every mutating workflow method runs in a
//! single transaction that locks the project row with `SELECT ... FOR
//! UPDATE`, applies the change, and appends the matching ledger entries;
//! concurrent transitions against the same project serialize on the row
//! lock, so the ledger can never record a transition that did not happen.

use helios_core::error::CoreError;
use helios_core::history::{
    change_types, classify_field_change, describe_crew_assignment, describe_field_change,
    describe_status_change,
};
use helios_core::status::ProjectStatus;
use helios_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::WorkflowError;
use crate::models::crew::Crew;
use crate::models::history::NewProjectHistoryEntry;
use crate::models::project::{CreateProject, Project, UpdateProjectFields};
use crate::repositories::{ProjectHistoryRepo, SnapshotRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, firm_id, client_id, crew_id, name, site_address, status, \
     equipment_expected_date, equipment_arrived_date, work_start_date, work_end_date, \
     equipment_ordered, equipment_notes, needs_call_equipment_delay, needs_call_crew_delay, \
     needs_call_date_change, invoice_id, invoice_number, created_at, updated_at";

const CREW_COLUMNS: &str = "id, firm_id, name, color, status, archived_at, created_at, updated_at";

/// One detected field difference, staged for the ledger.
struct FieldChange {
    field: &'static str,
    old: Option<String>,
    new: Option<String>,
}

/// Stage a change when the field was provided and its value differs.
fn note_change<T: PartialEq + ToString>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    provided: Option<&T>,
    current: Option<&T>,
) {
    if let Some(new) = provided {
        if current != Some(new) {
            changes.push(FieldChange {
                field,
                old: current.map(ToString::to_string),
                new: Some(new.to_string()),
            });
        }
    }
}

/// Provides lifecycle and CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Projects start in `planning` (schema default) with no crew.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (firm_id, client_id, name, site_address)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.firm_id)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.site_address)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects, most recently created first, optionally scoped to a
    /// firm.
    pub async fn list(pool: &PgPool, firm_id: Option<DbId>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE $1::BIGINT IS NULL OR firm_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(firm_id)
            .fetch_all(pool)
            .await
    }

    /// Set the project status, appending a `status_change` ledger entry.
    ///
    /// Any status-to-status jump is legal; operators correct reality, the
    /// engine records it. Setting the current status again is a no-op that
    /// writes nothing. The ledger entry links the latest snapshot so the
    /// transition can be read against the crew composition of its time.
    pub async fn update_status(
        pool: &PgPool,
        project_id: DbId,
        new_status: ProjectStatus,
        actor_id: Option<DbId>,
    ) -> Result<Project, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock(&mut tx, project_id).await?;

        if current.status == new_status.as_str() {
            return Ok(current);
        }

        let query = format!("UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .bind(new_status.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let snapshot_id = Self::latest_snapshot_id(&mut tx, project_id).await?;
        ProjectHistoryRepo::append(
            &mut *tx,
            &NewProjectHistoryEntry {
                project_id,
                actor_id,
                change_type: change_types::STATUS_CHANGE,
                field: Some("status".to_string()),
                old_value: Some(current.status.clone()),
                new_value: Some(new_status.as_str().to_string()),
                description: describe_status_change(&current.status, new_status.as_str()),
                snapshot_id,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Apply a partial field update, appending one ledger entry per field
    /// whose value actually changed.
    ///
    /// Omitted fields stay untouched; provided-but-equal fields write no
    /// entry. When `equipment_arrived_date` changes while the project sits
    /// in `equipment_waiting`, the status advances to `equipment_arrived`
    /// in the same transaction with its own `status_change` entry.
    pub async fn update_fields(
        pool: &PgPool,
        project_id: DbId,
        update: &UpdateProjectFields,
        actor_id: Option<DbId>,
    ) -> Result<Project, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock(&mut tx, project_id).await?;

        let start = update.work_start_date.or(current.work_start_date);
        let end = update.work_end_date.or(current.work_end_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(CoreError::Validation(
                    "work_end_date cannot precede work_start_date".to_string(),
                )
                .into());
            }
        }

        let mut changes = Vec::new();
        note_change(&mut changes, "name", update.name.as_ref(), Some(&current.name));
        note_change(
            &mut changes,
            "client_id",
            update.client_id.as_ref(),
            current.client_id.as_ref(),
        );
        note_change(
            &mut changes,
            "site_address",
            update.site_address.as_ref(),
            current.site_address.as_ref(),
        );
        note_change(
            &mut changes,
            "equipment_expected_date",
            update.equipment_expected_date.as_ref(),
            current.equipment_expected_date.as_ref(),
        );
        note_change(
            &mut changes,
            "equipment_arrived_date",
            update.equipment_arrived_date.as_ref(),
            current.equipment_arrived_date.as_ref(),
        );
        note_change(
            &mut changes,
            "work_start_date",
            update.work_start_date.as_ref(),
            current.work_start_date.as_ref(),
        );
        note_change(
            &mut changes,
            "work_end_date",
            update.work_end_date.as_ref(),
            current.work_end_date.as_ref(),
        );
        note_change(
            &mut changes,
            "equipment_ordered",
            update.equipment_ordered.as_ref(),
            Some(&current.equipment_ordered),
        );
        note_change(
            &mut changes,
            "equipment_notes",
            update.equipment_notes.as_ref(),
            current.equipment_notes.as_ref(),
        );
        note_change(
            &mut changes,
            "needs_call_equipment_delay",
            update.needs_call_equipment_delay.as_ref(),
            Some(&current.needs_call_equipment_delay),
        );
        note_change(
            &mut changes,
            "needs_call_crew_delay",
            update.needs_call_crew_delay.as_ref(),
            Some(&current.needs_call_crew_delay),
        );
        note_change(
            &mut changes,
            "needs_call_date_change",
            update.needs_call_date_change.as_ref(),
            Some(&current.needs_call_date_change),
        );
        note_change(
            &mut changes,
            "invoice_id",
            update.invoice_id.as_ref(),
            current.invoice_id.as_ref(),
        );
        note_change(
            &mut changes,
            "invoice_number",
            update.invoice_number.as_ref(),
            current.invoice_number.as_ref(),
        );

        if changes.is_empty() {
            return Ok(current);
        }

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                client_id = COALESCE($3, client_id),
                site_address = COALESCE($4, site_address),
                equipment_expected_date = COALESCE($5, equipment_expected_date),
                equipment_arrived_date = COALESCE($6, equipment_arrived_date),
                work_start_date = COALESCE($7, work_start_date),
                work_end_date = COALESCE($8, work_end_date),
                equipment_ordered = COALESCE($9, equipment_ordered),
                equipment_notes = COALESCE($10, equipment_notes),
                needs_call_equipment_delay = COALESCE($11, needs_call_equipment_delay),
                needs_call_crew_delay = COALESCE($12, needs_call_crew_delay),
                needs_call_date_change = COALESCE($13, needs_call_date_change),
                invoice_id = COALESCE($14, invoice_id),
                invoice_number = COALESCE($15, invoice_number)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let mut updated = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .bind(&update.name)
            .bind(update.client_id)
            .bind(&update.site_address)
            .bind(update.equipment_expected_date)
            .bind(update.equipment_arrived_date)
            .bind(update.work_start_date)
            .bind(update.work_end_date)
            .bind(update.equipment_ordered)
            .bind(&update.equipment_notes)
            .bind(update.needs_call_equipment_delay)
            .bind(update.needs_call_crew_delay)
            .bind(update.needs_call_date_change)
            .bind(update.invoice_id)
            .bind(&update.invoice_number)
            .fetch_one(&mut *tx)
            .await?;

        for change in &changes {
            ProjectHistoryRepo::append(
                &mut *tx,
                &NewProjectHistoryEntry {
                    project_id,
                    actor_id,
                    change_type: classify_field_change(change.field),
                    field: Some(change.field.to_string()),
                    old_value: change.old.clone(),
                    new_value: change.new.clone(),
                    description: describe_field_change(
                        change.field,
                        change.old.as_deref(),
                        change.new.as_deref(),
                    ),
                    snapshot_id: None,
                },
            )
            .await?;
        }

        let arrived_changed = changes.iter().any(|c| c.field == "equipment_arrived_date");
        if arrived_changed && current.status == ProjectStatus::EquipmentWaiting.as_str() {
            let next = ProjectStatus::EquipmentArrived;
            let query = format!("UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
            updated = sqlx::query_as::<_, Project>(&query)
                .bind(project_id)
                .bind(next.as_str())
                .fetch_one(&mut *tx)
                .await?;

            let snapshot_id = Self::latest_snapshot_id(&mut tx, project_id).await?;
            ProjectHistoryRepo::append(
                &mut *tx,
                &NewProjectHistoryEntry {
                    project_id,
                    actor_id,
                    change_type: change_types::STATUS_CHANGE,
                    field: Some("status".to_string()),
                    old_value: Some(current.status.clone()),
                    new_value: Some(next.as_str().to_string()),
                    description: describe_status_change(&current.status, next.as_str()),
                    snapshot_id,
                },
            )
            .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Assign a crew to the project, capturing a composition snapshot.
    ///
    /// The crew must exist and not be archived. Assignment, snapshot, and
    /// the `crew_assigned` ledger entry (linking the new snapshot) commit
    /// together; reassignment runs the same path and produces a fresh
    /// snapshot.
    pub async fn assign_crew(
        pool: &PgPool,
        project_id: DbId,
        crew_id: DbId,
        actor_id: Option<DbId>,
    ) -> Result<Project, WorkflowError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock(&mut tx, project_id).await?;

        let query = format!("SELECT {CREW_COLUMNS} FROM crews WHERE id = $1 AND archived_at IS NULL");
        let crew = sqlx::query_as::<_, Crew>(&query)
            .bind(crew_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "crew",
                id: crew_id,
            })?;

        let query = format!("UPDATE projects SET crew_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .bind(crew_id)
            .fetch_one(&mut *tx)
            .await?;

        let snapshot = SnapshotRepo::capture(&mut tx, project_id, &crew, actor_id).await?;

        ProjectHistoryRepo::append(
            &mut *tx,
            &NewProjectHistoryEntry {
                project_id,
                actor_id,
                change_type: change_types::CREW_ASSIGNED,
                field: Some("crew_id".to_string()),
                old_value: current.crew_id.map(|id| id.to_string()),
                new_value: Some(crew_id.to_string()),
                description: describe_crew_assignment(&crew.name),
                snapshot_id: Some(snapshot.id),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Lock the project row for the remainder of the transaction.
    async fn lock(conn: &mut PgConnection, project_id: DbId) -> Result<Project, WorkflowError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "project",
                    id: project_id,
                }
                .into()
            })
    }

    /// ID of the most recent snapshot for the project, if any.
    async fn latest_snapshot_id(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM project_crew_snapshots
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .bind(project_id)
        .fetch_optional(&mut *conn)
        .await
    }
}
