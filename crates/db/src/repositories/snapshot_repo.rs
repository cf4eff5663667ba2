//! Repository for crew composition snapshots.
//!
//! Snapshots are written once and only ever read afterwards; there is no
//! update or delete method. Capture runs on the caller's connection so
//! the roster read and the snapshot insert share one transaction.

use helios_core::error::CoreError;
use helios_core::snapshot::{SnapshotCrew, SnapshotDocument, SnapshotMember};
use helios_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::error::WorkflowError;
use crate::models::crew::Crew;
use crate::models::member::CrewMember;
use crate::models::snapshot::ProjectCrewSnapshot;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, crew_id, document, created_by, created_at";

const CREW_COLUMNS: &str = "id, firm_id, name, color, status, archived_at, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, crew_id, role, employee_number, first_name, last_name, \
     phone, email, archived_at, created_at, updated_at";

/// Provides capture and read operations for project crew snapshots.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Capture the crew's current composition for a project.
    ///
    /// Reads the non-archived members and inserts the flattened document
    /// on the same connection; inside a transaction the captured view and
    /// the write commit together.
    pub(crate) async fn capture(
        conn: &mut PgConnection,
        project_id: DbId,
        crew: &Crew,
        created_by: Option<DbId>,
    ) -> Result<ProjectCrewSnapshot, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM crew_members
             WHERE crew_id = $1 AND archived_at IS NULL
             ORDER BY id"
        );
        let members = sqlx::query_as::<_, CrewMember>(&query)
            .bind(crew.id)
            .fetch_all(&mut *conn)
            .await?;

        let document = SnapshotDocument::new(
            SnapshotCrew {
                crew_id: crew.id,
                firm_id: crew.firm_id,
                name: crew.name.clone(),
                color: crew.color.clone(),
                status: crew.status.clone(),
            },
            members
                .into_iter()
                .map(|m| SnapshotMember {
                    member_id: m.id,
                    role: m.role,
                    employee_number: m.employee_number,
                    first_name: m.first_name,
                    last_name: m.last_name,
                    phone: m.phone,
                    email: m.email,
                })
                .collect(),
        );

        let query = format!(
            "INSERT INTO project_crew_snapshots (project_id, crew_id, document, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectCrewSnapshot>(&query)
            .bind(project_id)
            .bind(crew.id)
            .bind(Json(&document))
            .bind(created_by)
            .fetch_one(&mut *conn)
            .await
    }

    /// Capture a snapshot as a standalone operation.
    ///
    /// The project must exist and the crew must exist and not be archived.
    pub async fn create_snapshot(
        pool: &PgPool,
        project_id: DbId,
        crew_id: DbId,
        created_by: Option<DbId>,
    ) -> Result<ProjectCrewSnapshot, WorkflowError> {
        let mut tx = pool.begin().await?;

        let project = sqlx::query_scalar::<_, DbId>("SELECT id FROM projects WHERE id = $1")
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?;
        if project.is_none() {
            return Err(CoreError::NotFound {
                entity: "project",
                id: project_id,
            }
            .into());
        }

        let query = format!("SELECT {CREW_COLUMNS} FROM crews WHERE id = $1 AND archived_at IS NULL");
        let crew = sqlx::query_as::<_, Crew>(&query)
            .bind(crew_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "crew",
                id: crew_id,
            })?;

        let snapshot = Self::capture(&mut tx, project_id, &crew, created_by).await?;

        tx.commit().await?;
        Ok(snapshot)
    }

    /// Find a snapshot by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectCrewSnapshot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_crew_snapshots WHERE id = $1");
        sqlx::query_as::<_, ProjectCrewSnapshot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recent snapshot for a project, or `None`.
    ///
    /// Latest wins: reassignment produces a fresh snapshot and consumers
    /// want the current authoritative composition; the full list stays
    /// available through [`Self::list_for_project`].
    pub async fn find_latest_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectCrewSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_crew_snapshots
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ProjectCrewSnapshot>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// All snapshots for a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectCrewSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_crew_snapshots
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProjectCrewSnapshot>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
