//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Workflow methods (anything
//! that both mutates state and appends ledger entries) run inside a
//! single transaction and return `WorkflowError`; plain reads and CRUD
//! return `sqlx::Error`.

pub mod crew_member_repo;
pub mod crew_repo;
pub mod history_repo;
pub mod project_repo;
pub mod reclamation_repo;
pub mod snapshot_repo;

pub use crew_member_repo::CrewMemberRepo;
pub use crew_repo::CrewRepo;
pub use history_repo::{CrewHistoryRepo, ProjectHistoryRepo, ReclamationHistoryRepo};
pub use project_repo::ProjectRepo;
pub use reclamation_repo::ReclamationRepo;
pub use snapshot_repo::SnapshotRepo;
