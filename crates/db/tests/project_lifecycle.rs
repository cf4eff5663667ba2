//! Integration tests for the project lifecycle and its ledger.
//!
//! Exercises the repository layer against a real database:
//! - Status transitions and the status_change entries they append
//! - No-op calls writing nothing
//! - Field updates producing one classified entry per changed field
//! - The equipment_arrived_date auto-advance
//! - Ledger replay reconstructing final state

use std::collections::HashMap;

use helios_core::error::CoreError;
use helios_core::history::change_types;
use helios_core::status::ProjectStatus;
use helios_db::error::WorkflowError;
use helios_db::models::history::SortOrder;
use helios_db::models::project::{CreateProject, UpdateProjectFields};
use helios_db::repositories::{ProjectHistoryRepo, ProjectRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(firm_id: i64, name: &str) -> CreateProject {
    CreateProject {
        firm_id,
        client_id: None,
        name: name.to_string(),
        site_address: Some("Solvagen 1".to_string()),
    }
}

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

// ---------------------------------------------------------------------------
// Test: Creation defaults
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_starts_in_planning(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof A"))
        .await
        .unwrap();
    assert_eq!(project.status, "planning");
    assert_eq!(project.crew_id, None);
    assert!(!project.equipment_ordered);

    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    assert!(history.is_empty()); // creation itself is not a ledgered change
}

// ---------------------------------------------------------------------------
// Test: Status transitions append entries; no-ops do not
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_status_change_appends_one_entry(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof B"))
        .await
        .unwrap();

    let updated = ProjectRepo::update_status(
        &pool,
        project.id,
        ProjectStatus::EquipmentWaiting,
        Some(42),
    )
    .await
    .unwrap();
    assert_eq!(updated.status, "equipment_waiting");

    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert_eq!(entry.change_type, change_types::STATUS_CHANGE);
    assert_eq!(entry.actor_id, Some(42));
    assert_eq!(entry.old_value.as_deref(), Some("planning"));
    assert_eq!(entry.new_value.as_deref(), Some("equipment_waiting"));
    assert_eq!(
        entry.description,
        "Status changed from planning to equipment_waiting"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_equal_status_is_a_no_op(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof C"))
        .await
        .unwrap();

    ProjectRepo::update_status(&pool, project.id, ProjectStatus::EquipmentWaiting, None)
        .await
        .unwrap();
    let unchanged =
        ProjectRepo::update_status(&pool, project.id, ProjectStatus::EquipmentWaiting, None)
            .await
            .unwrap();
    assert_eq!(unchanged.status, "equipment_waiting");

    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(history.len(), 1); // the second call wrote nothing
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_any_status_jump_is_legal(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof D"))
        .await
        .unwrap();

    // Straight from planning to paid, then back: operational corrections
    // are recorded, not refused.
    ProjectRepo::update_status(&pool, project.id, ProjectStatus::Paid, None)
        .await
        .unwrap();
    let back = ProjectRepo::update_status(&pool, project.id, ProjectStatus::WorkInProgress, None)
        .await
        .unwrap();
    assert_eq!(back.status, "work_in_progress");

    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_status_update_on_missing_project_is_not_found(pool: PgPool) {
    let err = ProjectRepo::update_status(&pool, 9999, ProjectStatus::Paid, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Domain(CoreError::NotFound { entity: "project", .. })
    ));
}

// ---------------------------------------------------------------------------
// Test: Field updates, one entry per changed field
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_field_update_ledgers_only_changed_fields(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof E"))
        .await
        .unwrap();

    let update = UpdateProjectFields {
        site_address: Some("Solvagen 1".to_string()), // same value, no entry
        equipment_ordered: Some(true),
        work_start_date: Some(date("2025-04-07")),
        ..Default::default()
    };
    let updated = ProjectRepo::update_fields(&pool, project.id, &update, Some(7))
        .await
        .unwrap();
    assert!(updated.equipment_ordered);
    assert_eq!(updated.work_start_date, Some(date("2025-04-07")));
    assert_eq!(updated.site_address.as_deref(), Some("Solvagen 1"));

    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);

    let ordered = history
        .iter()
        .find(|e| e.field.as_deref() == Some("equipment_ordered"))
        .unwrap();
    assert_eq!(ordered.change_type, change_types::EQUIPMENT_UPDATE);
    assert_eq!(ordered.old_value.as_deref(), Some("false"));
    assert_eq!(ordered.new_value.as_deref(), Some("true"));

    let start = history
        .iter()
        .find(|e| e.field.as_deref() == Some("work_start_date"))
        .unwrap();
    assert_eq!(start.change_type, change_types::DATE_UPDATE);
    assert_eq!(start.old_value, None);
    assert_eq!(start.new_value.as_deref(), Some("2025-04-07"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_work_end_before_start_is_rejected(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof F"))
        .await
        .unwrap();

    ProjectRepo::update_fields(
        &pool,
        project.id,
        &UpdateProjectFields {
            work_start_date: Some(date("2025-04-07")),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();

    // The existing start date counts even when the update only sets the end.
    let err = ProjectRepo::update_fields(
        &pool,
        project.id,
        &UpdateProjectFields {
            work_end_date: Some(date("2025-04-01")),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Domain(CoreError::Validation(_))
    ));

    // Nothing was applied and nothing was ledgered by the failed call.
    let reloaded = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(reloaded.work_end_date, None);
    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: equipment_arrived_date auto-advance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_equipment_arrival_advances_waiting_projects(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof G"))
        .await
        .unwrap();
    ProjectRepo::update_status(&pool, project.id, ProjectStatus::EquipmentWaiting, None)
        .await
        .unwrap();
    let before = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap()
        .len();

    let updated = ProjectRepo::update_fields(
        &pool,
        project.id,
        &UpdateProjectFields {
            equipment_arrived_date: Some(date("2025-03-01")),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(updated.status, "equipment_arrived");
    assert_eq!(updated.equipment_arrived_date, Some(date("2025-03-01")));

    let after = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    let new_entries = &after[before..];
    assert_eq!(new_entries.len(), 2); // one date_update, one status_change
    assert_eq!(new_entries[0].change_type, change_types::DATE_UPDATE);
    assert_eq!(new_entries[0].field.as_deref(), Some("equipment_arrived_date"));
    assert_eq!(new_entries[1].change_type, change_types::STATUS_CHANGE);
    assert_eq!(new_entries[1].old_value.as_deref(), Some("equipment_waiting"));
    assert_eq!(new_entries[1].new_value.as_deref(), Some("equipment_arrived"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_equipment_arrival_leaves_other_statuses_alone(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof H"))
        .await
        .unwrap();

    // Still in planning: the date is recorded but no auto-advance fires.
    let updated = ProjectRepo::update_fields(
        &pool,
        project.id,
        &UpdateProjectFields {
            equipment_arrived_date: Some(date("2025-03-01")),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(updated.status, "planning");

    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].change_type, change_types::DATE_UPDATE);
}

// ---------------------------------------------------------------------------
// Test: Ledger replay reconstructs final state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_ledger_replay_reconstructs_fields(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof I"))
        .await
        .unwrap();

    ProjectRepo::update_fields(
        &pool,
        project.id,
        &UpdateProjectFields {
            site_address: Some("First St 1".to_string()),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();
    ProjectRepo::update_status(&pool, project.id, ProjectStatus::WorkScheduled, None)
        .await
        .unwrap();
    ProjectRepo::update_fields(
        &pool,
        project.id,
        &UpdateProjectFields {
            site_address: Some("Second St 2".to_string()),
            work_start_date: Some(date("2025-05-05")),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();

    let history = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    let mut replayed: HashMap<&str, &str> = HashMap::new();
    for entry in &history {
        replayed.insert(
            entry.field.as_deref().unwrap(),
            entry.new_value.as_deref().unwrap(),
        );
    }

    let final_row = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(replayed["site_address"], final_row.site_address.unwrap());
    assert_eq!(replayed["status"], final_row.status);
    assert_eq!(
        replayed["work_start_date"],
        final_row.work_start_date.unwrap().to_string()
    );
}

// ---------------------------------------------------------------------------
// Test: Ledger ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_ledger_orders_stably_in_both_directions(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(1, "Roof J"))
        .await
        .unwrap();

    for status in [
        ProjectStatus::EquipmentWaiting,
        ProjectStatus::EquipmentArrived,
        ProjectStatus::WorkScheduled,
    ] {
        ProjectRepo::update_status(&pool, project.id, status, None)
            .await
            .unwrap();
    }

    let asc = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Asc)
        .await
        .unwrap();
    let desc = ProjectHistoryRepo::list_for(&pool, project.id, SortOrder::Desc)
        .await
        .unwrap();
    assert_eq!(asc.len(), 3);

    let mut reversed = desc.clone();
    reversed.reverse();
    let asc_ids: Vec<_> = asc.iter().map(|e| e.id).collect();
    let rev_ids: Vec<_> = reversed.iter().map(|e| e.id).collect();
    assert_eq!(asc_ids, rev_ids);

    // Ascending ids agree with insertion order even for equal timestamps.
    let mut sorted = asc_ids.clone();
    sorted.sort();
    assert_eq!(asc_ids, sorted);
}
