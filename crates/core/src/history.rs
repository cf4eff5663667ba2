//! History ledger vocabulary and description synthesis.
//!
//! This module lives in `core` (zero internal deps) so the repository layer
//! and the API layer agree on one set of change-type strings. Ledger rows
//! are append-only; the constants here are the only values ever written to
//! their `change_type` / `action` columns.

// ---------------------------------------------------------------------------
// Change type constants
// ---------------------------------------------------------------------------

/// Known change types for project and crew history entries.
pub mod change_types {
    pub const STATUS_CHANGE: &str = "status_change";
    pub const DATE_UPDATE: &str = "date_update";
    pub const EQUIPMENT_UPDATE: &str = "equipment_update";
    pub const CALL_UPDATE: &str = "call_update";
    pub const FIELD_UPDATE: &str = "field_update";
    pub const CREW_ASSIGNED: &str = "crew_assigned";
    pub const MEMBER_ADDED: &str = "member_added";
    pub const MEMBER_REMOVED: &str = "member_removed";
    pub const ARCHIVED: &str = "archived";
}

// ---------------------------------------------------------------------------
// Reclamation action constants
// ---------------------------------------------------------------------------

/// Known actions for reclamation history entries, one per workflow
/// transition.
pub mod reclamation_actions {
    pub const CREATED: &str = "created";
    pub const ACCEPTED: &str = "accepted";
    pub const REJECTED: &str = "rejected";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";
}

// ---------------------------------------------------------------------------
// Field-to-change-type classification
// ---------------------------------------------------------------------------

/// Classify a project field name into a history change type.
///
/// The `_date` suffix is checked before the `equipment_` prefix so that
/// `equipment_arrived_date` counts as a date update, not an equipment
/// update. Unknown fields default to `"field_update"`.
pub fn classify_field_change(field: &str) -> &'static str {
    if field.ends_with("_date") {
        change_types::DATE_UPDATE
    } else if field.starts_with("equipment_") {
        change_types::EQUIPMENT_UPDATE
    } else if field.starts_with("needs_call") {
        change_types::CALL_UPDATE
    } else {
        change_types::FIELD_UPDATE
    }
}

// ---------------------------------------------------------------------------
// Description synthesis
// ---------------------------------------------------------------------------

/// Render an optional ledger value for a human-readable description.
fn display_value(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "(empty)",
    }
}

/// Human-readable description for a status transition.
pub fn describe_status_change(old: &str, new: &str) -> String {
    format!("Status changed from {old} to {new}")
}

/// Human-readable description for a single field change.
pub fn describe_field_change(field: &str, old: Option<&str>, new: Option<&str>) -> String {
    format!(
        "Changed {field} from {} to {}",
        display_value(old),
        display_value(new),
    )
}

/// Human-readable description for a crew assignment.
pub fn describe_crew_assignment(crew_name: &str) -> String {
    format!("Crew {crew_name} assigned")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // classify_field_change
    // -----------------------------------------------------------------------

    #[test]
    fn date_fields_classify_as_date_update() {
        assert_eq!(classify_field_change("work_start_date"), change_types::DATE_UPDATE);
        assert_eq!(classify_field_change("work_end_date"), change_types::DATE_UPDATE);
        assert_eq!(
            classify_field_change("equipment_expected_date"),
            change_types::DATE_UPDATE,
        );
    }

    #[test]
    fn equipment_arrived_date_is_a_date_update_not_equipment() {
        assert_eq!(
            classify_field_change("equipment_arrived_date"),
            change_types::DATE_UPDATE,
        );
    }

    #[test]
    fn equipment_fields_classify_as_equipment_update() {
        assert_eq!(
            classify_field_change("equipment_ordered"),
            change_types::EQUIPMENT_UPDATE,
        );
        assert_eq!(
            classify_field_change("equipment_notes"),
            change_types::EQUIPMENT_UPDATE,
        );
    }

    #[test]
    fn needs_call_flags_classify_as_call_update() {
        assert_eq!(
            classify_field_change("needs_call_equipment_delay"),
            change_types::CALL_UPDATE,
        );
        assert_eq!(
            classify_field_change("needs_call_crew_delay"),
            change_types::CALL_UPDATE,
        );
        assert_eq!(
            classify_field_change("needs_call_date_change"),
            change_types::CALL_UPDATE,
        );
    }

    #[test]
    fn other_fields_classify_as_field_update() {
        assert_eq!(classify_field_change("name"), change_types::FIELD_UPDATE);
        assert_eq!(classify_field_change("site_address"), change_types::FIELD_UPDATE);
        assert_eq!(classify_field_change("invoice_number"), change_types::FIELD_UPDATE);
    }

    // -----------------------------------------------------------------------
    // Description synthesis
    // -----------------------------------------------------------------------

    #[test]
    fn status_change_description_names_both_states() {
        let desc = describe_status_change("planning", "equipment_waiting");
        assert_eq!(desc, "Status changed from planning to equipment_waiting");
    }

    #[test]
    fn field_change_description_names_field_and_values() {
        let desc = describe_field_change("site_address", Some("Old Rd 1"), Some("New Rd 2"));
        assert_eq!(desc, "Changed site_address from Old Rd 1 to New Rd 2");
    }

    #[test]
    fn absent_values_render_as_empty_marker() {
        let desc = describe_field_change("invoice_number", None, Some("INV-7"));
        assert_eq!(desc, "Changed invoice_number from (empty) to INV-7");
    }

    #[test]
    fn crew_assignment_description_names_the_crew() {
        assert_eq!(describe_crew_assignment("North Team"), "Crew North Team assigned");
    }
}
