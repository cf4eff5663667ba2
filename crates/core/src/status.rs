//! Status vocabularies for projects, crews, and crew members.
//!
//! Statuses are stored as snake_case TEXT in the database and carried
//! verbatim into ledger old/new values, so every enum here maps to and from
//! its wire name. Project status deliberately has no transition graph:
//! operators may jump between any two states to correct reality (re-opening
//! a job, skipping a stage), and only enum membership is validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an installation project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    EquipmentWaiting,
    EquipmentArrived,
    WorkScheduled,
    WorkInProgress,
    WorkCompleted,
    Invoiced,
    Paid,
}

impl ProjectStatus {
    /// Every status, in natural lifecycle order.
    pub const ALL: [ProjectStatus; 8] = [
        ProjectStatus::Planning,
        ProjectStatus::EquipmentWaiting,
        ProjectStatus::EquipmentArrived,
        ProjectStatus::WorkScheduled,
        ProjectStatus::WorkInProgress,
        ProjectStatus::WorkCompleted,
        ProjectStatus::Invoiced,
        ProjectStatus::Paid,
    ];

    /// The snake_case wire name stored in the database and the ledger.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::EquipmentWaiting => "equipment_waiting",
            ProjectStatus::EquipmentArrived => "equipment_arrived",
            ProjectStatus::WorkScheduled => "work_scheduled",
            ProjectStatus::WorkInProgress => "work_in_progress",
            ProjectStatus::WorkCompleted => "work_completed",
            ProjectStatus::Invoiced => "invoiced",
            ProjectStatus::Paid => "paid",
        }
    }

    /// The natural successor in the lifecycle, for UI guidance only.
    ///
    /// The engine never enforces this ordering; `update_status` accepts any
    /// member of the enum.
    pub fn suggested_next(self) -> Option<ProjectStatus> {
        match self {
            ProjectStatus::Planning => Some(ProjectStatus::EquipmentWaiting),
            ProjectStatus::EquipmentWaiting => Some(ProjectStatus::EquipmentArrived),
            ProjectStatus::EquipmentArrived => Some(ProjectStatus::WorkScheduled),
            ProjectStatus::WorkScheduled => Some(ProjectStatus::WorkInProgress),
            ProjectStatus::WorkInProgress => Some(ProjectStatus::WorkCompleted),
            ProjectStatus::WorkCompleted => Some(ProjectStatus::Invoiced),
            ProjectStatus::Invoiced => Some(ProjectStatus::Paid),
            ProjectStatus::Paid => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown project status: {s}")))
    }
}

// ---------------------------------------------------------------------------
// CrewStatus
// ---------------------------------------------------------------------------

/// Availability status of a crew in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewStatus {
    Active,
    Vacation,
    EquipmentIssue,
    Unavailable,
}

impl CrewStatus {
    pub const ALL: [CrewStatus; 4] = [
        CrewStatus::Active,
        CrewStatus::Vacation,
        CrewStatus::EquipmentIssue,
        CrewStatus::Unavailable,
    ];

    /// The snake_case wire name stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            CrewStatus::Active => "active",
            CrewStatus::Vacation => "vacation",
            CrewStatus::EquipmentIssue => "equipment_issue",
            CrewStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for CrewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrewStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown crew status: {s}")))
    }
}

// ---------------------------------------------------------------------------
// MemberRole
// ---------------------------------------------------------------------------

/// Role of an individual worker within a crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Leader,
    Worker,
    Specialist,
}

impl MemberRole {
    pub const ALL: [MemberRole; 3] = [
        MemberRole::Leader,
        MemberRole::Worker,
        MemberRole::Specialist,
    ];

    /// The snake_case wire name stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            MemberRole::Leader => "leader",
            MemberRole::Worker => "worker",
            MemberRole::Specialist => "specialist",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown member role: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
