use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A project identifier.
///
/// Wraps i32 to match the database SERIAL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i32);

impl ProjectId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProjectId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<ProjectId> for i32 {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

/// Lifecycle stage of a project.
///
/// `Handover` is terminal: handed-over projects are excluded from workload
/// and focus calculations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[strum(ascii_case_insensitive, serialize = "PLANNING")]
    Planning,
    #[strum(ascii_case_insensitive, serialize = "IN_PROGRESS")]
    InProgress,
    #[strum(ascii_case_insensitive, serialize = "REVIEW")]
    Review,
    #[strum(ascii_case_insensitive, serialize = "HANDOVER")]
    Handover,
}

impl ProjectStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Handover)
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A project as seen by the workload calculations.
///
/// `instructional_designer` is a free-text join key matched against
/// `DesignerCapacity::designer_name` by exact equality, not a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub client: String,
    pub instructional_designer: String,
    pub status: ProjectStatus,
    pub due_date: NaiveDate,
    pub estimated_scoped_hours: f64,
    pub hours_worked: f64,
}

impl Project {
    /// Whole days from `today` until the due date. Negative when overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        self.due_date.signed_duration_since(today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn status_round_trips_through_storage_text() {
        for status in [
            ProjectStatus::Planning,
            ProjectStatus::InProgress,
            ProjectStatus::Review,
            ProjectStatus::Handover,
        ] {
            let text = status.to_string();
            assert_eq!(ProjectStatus::from_str(&text).unwrap(), status);
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            ProjectStatus::from_str("in_progress").unwrap(),
            ProjectStatus::InProgress
        );
        assert_eq!(
            ProjectStatus::from_str("handover").unwrap(),
            ProjectStatus::Handover
        );
    }

    #[test]
    fn only_handover_is_terminal() {
        assert!(ProjectStatus::Handover.is_terminal());
        assert!(!ProjectStatus::Planning.is_terminal());
        assert!(!ProjectStatus::InProgress.is_terminal());
        assert!(!ProjectStatus::Review.is_terminal());
    }

    #[test]
    fn days_until_due_is_negative_when_overdue() {
        let project = Project {
            id: ProjectId::new(1),
            title: "Compliance refresh".to_string(),
            client: "Legal".to_string(),
            instructional_designer: "Alice Chen".to_string(),
            status: ProjectStatus::InProgress,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            estimated_scoped_hours: 10.0,
            hours_worked: 0.0,
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        assert_eq!(project.days_until_due(today), -10);
    }
}
