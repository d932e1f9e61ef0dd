use chrono::NaiveDate;
use serde::Serialize;

use crate::Project;

/// Tunable thresholds for [`evaluate_risk`].
#[derive(Debug, Clone, Copy)]
pub struct RiskOptions {
    /// A project due within this many days (inclusive) can be flagged at risk.
    pub days_threshold: i64,
    /// Remaining effort must exceed this many hours to flag at risk.
    pub min_remaining_hours: f64,
}

impl Default for RiskOptions {
    fn default() -> Self {
        Self {
            days_threshold: 7,
            min_remaining_hours: 8.0,
        }
    }
}

/// Risk classification of a single project.
///
/// At most one reason is emitted; over budget takes precedence over at risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlags {
    pub is_over_budget: bool,
    pub is_at_risk: bool,
    pub reason: Option<String>,
}

/// Classify a project as over budget and/or at risk relative to `today`.
///
/// A project is over budget when hours worked exceed scoped hours, regardless
/// of status or due date. It is at risk when it is active (not handed over,
/// not overdue), due within `options.days_threshold` days and still has more
/// than `options.min_remaining_hours` of work left. The two flags are
/// mutually exclusive: over budget suppresses at risk.
pub fn evaluate_risk(project: &Project, today: NaiveDate, options: RiskOptions) -> RiskFlags {
    let scoped_hours = project.estimated_scoped_hours;
    let remaining_hours = scoped_hours - project.hours_worked;
    let is_over_budget = project.hours_worked > scoped_hours;

    let diff_days = project.days_until_due(today);
    let is_active = !project.status.is_terminal() && diff_days >= 0;

    let is_at_risk = is_active
        && diff_days <= options.days_threshold
        && remaining_hours > options.min_remaining_hours
        && !is_over_budget;

    let reason = if is_over_budget {
        Some(format!(
            "Hours worked ({:.1}) exceed scoped hours ({:.1}).",
            project.hours_worked, scoped_hours
        ))
    } else if is_at_risk {
        Some(format!(
            "Due in {} day(s) with {:.1} hours remaining.",
            diff_days, remaining_hours
        ))
    } else {
        None
    };

    RiskFlags {
        is_over_budget,
        is_at_risk,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{ProjectId, ProjectStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn project(status: ProjectStatus, due_in_days: i64, scoped: f64, worked: f64) -> Project {
        Project {
            id: ProjectId::new(1),
            title: "Onboarding revamp".to_string(),
            client: "HR Department".to_string(),
            instructional_designer: "Alice Chen".to_string(),
            status,
            due_date: today() + Duration::days(due_in_days),
            estimated_scoped_hours: scoped,
            hours_worked: worked,
        }
    }

    #[test]
    fn over_budget_when_worked_exceeds_scoped() {
        let flags = evaluate_risk(
            &project(ProjectStatus::InProgress, 30, 30.0, 35.0),
            today(),
            RiskOptions::default(),
        );

        assert!(flags.is_over_budget);
        assert!(!flags.is_at_risk);
        let reason = flags.reason.unwrap();
        assert!(reason.contains("35.0"));
        assert!(reason.contains("30.0"));
    }

    #[test]
    fn over_budget_ignores_status_and_due_date() {
        // Handed over and long overdue, still over budget.
        let flags = evaluate_risk(
            &project(ProjectStatus::Handover, -20, 10.0, 12.0),
            today(),
            RiskOptions::default(),
        );

        assert!(flags.is_over_budget);
        assert!(!flags.is_at_risk);
    }

    #[test]
    fn zero_scoped_hours_with_any_work_is_over_budget() {
        let flags = evaluate_risk(
            &project(ProjectStatus::Planning, 10, 0.0, 0.5),
            today(),
            RiskOptions::default(),
        );

        assert!(flags.is_over_budget);
    }

    #[test]
    fn at_risk_when_due_soon_with_work_left() {
        let flags = evaluate_risk(
            &project(ProjectStatus::InProgress, 3, 25.0, 8.0),
            today(),
            RiskOptions::default(),
        );

        assert!(flags.is_at_risk);
        assert!(!flags.is_over_budget);
        let reason = flags.reason.unwrap();
        assert!(reason.contains("3 day(s)"));
        assert!(reason.contains("17.0"));
    }

    #[test]
    fn at_risk_boundary_is_inclusive_on_threshold_day() {
        let flags = evaluate_risk(
            &project(ProjectStatus::InProgress, 7, 25.0, 8.0),
            today(),
            RiskOptions::default(),
        );

        assert!(flags.is_at_risk);
    }

    #[test]
    fn not_at_risk_beyond_threshold() {
        let flags = evaluate_risk(
            &project(ProjectStatus::InProgress, 8, 25.0, 8.0),
            today(),
            RiskOptions::default(),
        );

        assert!(!flags.is_at_risk);
        assert!(flags.reason.is_none());
    }

    #[test]
    fn not_at_risk_when_remaining_hours_at_minimum() {
        // Remaining must exceed the minimum, 8.0 exactly does not qualify.
        let flags = evaluate_risk(
            &project(ProjectStatus::InProgress, 3, 16.0, 8.0),
            today(),
            RiskOptions::default(),
        );

        assert!(!flags.is_at_risk);
    }

    #[test]
    fn overdue_project_is_not_at_risk() {
        let flags = evaluate_risk(
            &project(ProjectStatus::InProgress, -1, 25.0, 8.0),
            today(),
            RiskOptions::default(),
        );

        assert!(!flags.is_at_risk);
        assert!(flags.reason.is_none());
    }

    #[test]
    fn handover_project_is_never_at_risk() {
        let flags = evaluate_risk(
            &project(ProjectStatus::Handover, 3, 25.0, 8.0),
            today(),
            RiskOptions::default(),
        );

        assert!(!flags.is_at_risk);
    }

    #[test]
    fn over_budget_suppresses_at_risk() {
        // Due soon and over budget at the same time: only the budget flag.
        let flags = evaluate_risk(
            &project(ProjectStatus::InProgress, 3, 10.0, 12.0),
            today(),
            RiskOptions::default(),
        );

        assert!(flags.is_over_budget);
        assert!(!flags.is_at_risk);
        assert!(flags.reason.unwrap().starts_with("Hours worked"));
    }

    #[test]
    fn quiet_project_has_no_flags_and_no_reason() {
        let flags = evaluate_risk(
            &project(ProjectStatus::Planning, 60, 40.0, 5.0),
            today(),
            RiskOptions::default(),
        );

        assert!(!flags.is_over_budget);
        assert!(!flags.is_at_risk);
        assert!(flags.reason.is_none());
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let options = RiskOptions {
            days_threshold: 14,
            min_remaining_hours: 2.0,
        };
        let flags = evaluate_risk(
            &project(ProjectStatus::Review, 10, 8.0, 5.0),
            today(),
            options,
        );

        assert!(flags.is_at_risk);
    }
}
