use std::collections::HashMap;

use serde::Serialize;

use crate::{DesignerCapacity, Project};

/// Workload rollup for a single designer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSummary {
    pub designer_name: String,
    pub capacity: f64,
    pub estimated_hours: f64,
    pub hours_remaining: f64,
    pub active_projects: Vec<Project>,
}

/// Team-wide workload rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamWorkloadSummary {
    pub designers: Vec<WorkloadSummary>,
    pub total_capacity: f64,
    pub total_estimated_hours: f64,
    pub total_hours_remaining: f64,
}

/// Roll up active projects into per-designer and team-wide workload.
///
/// Handed-over projects are skipped entirely. Designers are grouped in
/// first-appearance order and matched to their capacity record by exact
/// name; a designer without a record falls back to `default_capacity`, so a
/// typo in either name shows up as a default-capacity row rather than an
/// error. `hours_remaining` goes negative when a designer is over-allocated.
/// The result is sorted by estimated hours, highest first; equal values keep
/// their first-appearance order. Designers that only exist as capacity
/// records get no row.
pub fn aggregate_team_workload(
    projects: &[Project],
    capacities: &[DesignerCapacity],
    default_capacity: f64,
) -> TeamWorkloadSummary {
    let mut designers: Vec<WorkloadSummary> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for project in projects {
        if project.status.is_terminal() {
            continue;
        }

        let name = project.instructional_designer.as_str();
        let idx = *by_name.entry(name).or_insert_with(|| {
            let capacity = capacities
                .iter()
                .find(|c| c.designer_name == name)
                .map(|c| c.weekly_available_hours)
                .unwrap_or(default_capacity);

            designers.push(WorkloadSummary {
                designer_name: name.to_string(),
                capacity,
                estimated_hours: 0.0,
                hours_remaining: 0.0,
                active_projects: Vec::new(),
            });
            designers.len() - 1
        });

        designers[idx].estimated_hours += project.estimated_scoped_hours;
        designers[idx].active_projects.push(project.clone());
    }

    let mut total_capacity = 0.0;
    let mut total_estimated_hours = 0.0;
    for summary in &mut designers {
        summary.hours_remaining = summary.capacity - summary.estimated_hours;
        total_capacity += summary.capacity;
        total_estimated_hours += summary.estimated_hours;
    }

    // Stable sort keeps first-appearance order for equal planned hours.
    designers.sort_by(|a, b| b.estimated_hours.total_cmp(&a.estimated_hours));

    TeamWorkloadSummary {
        designers,
        total_capacity,
        total_estimated_hours,
        total_hours_remaining: total_capacity - total_estimated_hours,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{ProjectId, ProjectStatus};

    fn project(id: i32, designer: &str, status: ProjectStatus, scoped: f64) -> Project {
        Project {
            id: ProjectId::new(id),
            title: format!("Project {id}"),
            client: "Sales Team".to_string(),
            instructional_designer: designer.to_string(),
            status,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            estimated_scoped_hours: scoped,
            hours_worked: 0.0,
        }
    }

    #[test]
    fn empty_input_yields_empty_zero_summary() {
        let summary = aggregate_team_workload(&[], &[], 40.0);

        assert!(summary.designers.is_empty());
        assert_eq!(summary.total_capacity, 0.0);
        assert_eq!(summary.total_estimated_hours, 0.0);
        assert_eq!(summary.total_hours_remaining, 0.0);
    }

    #[test]
    fn groups_by_designer_with_default_capacity_fallback() {
        let projects = vec![
            project(1, "Alice Chen", ProjectStatus::InProgress, 30.0),
            project(2, "Alice Chen", ProjectStatus::Review, 25.0),
            project(3, "Bob Martinez", ProjectStatus::Planning, 10.0),
        ];
        let capacities = vec![DesignerCapacity::new("Alice Chen", 40.0)];

        let summary = aggregate_team_workload(&projects, &capacities, 40.0);

        assert_eq!(summary.designers.len(), 2);

        let alice = &summary.designers[0];
        assert_eq!(alice.designer_name, "Alice Chen");
        assert_eq!(alice.estimated_hours, 55.0);
        assert_eq!(alice.hours_remaining, -15.0);
        assert_eq!(alice.active_projects.len(), 2);

        let bob = &summary.designers[1];
        assert_eq!(bob.designer_name, "Bob Martinez");
        assert_eq!(bob.capacity, 40.0);
        assert_eq!(bob.hours_remaining, 30.0);

        assert_eq!(summary.total_capacity, 80.0);
        assert_eq!(summary.total_estimated_hours, 65.0);
        assert_eq!(summary.total_hours_remaining, 15.0);
    }

    #[test]
    fn handover_projects_are_excluded_everywhere() {
        let projects = vec![
            project(1, "Alice Chen", ProjectStatus::InProgress, 20.0),
            project(2, "Alice Chen", ProjectStatus::Handover, 50.0),
            project(3, "Carol Williams", ProjectStatus::Handover, 30.0),
        ];

        let summary = aggregate_team_workload(&projects, &[], 40.0);

        assert_eq!(summary.designers.len(), 1);
        assert_eq!(summary.designers[0].estimated_hours, 20.0);
        assert_eq!(summary.designers[0].active_projects.len(), 1);
        assert_eq!(summary.total_estimated_hours, 20.0);
    }

    #[test]
    fn designers_sorted_by_estimated_hours_descending() {
        let projects = vec![
            project(1, "Bob Martinez", ProjectStatus::InProgress, 10.0),
            project(2, "Alice Chen", ProjectStatus::InProgress, 55.0),
        ];

        let summary = aggregate_team_workload(&projects, &[], 40.0);

        assert_eq!(summary.designers[0].designer_name, "Alice Chen");
        assert_eq!(summary.designers[1].designer_name, "Bob Martinez");
    }

    #[test]
    fn equal_hours_keep_first_appearance_order() {
        let projects = vec![
            project(1, "Carol Williams", ProjectStatus::InProgress, 15.0),
            project(2, "David Kim", ProjectStatus::InProgress, 15.0),
            project(3, "Emma Thompson", ProjectStatus::InProgress, 15.0),
        ];

        let summary = aggregate_team_workload(&projects, &[], 40.0);

        let names: Vec<&str> = summary
            .designers
            .iter()
            .map(|d| d.designer_name.as_str())
            .collect();
        assert_eq!(names, ["Carol Williams", "David Kim", "Emma Thompson"]);
    }

    #[test]
    fn totals_match_per_designer_sums() {
        let projects = vec![
            project(1, "Alice Chen", ProjectStatus::InProgress, 12.5),
            project(2, "Bob Martinez", ProjectStatus::Review, 7.5),
            project(3, "Carol Williams", ProjectStatus::Planning, 20.0),
        ];
        let capacities = vec![
            DesignerCapacity::new("Alice Chen", 40.0),
            DesignerCapacity::new("Bob Martinez", 32.0),
        ];

        let summary = aggregate_team_workload(&projects, &capacities, 40.0);

        let capacity_sum: f64 = summary.designers.iter().map(|d| d.capacity).sum();
        let estimated_sum: f64 = summary.designers.iter().map(|d| d.estimated_hours).sum();
        let remaining_sum: f64 = summary.designers.iter().map(|d| d.hours_remaining).sum();

        assert_eq!(summary.total_capacity, capacity_sum);
        assert_eq!(summary.total_estimated_hours, estimated_sum);
        assert_eq!(summary.total_hours_remaining, remaining_sum);
    }

    #[test]
    fn capacity_only_designers_get_no_row() {
        let capacities = vec![
            DesignerCapacity::new("Alice Chen", 40.0),
            DesignerCapacity::new("Emma Thompson", 40.0),
        ];
        let projects = vec![project(1, "Alice Chen", ProjectStatus::InProgress, 5.0)];

        let summary = aggregate_team_workload(&projects, &capacities, 40.0);

        assert_eq!(summary.designers.len(), 1);
        assert_eq!(summary.designers[0].designer_name, "Alice Chen");
    }
}
