use chrono::{DateTime, Utc};
use workload::WorkloadSummary;

use crate::repositories::ProjectRecord;

/// Build the downloadable CSV report: a per-designer team summary section
/// followed by an all-projects section. Free-text fields are quoted.
pub fn build_csv_report(
    projects: &[ProjectRecord],
    designers: &[WorkloadSummary],
    generated_at: DateTime<Utc>,
) -> String {
    let mut rows: Vec<String> = Vec::new();

    rows.push("Canvas Project Report".to_string());
    rows.push(format!(
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    rows.push(String::new());

    rows.push("TEAM SUMMARY".to_string());
    rows.push("Designer,Capacity (hrs),Planned (hrs),Remaining (hrs),Active Projects".to_string());
    for designer in designers {
        rows.push(format!(
            "{},{:.1},{:.1},{:.1},{}",
            quote(&designer.designer_name),
            designer.capacity,
            designer.estimated_hours,
            designer.hours_remaining,
            designer.active_projects.len()
        ));
    }
    rows.push(String::new());

    rows.push("ALL PROJECTS".to_string());
    rows.push(
        "Title,Client,Designer,Priority,Status,Due Date,Early Reminder,\
         Scoped Hours,Hours Worked,% Complete,Media Budget"
            .to_string(),
    );
    for project in projects {
        let percent_complete = if project.estimated_scoped_hours > 0.0 {
            project.hours_worked / project.estimated_scoped_hours * 100.0
        } else {
            0.0
        };
        rows.push(format!(
            "{},{},{},{},{},{},{},{:.1},{:.1},{:.0}%,{}",
            quote(&project.title),
            quote(&project.client),
            quote(&project.instructional_designer),
            quote(project.priority.as_deref().unwrap_or("None")),
            quote(&project.status.to_string()),
            project.due_date,
            project
                .early_reminder_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "None".to_string()),
            project.estimated_scoped_hours,
            project.hours_worked,
            percent_complete,
            quote(project.media_budget.as_deref().unwrap_or("None")),
        ));
    }

    rows.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use workload::{Project, ProjectStatus};

    use super::*;

    fn record(title: &str, scoped: f64, worked: f64) -> ProjectRecord {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        ProjectRecord {
            id: 1,
            team_id: 1,
            title: title.to_string(),
            client: "HR Department".to_string(),
            instructional_designer: "Alice Chen".to_string(),
            status: ProjectStatus::InProgress,
            priority: None,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            early_reminder_date: None,
            estimated_scoped_hours: scoped,
            hours_worked: worked,
            media_budget: None,
            notes: None,
            created_by: "user".to_string(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    fn summary(name: &str, capacity: f64, estimated: f64) -> WorkloadSummary {
        WorkloadSummary {
            designer_name: name.to_string(),
            capacity,
            estimated_hours: estimated,
            hours_remaining: capacity - estimated,
            active_projects: Vec::<Project>::new(),
        }
    }

    #[test]
    fn report_has_both_sections_with_headers() {
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        let report = build_csv_report(
            &[record("Onboarding", 60.0, 45.0)],
            &[summary("Alice Chen", 40.0, 55.0)],
            generated_at,
        );

        assert!(report.starts_with("Canvas Project Report\nGenerated: 2025-06-02 09:30 UTC"));
        assert!(report.contains("TEAM SUMMARY"));
        assert!(report.contains("ALL PROJECTS"));
        assert!(report.contains("\"Alice Chen\",40.0,55.0,-15.0,0"));
    }

    #[test]
    fn project_rows_include_percent_complete() {
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        let report = build_csv_report(&[record("Onboarding", 60.0, 45.0)], &[], generated_at);

        assert!(report.contains("60.0,45.0,75%"));
        assert!(report.contains("\"IN_PROGRESS\""));
        assert!(report.contains("\"None\""));
    }

    #[test]
    fn zero_scoped_hours_reports_zero_percent() {
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        let report = build_csv_report(&[record("Unscoped", 0.0, 3.0)], &[], generated_at);

        assert!(report.contains("0.0,3.0,0%"));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        let report = build_csv_report(
            &[record("The \"Big\" Course", 10.0, 0.0)],
            &[],
            generated_at,
        );

        assert!(report.contains("\"The \"\"Big\"\" Course\""));
    }
}
