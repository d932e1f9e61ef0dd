use chrono::NaiveDate;

use crate::{evaluate_risk, Project, RiskOptions};

/// Score contribution for a project currently flagged at risk.
pub const AT_RISK_SCORE: i64 = 100;
/// Score contribution for a project that is over budget.
pub const OVER_BUDGET_SCORE: i64 = 50;
/// Days-until-due window that earns an urgency bonus. Overdue projects score
/// past the window: 10 days overdue contributes 40.
pub const URGENCY_WINDOW_DAYS: i64 = 30;

/// Pick the single most urgent active project for one designer.
///
/// The caller has already partitioned projects by designer; this does no
/// grouping of its own. Handed-over projects are ignored, and `None` is
/// returned only when nothing else remains. Ties keep the first project in
/// caller order.
pub fn select_focus_project(
    projects_for_designer: &[Project],
    today: NaiveDate,
) -> Option<&Project> {
    let mut best: Option<(&Project, i64)> = None;

    for project in projects_for_designer {
        if project.status.is_terminal() {
            continue;
        }

        let score = focus_score(project, today);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((project, score)),
        }
    }

    best.map(|(project, _)| project)
}

fn focus_score(project: &Project, today: NaiveDate) -> i64 {
    let risk = evaluate_risk(project, today, RiskOptions::default());
    let diff_days = project.days_until_due(today);

    let mut score = 0;
    if risk.is_at_risk {
        score += AT_RISK_SCORE;
    }
    if risk.is_over_budget {
        score += OVER_BUDGET_SCORE;
    }
    score + (URGENCY_WINDOW_DAYS - diff_days).max(0)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{ProjectId, ProjectStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn project(id: i32, status: ProjectStatus, due_in_days: i64, scoped: f64, worked: f64) -> Project {
        Project {
            id: ProjectId::new(id),
            title: format!("Project {id}"),
            client: "Product Team".to_string(),
            instructional_designer: "Alice Chen".to_string(),
            status,
            due_date: today() + Duration::days(due_in_days),
            estimated_scoped_hours: scoped,
            hours_worked: worked,
        }
    }

    #[test]
    fn empty_input_returns_none() {
        assert_eq!(select_focus_project(&[], today()), None);
    }

    #[test]
    fn only_handover_projects_return_none() {
        let projects = vec![
            project(1, ProjectStatus::Handover, 3, 25.0, 8.0),
            project(2, ProjectStatus::Handover, -5, 10.0, 20.0),
        ];

        assert_eq!(select_focus_project(&projects, today()), None);
    }

    #[test]
    fn at_risk_project_beats_merely_due_soon() {
        // At risk: due in 3 days with 17 hours left, scores >= 100.
        let at_risk = project(1, ProjectStatus::InProgress, 3, 25.0, 8.0);
        // Due in 25 days, nothing else: urgency bonus of 5.
        let due_later = project(2, ProjectStatus::InProgress, 25, 25.0, 8.0);

        let candidates = [due_later.clone(), at_risk.clone()];
        let picked = select_focus_project(&candidates, today()).unwrap();
        assert_eq!(picked.id, at_risk.id);

        // Same winner regardless of list order.
        let candidates = [at_risk.clone(), due_later];
        let picked = select_focus_project(&candidates, today()).unwrap();
        assert_eq!(picked.id, at_risk.id);
    }

    #[test]
    fn over_budget_outranks_plain_urgency() {
        let over_budget = project(1, ProjectStatus::InProgress, 20, 10.0, 15.0);
        let due_sooner = project(2, ProjectStatus::InProgress, 10, 40.0, 5.0);

        let candidates = [due_sooner, over_budget.clone()];
        let picked = select_focus_project(&candidates, today()).unwrap();
        // 50 + 10 urgency vs 20 urgency.
        assert_eq!(picked.id, over_budget.id);
    }

    #[test]
    fn overdue_project_scores_past_the_urgency_window() {
        // 10 days overdue: urgency contribution of 40, but not at risk.
        let overdue = project(1, ProjectStatus::InProgress, -10, 20.0, 15.0);
        // Due in a month: urgency contribution of 0.
        let distant = project(2, ProjectStatus::InProgress, 30, 20.0, 15.0);

        let candidates = [distant, overdue.clone()];
        let picked = select_focus_project(&candidates, today()).unwrap();
        assert_eq!(picked.id, overdue.id);
    }

    #[test]
    fn tie_breaks_to_first_in_caller_order() {
        let first = project(1, ProjectStatus::InProgress, 12, 20.0, 5.0);
        let second = project(2, ProjectStatus::InProgress, 12, 20.0, 5.0);

        let candidates = [first.clone(), second];
        let picked = select_focus_project(&candidates, today()).unwrap();
        assert_eq!(picked.id, first.id);
    }

    #[test]
    fn handover_is_skipped_even_when_it_would_score_highest() {
        let handed_over = project(1, ProjectStatus::Handover, -10, 10.0, 25.0);
        let quiet = project(2, ProjectStatus::Planning, 60, 40.0, 0.0);

        let candidates = [handed_over, quiet.clone()];
        let picked = select_focus_project(&candidates, today()).unwrap();
        assert_eq!(picked.id, quiet.id);
    }
}
